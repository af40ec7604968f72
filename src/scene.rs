//! Drawing the game onto a [`Frame`].

use crate::config::*;
use crate::game::{Bird, Game, Pipe};
use crate::i18n::Strings;
use crate::render::*;

impl Game {
    pub fn draw(&self, frame: &mut Frame, text: &Strings) {
        frame.clear();
        draw_sky(frame);
        for pipe in &self.pipes {
            draw_pipe(frame, pipe);
        }
        draw_bird(frame, &self.bird);

        if !self.running {
            self.draw_overlay(frame, text);
        }
    }

    fn draw_overlay(&self, frame: &mut Frame, text: &Strings) {
        frame.shade_canvas(BLACK, 115);

        let y = CANVAS_HEIGHT * 0.35;
        let line = 40.0;
        if !self.played {
            frame.text_centered(y, text.title, BIRD_Y, SHADOW);
            frame.text_centered(y + line * 2.0, text.start_hint, WHITE, SHADOW);
            return;
        }

        frame.text_centered(y, text.game_over, WHITE, SHADOW);
        frame.text_centered(
            y + line,
            &format!("{}: {}", text.score, self.score),
            WHITE,
            SHADOW,
        );
        frame.text_centered(
            y + line * 2.0,
            &format!("{}: {}", text.best, self.best),
            BIRD_Y,
            SHADOW,
        );
        frame.text_centered(y + line * 3.0, text.remark(self.score), WHITE, SHADOW);
        frame.text_centered(y + line * 5.0, text.again_hint, WHITE, SHADOW);
    }
}

fn draw_sky(frame: &mut Frame) {
    let (x0, y0, x1, y1) = frame.canvas_px();
    let h = (y1 - y0).max(1);
    for py in y0..y1 {
        let t = ((py - y0) * 256 / h) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for px in x0..x1 {
            frame.plot(px, py, c);
        }
    }
}

fn draw_pipe(frame: &mut Frame, pipe: &Pipe) {
    let segments = [
        (0.0, pipe.top),
        (pipe.bottom(), CANVAS_HEIGHT - pipe.bottom()),
    ];
    for (y, h) in segments {
        let (x0, y0, x1, y1) = frame.view.px_rect(pipe.x, y, PIPE_WIDTH, h);
        let w = x1 - x0;
        for px in x0..x1 {
            let c = pipe_shade(px - x0, w);
            for py in y0..y1 {
                frame.plot(px, py, c);
            }
        }
        frame.outline_rect(pipe.x, y, PIPE_WIDTH, h, PIPE_EDGE);
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn draw_bird(frame: &mut Frame, bird: &Bird) {
    let (sin, cos) = bird.tilt().sin_cos();
    let reach = bird.radius + 2.0;
    let (x0, y0, x1, y1) = frame
        .view
        .px_rect(bird.x - reach, bird.y - reach, reach * 2.0, reach * 2.0);

    for py in y0 - 1..=y1 {
        for px in x0 - 1..=x1 {
            let (lx, ly) = frame.view.to_logical(px, py);
            let (dx, dy) = (lx - bird.x, ly - bird.y);
            // Into the bird's own frame: u points forward, v down.
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            if let Some(c) = bird_color(u, v, bird.radius) {
                frame.plot(px, py, c);
            }
        }
    }
}

/// Colour of the unrotated bird sprite at local offset `(u, v)`: a disc of
/// radius `r` with a beak disc ahead of centre and an eye behind it.
fn bird_color(u: f64, v: f64, r: f64) -> Option<Rgb> {
    let inside = |cu: f64, cv: f64, radius: f64| {
        let (a, b) = (u - cu, v - cv);
        a * a + b * b <= radius * radius
    };

    if inside(-4.0, -6.0, 4.0) {
        Some(BIRD_EYE)
    } else if inside(r / 2.0, -4.0, 6.0) {
        Some(BIRD_BEAK)
    } else if inside(0.0, 0.0, r) {
        Some(BIRD_Y)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use crate::storage::MemoryStore;

    fn full_frame() -> Frame {
        // 360x640 pixels: one pixel per logical unit.
        Frame::new(360, 321, 1)
    }

    #[test]
    fn test_bird_sprite_parts() {
        let r = BIRD_RADIUS;
        assert_eq!(bird_color(0.0, 0.0, r), Some(BIRD_Y));
        assert_eq!(bird_color(-4.0, -6.0, r), Some(BIRD_EYE));
        assert_eq!(bird_color(r / 2.0, -4.0, r), Some(BIRD_BEAK));
        assert_eq!(bird_color(0.0, r - 0.5, r), Some(BIRD_Y));
        assert_eq!(bird_color(-r - 1.0, 0.0, r), None);
    }

    #[test]
    fn test_eye_follows_tilt() {
        let store = MemoryStore::new();
        let mut game = Game::new(&store);
        game.reset();
        let text = Strings::for_lang(Lang::En);
        // Screen pixel of the eye centre (-4, -6) rotated by `a`.
        let eye_px = |game: &Game, a: f64| {
            let (sin, cos) = a.sin_cos();
            let x = game.bird.x + (-4.0 * cos + 6.0 * sin);
            let y = game.bird.y + (-4.0 * sin - 6.0 * cos);
            (x as usize, y as usize)
        };
        let down = eye_px(&game, TILT_MAX);
        let up = eye_px(&game, TILT_MIN);

        let mut f = full_frame();
        game.bird.vy = 100.0; // nose down
        game.draw(&mut f, text);
        assert_eq!(f.buf.get(down.0, down.1), BIRD_EYE);
        assert_ne!(f.buf.get(up.0, up.1), BIRD_EYE);

        game.bird.vy = -100.0; // nose up
        game.draw(&mut f, text);
        assert_eq!(f.buf.get(up.0, up.1), BIRD_EYE);
        assert_ne!(f.buf.get(down.0, down.1), BIRD_EYE);
    }

    #[test]
    fn test_pipe_drawn_with_outline() {
        let store = MemoryStore::new();
        let mut game = Game::new(&store);
        game.reset();
        game.pipes.push(Pipe::new(200.0, 100.0));
        let mut f = full_frame();
        game.draw(&mut f, Strings::for_lang(Lang::En));

        assert_eq!(f.buf.get(200, 50), PIPE_EDGE);
        assert_eq!(f.buf.get(259, 50), PIPE_EDGE);
        assert_ne!(f.buf.get(230, 50), PIPE_EDGE);
        // Gap is sky.
        let sky = f.buf.get(230, 170);
        assert_ne!(sky, PIPE_EDGE);
        assert_eq!(sky, f.buf.get(10, 170));
        assert!(f.labels.is_empty());
    }

    #[test]
    fn test_overlay_only_when_stopped() {
        let mut store = MemoryStore::new();
        let mut game = Game::new(&store);
        let text = Strings::for_lang(Lang::En);
        let mut f = full_frame();

        game.draw(&mut f, text);
        assert!(f.labels.iter().any(|l| l.text == "SKYFLAP"));
        let dimmed = f.buf.get(5, 5);

        game.reset();
        game.draw(&mut f, text);
        assert!(f.labels.is_empty());
        assert_ne!(f.buf.get(5, 5), dimmed);

        game.score = 7;
        game.end_game(&mut store);
        game.draw(&mut f, text);
        let lines: Vec<&str> = f.labels.iter().map(|l| l.text.as_str()).collect();
        assert!(lines.contains(&"GAME OVER"));
        assert!(lines.contains(&"Score: 7"));
        assert!(lines.contains(&"Best: 7"));
        assert!(lines.contains(&"Great flying!"));
    }
}
