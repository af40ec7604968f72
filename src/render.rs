//! Half-block pixel rendering of the logical canvas.

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    fn to_crossterm(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

pub const SKY_TOP: Rgb = Rgb(112, 197, 206);
pub const SKY_BOT: Rgb = Rgb(240, 249, 255);
pub const BORDER: Rgb = Rgb(24, 28, 36);
pub const PIPE_L: Rgb = Rgb(74, 122, 26);
pub const PIPE_M: Rgb = Rgb(100, 170, 40);
pub const PIPE_R: Rgb = Rgb(115, 191, 46);
pub const PIPE_HI: Rgb = Rgb(145, 215, 62);
pub const PIPE_EDGE: Rgb = Rgb(60, 100, 20);
pub const BIRD_Y: Rgb = Rgb(255, 222, 89);
pub const BIRD_BEAK: Rgb = Rgb(255, 89, 120);
pub const BIRD_EYE: Rgb = Rgb(45, 52, 54);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const SHADOW: Rgb = Rgb(30, 30, 30);
pub const HUD_BG: Rgb = Rgb(40, 44, 52);
pub const GOLD: Rgb = Rgb(255, 215, 0);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BORDER; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    /// Draws the buffer with its first pixel row at terminal row `top`.
    pub fn render(&self, out: &mut impl Write, top: u16) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, top))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let upper = self.get(col, row * 2);
                let lower = self.get(col, row * 2 + 1);

                if upper == lower {
                    if need_bg || prev_bg != upper {
                        queue!(out, style::SetBackgroundColor(upper.to_crossterm()))?;
                        prev_bg = upper;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != upper {
                        queue!(out, style::SetForegroundColor(upper.to_crossterm()))?;
                        prev_fg = upper;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != lower {
                        queue!(out, style::SetBackgroundColor(lower.to_crossterm()))?;
                        prev_bg = lower;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── Logical canvas mapping ──────────────────────────────────────────────────

/// Uniform scale from the 360x640 canvas onto a pixel buffer, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
}

impl Viewport {
    pub fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f64 / CANVAS_WIDTH).min(ph as f64 / CANVAS_HEIGHT);
        Viewport {
            scale,
            ox: ((pw as f64 - CANVAS_WIDTH * scale) / 2.0).floor(),
            oy: ((ph as f64 - CANVAS_HEIGHT * scale) / 2.0).floor(),
        }
    }

    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        (self.ox + x * self.scale, self.oy + y * self.scale)
    }

    /// Logical coordinates of the centre of pixel `(px, py)`.
    pub fn to_logical(&self, px: i32, py: i32) -> (f64, f64) {
        (
            (px as f64 + 0.5 - self.ox) / self.scale,
            (py as f64 + 0.5 - self.oy) / self.scale,
        )
    }

    /// Pixel rect `[x0, x1) x [y0, y1)` covering a logical rect.
    pub fn px_rect(&self, x: f64, y: f64, w: f64, h: f64) -> (i32, i32, i32, i32) {
        let (x0, y0) = self.to_px(x, y);
        let (x1, y1) = self.to_px(x + w, y + h);
        (
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
        )
    }

    /// Pixel rect of the whole canvas.
    pub fn canvas(&self) -> (i32, i32, i32, i32) {
        self.px_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

// ── Text ────────────────────────────────────────────────────────────────────

/// Plain text printed over the pixels, positioned in terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
    pub bg: Rgb,
}

// ── Frame ───────────────────────────────────────────────────────────────────

/// Everything drawn in one tick: the canvas pixels plus text on top.
pub struct Frame {
    pub buf: PixelBuf,
    pub view: Viewport,
    pub labels: Vec<Label>,
    /// Terminal row of the first pixel row.
    pub top: u16,
    clip: (i32, i32, i32, i32),
}

impl Frame {
    pub fn new(cols: u16, rows: u16, top: u16) -> Self {
        let pw = cols as usize;
        let ph = rows.saturating_sub(top) as usize * 2;
        let view = Viewport::fit(pw, ph);
        Frame {
            buf: PixelBuf::new(pw, ph),
            view,
            labels: Vec::new(),
            top,
            clip: view.canvas(),
        }
    }

    pub fn clear(&mut self) {
        self.buf.fill(BORDER);
        self.labels.clear();
    }

    /// Sets a pixel if it lies on the canvas.
    pub fn plot(&mut self, x: i32, y: i32, c: Rgb) {
        let (x0, y0, x1, y1) = self.clip;
        if x >= x0 && x < x1 && y >= y0 && y < y1 {
            self.buf.set(x, y, c);
        }
    }

    pub fn canvas_px(&self) -> (i32, i32, i32, i32) {
        self.clip
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, c: Rgb) {
        let (x0, y0, x1, y1) = self.view.px_rect(x, y, w, h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py, c);
            }
        }
    }

    /// One-pixel border just inside a logical rect.
    pub fn outline_rect(&mut self, x: f64, y: f64, w: f64, h: f64, c: Rgb) {
        let (x0, y0, x1, y1) = self.view.px_rect(x, y, w, h);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for px in x0..x1 {
            self.plot(px, y0, c);
            self.plot(px, y1 - 1, c);
        }
        for py in y0..y1 {
            self.plot(x0, py, c);
            self.plot(x1 - 1, py, c);
        }
    }

    /// Blends every canvas pixel toward `c` by `alpha_256 / 256`.
    pub fn shade_canvas(&mut self, c: Rgb, alpha_256: u16) {
        let (x0, y0, x1, y1) = self.clip;
        for py in y0.max(0)..y1 {
            for px in x0.max(0)..x1 {
                if (px as usize) < self.buf.width() && (py as usize) < self.buf.height() {
                    let old = self.buf.get(px as usize, py as usize);
                    self.buf.set(px, py, Rgb::lerp(old, c, alpha_256));
                }
            }
        }
    }

    /// Centres `text` horizontally on the canvas at logical height `y`.
    pub fn text_centered(&mut self, y: f64, text: &str, fg: Rgb, bg: Rgb) {
        let (x0, _, x1, _) = self.clip;
        let width = text.chars().count() as i32;
        let col = ((x0 + x1) / 2 - width / 2).max(0);
        let (_, py) = self.view.to_px(0.0, y);
        let row = self.top as i32 + (py as i32) / 2;
        self.labels.push(Label {
            col: col as u16,
            row: row.max(0) as u16,
            text: text.to_string(),
            fg,
            bg,
        });
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out, self.top)?;
        for label in &self.labels {
            queue!(
                out,
                cursor::MoveTo(label.col, label.row),
                style::SetForegroundColor(label.fg.to_crossterm()),
                style::SetBackgroundColor(label.bg.to_crossterm()),
                style::Print(&label.text),
                style::ResetColor,
            )?;
        }
        Ok(())
    }
}
