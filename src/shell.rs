//! Terminal host: owns the clock, the input and the screen.

use crate::config::*;
use crate::game::{Flap, Game};
use crate::i18n::{Lang, Strings};
use crate::render::{Frame, GOLD, HUD_BG, Label, WHITE};
use crate::sound::{Audio, Sound};
use crate::storage::ScoreStore;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind},
    execute, terminal,
};
use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

/// Player intent decoded from a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flap,
    Restart,
    Quit,
    Resize(u16, u16),
}

pub fn action_for(ev: &Event) -> Option<Action> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Action::Flap),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(Action::Flap)
        }
        Event::Resize(c, r) => Some(Action::Resize(*c, *r)),
        _ => None,
    }
}

/// What the loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    NewGame,
    Quit,
}

/// Transient message on the status row.
struct Notice {
    text: String,
    until: Instant,
}

/// Lays out the status row: `left` flush left, `right` flush right, and
/// `center` in the middle when there is room for it.
pub fn status_line(width: usize, left: &str, center: &str, right: &str) -> String {
    let mut cells: Vec<char> = vec![' '; width];
    let mut put = |start: usize, s: &str| {
        for (i, ch) in s.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + i) {
                *cell = ch;
            }
        }
    };
    let (lw, cw, rw) = (
        left.chars().count(),
        center.chars().count(),
        right.chars().count(),
    );
    put(0, left);
    if rw <= width {
        put(width - rw, right);
    }
    let cstart = width.saturating_sub(cw) / 2;
    if cw > 0 && cstart > lw && cstart + cw < width.saturating_sub(rw) {
        put(cstart, center);
    }
    cells.into_iter().collect()
}

pub struct Shell<S: ScoreStore> {
    game: Game,
    store: S,
    text: &'static Strings,
    audio: Option<Audio>,
    frame: Frame,
    cols: u16,
    notice: Option<Notice>,
}

impl<S: ScoreStore> Shell<S> {
    pub fn new(store: S, settings: &Settings, cols: u16, rows: u16) -> Self {
        let lang = Lang::from_locale(&settings.lang);
        log::info!("terminal {}x{}, language {:?}", cols, rows, lang);
        Shell {
            game: Game::new(&store),
            store,
            text: Strings::for_lang(lang),
            audio: Audio::open(settings.muted),
            frame: Frame::new(cols, rows, 1),
            cols,
            notice: None,
        }
    }

    fn play(&self, sound: Sound) {
        if let Some(audio) = &self.audio {
            audio.play(sound);
        }
    }

    fn apply(&mut self, action: Action) -> Control {
        match action {
            Action::Flap => match self.game.flap() {
                Flap::Flapped => {
                    self.play(Sound::Flap);
                    Control::Continue
                }
                Flap::Started => {
                    self.notice = None;
                    Control::NewGame
                }
            },
            Action::Restart => {
                self.game.reset();
                self.notice = None;
                Control::NewGame
            }
            Action::Quit => Control::Quit,
            Action::Resize(c, r) => {
                log::debug!("resize to {}x{}", c, r);
                self.cols = c;
                self.frame = Frame::new(c, r, 1);
                Control::Continue
            }
        }
    }

    fn tick(&mut self, dt_ms: f64) {
        let mut rng = rand::thread_rng();
        let before = self.game.score;
        let report = self.game.update(dt_ms, &mut rng, &mut self.store);
        if self.game.score > before {
            self.play(Sound::Score);
        }
        if let Some(over) = report {
            self.play(Sound::Crash);
            if over.new_record {
                self.notice = Some(Notice {
                    text: format!("{} {}", self.text.new_record, over.best),
                    until: Instant::now() + Duration::from_millis(NOTICE_MS),
                });
            }
        }
    }

    fn status(&mut self) -> Label {
        if self.notice.as_ref().is_some_and(|n| Instant::now() >= n.until) {
            self.notice = None;
        }
        let left = format!(" {}: {}", self.text.score, self.game.score);
        let right = format!("{}: {} ", self.text.best, self.game.best);
        let center = self.notice.as_ref().map_or("", |n| n.text.as_str());
        Label {
            col: 0,
            row: 0,
            text: status_line(self.cols as usize, &left, center, &right),
            fg: if self.notice.is_some() { GOLD } else { WHITE },
            bg: HUD_BG,
        }
    }

    fn draw(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.game.draw(&mut self.frame, self.text);
        let status = self.status();
        self.frame.labels.push(status);
        self.frame.render(out)?;
        out.flush()
    }

    /// Runs the frame loop until the player quits.
    pub fn run(&mut self, out: &mut impl Write) -> io::Result<()> {
        let frame_dur = Duration::from_millis(HOST_FRAME_MS);
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();

            // Input
            while event::poll(Duration::ZERO)? {
                if let Some(action) = action_for(&event::read()?) {
                    match self.apply(action) {
                        Control::Quit => return Ok(()),
                        // New time baseline for the fresh game.
                        Control::NewGame => last = Instant::now(),
                        Control::Continue => {}
                    }
                }
            }

            // Update
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64() * 1000.0;
            last = now;
            self.tick(dt.min(MAX_STEP_MS));

            // Render
            self.draw(out)?;

            // Frame pacing
            let elapsed = frame_start.elapsed();
            if elapsed < frame_dur {
                std::thread::sleep(frame_dur - elapsed);
            }
        }
    }
}

/// Takes over the terminal, plays, and puts the terminal back even if the
/// loop fails.
pub fn play<S: ScoreStore>(store: S, settings: &Settings) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )?;

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut shell = Shell::new(store, settings, cols, rows);
        shell.run(&mut out)
    });

    execute!(
        out,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn quiet_settings() -> Settings {
        Settings {
            data_dir: PathBuf::from("/nonexistent"),
            muted: true,
            lang: "en_US.UTF-8".to_string(),
        }
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(&key(KeyCode::Char(' '))), Some(Action::Flap));
        assert_eq!(action_for(&key(KeyCode::Up)), Some(Action::Flap));
        assert_eq!(action_for(&key(KeyCode::Char('r'))), Some(Action::Restart));
        assert_eq!(action_for(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(action_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(action_for(&Event::Resize(100, 40)), Some(Action::Resize(100, 40)));
    }

    #[test]
    fn test_mouse_press_flaps() {
        let press = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action_for(&press), Some(Action::Flap));
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action_for(&moved), None);
    }

    #[test]
    fn test_status_line_layout() {
        let line = status_line(30, "Score: 1", "", "Best: 9");
        assert_eq!(line.chars().count(), 30);
        assert!(line.starts_with("Score: 1"));
        assert!(line.ends_with("Best: 9"));

        let line = status_line(40, "S: 1", "New!", "B: 9");
        assert_eq!(&line[18..22], "New!");

        // No room for the centre text: it is dropped, not overlapped.
        let line = status_line(12, "Score: 1", "New record!", "B");
        assert_eq!(line, "Score: 1   B");
    }

    #[test]
    fn test_new_record_notice_and_restart() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, 2);
        let mut shell = Shell::new(store, &quiet_settings(), 80, 25);
        assert_eq!(shell.game.best, 2);

        assert_eq!(shell.apply(Action::Flap), Control::NewGame);
        assert!(shell.game.running);
        shell.game.score = 5;
        shell.game.bird.y = CANVAS_HEIGHT;
        shell.tick(0.0);
        assert!(!shell.game.running);
        assert_eq!(shell.store.get(BEST_SCORE_KEY), Some(5));

        let status = shell.status();
        assert!(status.text.contains("New record! 5"));
        assert_eq!(status.fg, GOLD);

        assert_eq!(shell.apply(Action::Restart), Control::NewGame);
        assert!(shell.game.running);
        assert_eq!(shell.game.score, 0);
        assert_eq!(shell.game.best, 5);
        assert!(!shell.status().text.contains("New record!"));
    }

    #[test]
    fn test_restart_key_mid_game() {
        let mut shell = Shell::new(MemoryStore::new(), &quiet_settings(), 80, 25);
        shell.apply(Action::Flap);
        shell.game.score = 3;
        shell.game.bird.y = 100.0;
        assert_eq!(shell.apply(Action::Restart), Control::NewGame);
        assert!(shell.game.running);
        assert_eq!(shell.game.score, 0);
        assert_eq!(shell.game.bird.y, CANVAS_HEIGHT / 2.0);
        assert_eq!(shell.game.best, 0);
    }

    #[test]
    fn test_quit_and_resize() {
        let mut shell = Shell::new(MemoryStore::new(), &quiet_settings(), 80, 25);
        assert_eq!(shell.apply(Action::Resize(120, 50)), Control::Continue);
        assert_eq!(shell.cols, 120);
        assert_eq!(shell.frame.buf.width(), 120);
        assert_eq!(shell.apply(Action::Quit), Control::Quit);
    }

    #[test]
    fn test_draw_writes_status_row() {
        let mut shell = Shell::new(MemoryStore::new(), &quiet_settings(), 80, 25);
        let mut out = Vec::new();
        shell.draw(&mut out).unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("Score: 0"));
        assert!(s.contains("Best: 0"));
        assert!(s.contains("SKYFLAP"));
    }
}
