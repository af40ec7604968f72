//! Gameplay constants and runtime settings.
//!
//! Physics values are expressed per 60 Hz frame and scaled by the elapsed
//! time of each update, so the game plays the same at any frame rate.

use std::env;
use std::path::PathBuf;

// ── Canvas ──────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f64 = 360.0;
pub const CANVAS_HEIGHT: f64 = 640.0;

// ── Bird ────────────────────────────────────────────────────────────────────

pub const BIRD_X: f64 = 80.0;
pub const BIRD_RADIUS: f64 = 16.0;
pub const GRAVITY: f64 = 0.35;
pub const FLAP_VELOCITY: f64 = -6.5;

/// Radians of tilt per unit of vertical velocity.
pub const TILT_PER_VELOCITY: f64 = 0.1;
pub const TILT_MIN: f64 = -0.35;
pub const TILT_MAX: f64 = 0.5;

// ── Pipes ───────────────────────────────────────────────────────────────────

pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_GAP: f64 = 140.0;
pub const PIPE_MIN_HEIGHT: f64 = 60.0;
pub const PIPE_SPEED: f64 = 2.5;
pub const SPAWN_INTERVAL: u64 = 90;

// ── Timing ──────────────────────────────────────────────────────────────────

/// Reference frame length the per-frame constants above are tuned for.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Longest step handed to the simulation in one update.
pub const MAX_STEP_MS: f64 = 100.0;

/// Target host frame time (~30 fps).
pub const HOST_FRAME_MS: u64 = 33;

/// How long the "new record" notification stays on screen.
pub const NOTICE_MS: u64 = 1800;

// ── Storage ─────────────────────────────────────────────────────────────────

pub const BEST_SCORE_KEY: &str = "warp-best";

const APP_DIR: &str = "skyflap";

/// Settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub muted: bool,
    pub lang: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("SKYFLAP_DATA_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| env::temp_dir().join(APP_DIR));

        let muted = lookup("SKYFLAP_MUTE").is_some_and(|v| !v.is_empty() && v != "0");

        let lang = lookup("LC_ALL")
            .filter(|s| !s.is_empty())
            .or_else(|| lookup("LANG"))
            .unwrap_or_default();

        Settings {
            data_dir,
            muted,
            lang,
        }
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join("scores.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("skyflap.log")
    }
}
