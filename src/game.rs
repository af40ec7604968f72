//! Game state and the per-frame update.

use crate::config::*;
use crate::storage::ScoreStore;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Bird {
    fn new() -> Self {
        Bird {
            x: BIRD_X,
            y: CANVAS_HEIGHT / 2.0,
            vy: 0.0,
            radius: BIRD_RADIUS,
        }
    }

    /// Rotation for drawing, proportional to vertical velocity.
    pub fn tilt(&self) -> f64 {
        (self.vy * TILT_PER_VELOCITY).clamp(TILT_MIN, TILT_MAX)
    }

    fn out_of_bounds(&self) -> bool {
        self.y + self.radius >= CANVAS_HEIGHT || self.y - self.radius <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f64,
    /// Height of the top segment; the gap spans `top..top + PIPE_GAP`.
    pub top: f64,
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f64, top: f64) -> Self {
        Pipe {
            x,
            top,
            scored: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    pub fn bottom(&self) -> f64 {
        self.top + PIPE_GAP
    }

    /// Box test of the bird's bounding square against both segments.
    pub fn hits(&self, bird: &Bird) -> bool {
        let overlaps_x = bird.x + bird.radius > self.x && bird.x - bird.radius < self.right();
        overlaps_x && (bird.y - bird.radius < self.top || bird.y + bird.radius > self.bottom())
    }
}

/// What happened when the player flapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flap {
    Started,
    Flapped,
}

/// Report of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub best: u32,
    pub new_record: bool,
}

pub struct Game {
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub frame: u64,
    pub score: u32,
    pub best: u32,
    pub running: bool,
    /// False until the first game starts; drives the title screen.
    pub played: bool,
}

impl Game {
    /// A stopped game showing the title screen, with the best score loaded
    /// from `store`.
    pub fn new(store: &dyn ScoreStore) -> Self {
        Game {
            bird: Bird::new(),
            pipes: Vec::new(),
            frame: 0,
            score: 0,
            best: store.get(BEST_SCORE_KEY).unwrap_or(0),
            running: false,
            played: false,
        }
    }

    pub fn reset(&mut self) {
        self.bird = Bird::new();
        self.pipes.clear();
        self.frame = 0;
        self.score = 0;
        self.running = true;
        self.played = true;
        log::info!("game started (best {})", self.best);
    }

    pub fn flap(&mut self) -> Flap {
        if self.running {
            self.bird.vy = FLAP_VELOCITY;
            Flap::Flapped
        } else {
            self.reset();
            Flap::Started
        }
    }

    pub fn spawn_pipe<R: Rng>(&mut self, rng: &mut R) {
        let min_top = PIPE_MIN_HEIGHT as u32;
        let max_top = (CANVAS_HEIGHT - PIPE_GAP - PIPE_MIN_HEIGHT) as u32;
        let top = rng.gen_range(min_top..=max_top);
        self.pipes.push(Pipe::new(CANVAS_WIDTH, top as f64));
    }

    /// Advances the world by `dt_ms` milliseconds. Returns the report when
    /// this step ended the game.
    pub fn update<R: Rng>(
        &mut self,
        dt_ms: f64,
        rng: &mut R,
        store: &mut dyn ScoreStore,
    ) -> Option<GameOver> {
        if !self.running {
            return None;
        }

        if self.frame % SPAWN_INTERVAL == 0 {
            self.spawn_pipe(rng);
        }
        self.frame += 1;

        let k = dt_ms / FRAME_MS;
        self.bird.vy += GRAVITY * k;
        self.bird.y += self.bird.vy * k;

        // Pipes already past the left edge go before this frame's move.
        self.pipes.retain(|p| p.right() > 0.0);
        let bird_x = self.bird.x;
        for p in &mut self.pipes {
            p.x -= PIPE_SPEED * k;
            if !p.scored && p.right() < bird_x {
                p.scored = true;
                self.score += 1;
            }
        }

        if self.check_collision() {
            return Some(self.end_game(store));
        }
        None
    }

    pub fn check_collision(&self) -> bool {
        self.bird.out_of_bounds() || self.pipes.iter().any(|p| p.hits(&self.bird))
    }

    pub fn end_game(&mut self, store: &mut dyn ScoreStore) -> GameOver {
        self.running = false;
        let new_record = self.score > self.best;
        if new_record {
            self.best = self.score;
            store.set(BEST_SCORE_KEY, self.best);
            log::info!("new record: {}", self.best);
        }
        log::info!("game over after {} frames, score {}", self.frame, self.score);
        GameOver {
            score: self.score,
            best: self.best,
            new_record,
        }
    }
}
