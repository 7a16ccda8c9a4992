//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; there are no globals. The
//! RNG is a seeded Pcg32 owned by the state so a run is reproducible from
//! its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh session, waiting for the first input
    Idle,
    /// Active run
    Running,
    /// Run ended, waiting for input to restart
    Over,
}

/// The player-controlled bird
///
/// x is fixed; gravity and flap impulses act on y only. The tilt angle is a
/// purely visual value derived from the velocity sign each tick, bounded to
/// ±[`TILT_MAX`] degrees.
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity, positive downward
    pub vel: f32,
    /// Tilt in degrees, positive nose-up
    pub tilt: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_START_X, SCREEN_HEIGHT / 2.0),
            vel: 0.0,
            tilt: 0.0,
        }
    }
}

impl Bird {
    /// Advance one tick: integrate gravity, then move the tilt one step
    /// toward its bound based on the velocity sign
    pub fn update(&mut self, pace: f32) {
        self.vel += GRAVITY * pace;
        self.pos.y += self.vel * pace;

        if self.vel < 0.0 {
            self.tilt = (self.tilt + TILT_STEP).min(TILT_MAX);
        } else {
            self.tilt = (self.tilt - TILT_STEP).max(-TILT_MAX);
        }
    }

    /// Apply a flap impulse, overriding (not adding to) the current velocity
    pub fn flap(&mut self, pace: f32) {
        self.vel = -JUMP * pace;
    }

    /// Body rect used for collision, inset from the sprite bounds
    ///
    /// Always derived from the current position; never stored.
    pub fn collision_rect(&self) -> Rect {
        Rect::new(
            self.pos.x + BIRD_RECT_INSET,
            self.pos.y + BIRD_RECT_INSET,
            BIRD_WIDTH - 2.0 * BIRD_RECT_INSET,
            BIRD_HEIGHT - 2.0 * BIRD_RECT_INSET,
        )
    }

    /// True once the sprite has left the vertical playfield bounds
    pub fn out_of_bounds(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT - BIRD_HEIGHT || self.pos.y < 0.0
    }
}

/// A scrolling paired-barrier obstacle
#[derive(Debug, Clone, Copy)]
pub struct Pipe {
    /// Left edge; decreases every tick
    pub x: f32,
    /// Top of the passable gap, fixed at construction
    pub gap_offset: i32,
    /// Latched true once the bird's x has cleared this pipe
    pub passed: bool,
}

impl Pipe {
    /// Spawn at `x` with a gap offset drawn uniformly from the configured
    /// range
    pub fn new(x: f32, rng: &mut Pcg32) -> Self {
        Self {
            x,
            gap_offset: rng.random_range(GAP_OFFSET_MIN..=GAP_OFFSET_MAX),
            passed: false,
        }
    }

    /// Scroll left one tick
    pub fn advance(&mut self, pace: f32) {
        self.x -= PIPE_SPEED * pace;
    }

    /// Collision rect of the upper barrier, inset from the drawn bounds
    pub fn top_rect(&self) -> Rect {
        Rect::new(
            self.x + PIPE_RECT_INSET,
            self.gap_offset as f32 - PIPE_HEIGHT + PIPE_RECT_INSET,
            PIPE_WIDTH - 2.0 * PIPE_RECT_INSET,
            PIPE_HEIGHT - 2.0 * PIPE_RECT_INSET,
        )
    }

    /// Collision rect of the lower barrier
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x + PIPE_RECT_INSET,
            self.gap_offset as f32 + PIPE_GAP + PIPE_RECT_INSET,
            PIPE_WIDTH - 2.0 * PIPE_RECT_INSET,
            PIPE_HEIGHT - 2.0 * PIPE_RECT_INSET,
        )
    }

    /// True once the pipe has scrolled past the prune threshold
    pub fn is_offscreen(&self) -> bool {
        self.x < OFFSCREEN_THRESHOLD
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The player
    pub bird: Bird,
    /// Active pipes, in spawn order (also left-to-right order: all pipes
    /// scroll at the same speed)
    pub pipes: Vec<Pipe>,
    /// Pipes passed this run; monotonically increasing
    pub score: u32,
    /// Ticks elapsed while running
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh session with the given seed, waiting for input
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset into a running state: fresh bird, one pipe just past the right
    /// edge, score cleared
    ///
    /// Used for both the first start (Idle) and restarts (Over).
    pub fn start_run(&mut self) {
        self.bird = Bird::default();
        self.pipes.clear();
        self.score = 0;
        self.phase = GamePhase::Running;
        self.spawn_pipe();
    }

    /// Push a new pipe at the fixed lead offset beyond the right edge
    pub fn spawn_pipe(&mut self) {
        let pipe = Pipe::new(SCREEN_WIDTH + PIPE_SPAWN_INTERVAL, &mut self.rng);
        self.pipes.push(pipe);
    }
}
