//! Pipe Dash - a gravity-and-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `notify`: Game-over score notification (injected capability)
//!
//! Rendering and input wiring live in the platform layer (`main.rs`); the
//! simulation never touches the browser or the clock.

pub mod notify;
pub mod sim;

pub use notify::{LogNotifier, NotifyConfig, ScoreNotifier};

/// Game configuration constants
///
/// All tuning is fixed at compile time; nothing here is runtime-configurable.
pub mod consts {
    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Pipe sprite dimensions (one barrier of the pair)
    pub const PIPE_WIDTH: f32 = 100.0;
    pub const PIPE_HEIGHT: f32 = 400.0;
    /// Vertical opening between the upper and lower barriers
    pub const PIPE_GAP: f32 = 200.0;
    /// Horizontal scroll speed, pixels per tick before pacing
    pub const PIPE_SPEED: f32 = 5.0;
    /// A new pipe spawns once the last one has scrolled this far in
    pub const PIPE_SPAWN_INTERVAL: f32 = 150.0;
    /// Pipes are pruned once their x drops below this
    pub const OFFSCREEN_THRESHOLD: f32 = -200.0;
    /// Gap offset is drawn uniformly from this inclusive range. Combined
    /// with PIPE_GAP and PIPE_HEIGHT the extremes let a barrier hang partly
    /// off the top or bottom edge; this is deliberate and not clamped.
    pub const GAP_OFFSET_MIN: i32 = 100;
    pub const GAP_OFFSET_MAX: i32 = 400;
    /// Collision rects are inset from the drawn barrier by this much per side
    pub const PIPE_RECT_INSET: f32 = 3.0;

    /// Bird sprite dimensions
    pub const BIRD_WIDTH: f32 = 60.0;
    pub const BIRD_HEIGHT: f32 = 40.0;
    /// The bird never moves horizontally
    pub const BIRD_START_X: f32 = 50.0;
    /// Collision rect inset from the sprite, per side
    pub const BIRD_RECT_INSET: f32 = 5.0;

    /// Downward acceleration per tick before pacing
    pub const GRAVITY: f32 = 0.4;
    /// Flap impulse magnitude before pacing
    pub const JUMP: f32 = 12.0;
    /// Tilt moves this many degrees per tick toward its bound
    pub const TILT_STEP: f32 = 3.0;
    /// Tilt is clamped to [-TILT_MAX, TILT_MAX] degrees
    pub const TILT_MAX: f32 = 25.0;

    /// Uniform slowdown applied to all motion
    pub const PACE_MULTIPLIER: f32 = 0.6;
    /// Target display refresh rate; one tick per frame
    pub const FPS: u32 = 60;
}
