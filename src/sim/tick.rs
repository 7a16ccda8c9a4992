//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame. The platform layer drives
//! this once per display refresh and clears one-shot inputs afterwards, so
//! each activate event produces exactly one flap (or one restart-then-flap).

use super::collision::overlaps;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Activate: flap while running, start/restart otherwise. Edge-triggered;
    /// the caller clears it after the tick consumes it.
    pub flap: bool,
}

/// Observable outcomes of a tick, for the platform layer to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A pipe was passed; carries the new total
    Scored { total: u32 },
    /// The run ended this tick; carries the final score. Emitted exactly
    /// once per Running -> Over transition.
    GameOver { score: u32 },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, pace: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Idle | GamePhase::Over => {
            // Waiting for input. On activate, reset and flap immediately;
            // the world first moves on the next tick.
            if input.flap {
                state.start_run();
                state.bird.flap(pace);
            }
            return events;
        }
        GamePhase::Running => {}
    }

    if input.flap {
        state.bird.flap(pace);
    }

    state.time_ticks += 1;
    state.bird.update(pace);

    // Boundary breach ends the run before any pipe moves
    if state.bird.out_of_bounds() {
        state.phase = GamePhase::Over;
        events.push(GameEvent::GameOver {
            score: state.score,
        });
        return events;
    }

    let bird_rect = state.bird.collision_rect();
    let bird_x = state.bird.pos.x;
    let mut collided = false;

    // Each pipe is advanced first, then tested with its just-updated rects.
    // A hit does not stop the sweep: remaining pipes still advance and can
    // still score this tick.
    for pipe in &mut state.pipes {
        pipe.advance(pace);

        if overlaps(&bird_rect, &pipe.top_rect()) || overlaps(&bird_rect, &pipe.bottom_rect()) {
            collided = true;
        }

        if !pipe.passed && pipe.x < bird_x {
            pipe.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored {
                total: state.score,
            });
        }
    }

    state.pipes.retain(|p| !p.is_offscreen());

    if collided {
        state.phase = GamePhase::Over;
        events.push(GameEvent::GameOver {
            score: state.score,
        });
        return events;
    }

    // Keep the pipe train fed: spawn once the newest pipe is far enough in,
    // or whenever the playfield is empty
    let needs_spawn = match state.pipes.last() {
        None => true,
        Some(last) => last.x < SCREEN_WIDTH - PIPE_SPAWN_INTERVAL,
    };
    if needs_spawn {
        state.spawn_pipe();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Pipe;

    const PACE: f32 = PACE_MULTIPLIER;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run();
        state
    }

    fn idle_tick() -> TickInput {
        TickInput { flap: false }
    }

    fn flap_tick() -> TickInput {
        TickInput { flap: true }
    }

    #[test]
    fn test_idle_ignores_plain_ticks() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            let events = tick(&mut state, &idle_tick(), PACE);
            assert!(events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_first_input_starts_run_with_one_pipe() {
        let mut state = GameState::new(1);
        tick(&mut state, &flap_tick(), PACE);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, SCREEN_WIDTH + PIPE_SPAWN_INTERVAL);
        // Flap applied immediately on the start tick
        assert_eq!(state.bird.vel, -JUMP * PACE);
    }

    #[test]
    fn test_flap_while_running_only_flaps() {
        let mut state = running_state(1);
        let pipes_before = state.pipes.len();
        let score_before = state.score;
        tick(&mut state, &flap_tick(), PACE);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, score_before);
        assert_eq!(state.pipes.len(), pipes_before);
        // Velocity was overridden, then one gravity step applied
        assert!((state.bird.vel - (-JUMP * PACE + GRAVITY * PACE)).abs() < 1e-6);
    }

    #[test]
    fn test_empty_collection_spawns_exactly_one_pipe() {
        let mut state = running_state(1);
        state.pipes.clear();
        state.bird.flap(PACE); // keep airborne for the tick

        tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, SCREEN_WIDTH + PIPE_SPAWN_INTERVAL);
    }

    #[test]
    fn test_spawn_when_last_pipe_retreats_past_interval() {
        let mut state = running_state(1);
        state.bird.flap(PACE);
        state.pipes[0].x = SCREEN_WIDTH - PIPE_SPAWN_INTERVAL + PIPE_SPEED * PACE;

        // Not yet past the threshold after this advance
        tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.pipes.len(), 1);

        state.bird.flap(PACE);
        tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_score_increments_once_per_pass() {
        let mut state = running_state(1);
        state.bird.flap(PACE);
        state.pipes[0].x = state.bird.pos.x + 1.0;
        state.pipes[0].gap_offset = 250; // keep the gap clear of the bird

        // Advance enough ticks to cross under the bird's x
        let mut scored = 0;
        for _ in 0..5 {
            state.bird.flap(PACE);
            let events = tick(&mut state, &idle_tick(), PACE);
            scored += events
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count();
        }

        assert_eq!(scored, 1);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);
    }

    #[test]
    fn test_offscreen_pipe_pruned_on_its_tick() {
        let mut state = running_state(1);
        state.bird.flap(PACE);
        state.pipes[0].passed = true;
        state.pipes[0].x = OFFSCREEN_THRESHOLD + PIPE_SPEED * PACE - 0.1;

        tick(&mut state, &idle_tick(), PACE);
        assert!(state.pipes.iter().all(|p| !p.is_offscreen()));
        assert!(state.pipes.iter().all(|p| p.x > OFFSCREEN_THRESHOLD));
    }

    #[test]
    fn test_floor_breach_ends_run_with_one_event() {
        let mut state = running_state(1);
        state.score = 3;
        state.bird.pos.y = SCREEN_HEIGHT - BIRD_HEIGHT; // next tick falls past

        let mut game_overs = 0;
        for _ in 0..3 {
            let events = tick(&mut state, &idle_tick(), PACE);
            game_overs += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { score: 3 }))
                .count();
        }

        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_ceiling_breach_ends_run() {
        let mut state = running_state(1);
        state.bird.pos.y = 0.5;
        state.bird.vel = -JUMP; // rising fast enough to cross zero

        let events = tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_barrier_collision_ends_run() {
        let mut state = running_state(1);
        state.bird.flap(PACE);
        // Park a pipe on top of the bird with the gap far away
        state.pipes[0].x = state.bird.pos.x;
        state.pipes[0].gap_offset = 400;

        let events = tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_bird_clears_the_gap_without_collision() {
        let mut state = running_state(1);
        // Center the bird inside the gap of a pipe sitting on it
        state.pipes[0].x = state.bird.pos.x;
        state.pipes[0].gap_offset = 250;
        state.bird.pos.y = 330.0; // inside [250, 450) gap
        state.bird.vel = 0.0;

        let events = tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_restart_from_over_resets_everything() {
        let mut state = running_state(1);
        state.score = 9;
        state.bird.pos.y = SCREEN_HEIGHT; // force a breach
        tick(&mut state, &idle_tick(), PACE);
        assert_eq!(state.phase, GamePhase::Over);

        tick(&mut state, &flap_tick(), PACE);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.bird.pos.y, SCREEN_HEIGHT / 2.0);
        assert_eq!(state.bird.vel, -JUMP * PACE);
    }

    #[test]
    fn test_score_never_decreases_over_a_run() {
        let mut state = running_state(99);
        let mut last_score = 0;

        // Naive autopilot: flap whenever sinking below the next gap center
        for _ in 0..2000 {
            if state.phase != GamePhase::Running {
                break;
            }
            let target = state
                .pipes
                .iter()
                .find(|p| !p.passed)
                .map(|p| p.gap_offset as f32 + PIPE_GAP / 2.0)
                .unwrap_or(SCREEN_HEIGHT / 2.0);
            let input = TickInput {
                flap: state.bird.pos.y + BIRD_HEIGHT / 2.0 > target,
            };
            tick(&mut state, &input, PACE);
            assert!(state.score >= last_score);
            last_score = state.score;
        }
    }

    #[test]
    fn test_pruned_pipe_never_reappears() {
        let mut state = running_state(5);
        state.bird.flap(PACE);
        state.pipes[0].x = OFFSCREEN_THRESHOLD + 1.0;
        state.pipes[0].passed = true;
        let doomed_offset = state.pipes[0].gap_offset;
        state.pipes.push(Pipe {
            x: SCREEN_WIDTH,
            gap_offset: 123,
            passed: false,
        });

        for _ in 0..3 {
            state.bird.flap(PACE);
            tick(&mut state, &idle_tick(), PACE);
        }
        assert!(
            !state
                .pipes
                .iter()
                .any(|p| p.gap_offset == doomed_offset && p.passed)
        );
    }
}
