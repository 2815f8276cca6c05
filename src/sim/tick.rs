//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one tick per
//! rendered frame.

use super::collision::first_contact;
use super::state::{CrashCause, GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (space); ignored after game over
    pub jump: bool,
    /// Start a new run (R); ignored while running
    pub restart: bool,
}

/// Result of a tick
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Set on the tick the run ended
    pub crash: Option<CrashCause>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    let mut result = TickResult::default();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        result.events = state.take_events();
        return result;
    }

    state.time_ticks += 1;

    if input.jump {
        state.bird.jump(state.settings.jump_strength);
        state.push_event(GameEvent::Flapped);
    }

    if let Some(obstacle) =
        state
            .spawner
            .try_spawn(state.time_ticks, &state.settings, state.shapes.as_ref())
    {
        state.push_event(GameEvent::ObstacleSpawned {
            id: obstacle.id,
            kind: obstacle.kind,
            gap_top: obstacle.gap_top,
        });
        state.obstacles.push(obstacle);
    }

    // Physics
    state.bird.update(state.settings.gravity);
    let speed = state.settings.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.update(speed);
    }

    // Retire obstacles that have fully left the screen
    let mut retired = Vec::new();
    state.obstacles.retain(|o| {
        let off = o.is_off_screen();
        if off {
            retired.push(o.id);
        }
        !off
    });
    for id in retired {
        log::debug!("Retired obstacle {} at tick {}", id, state.time_ticks);
        state.push_event(GameEvent::ObstacleRetired { id });
    }

    let crash = check_crash(state);

    if let Some(cause) = crash {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: {:?} (score {})",
            state.time_ticks,
            cause,
            state.display_score()
        );
        state.push_event(GameEvent::Crashed { cause });
        result.crash = Some(cause);
    } else {
        state.score += 1;
    }

    result.events = state.take_events();
    result
}

/// Obstacle hits first, then the ceiling and floor
fn check_crash(state: &GameState) -> Option<CrashCause> {
    let bird = &state.bird;
    for obstacle in &state.obstacles {
        if let Some(contact) = first_contact(bird, obstacle) {
            return Some(CrashCause::Obstacle {
                id: obstacle.id,
                side: contact.side,
                point: contact.point,
            });
        }
    }

    if bird.rect.top() <= 0 {
        Some(CrashCause::Ceiling)
    } else if bird.rect.bottom() >= state.settings.play_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}
