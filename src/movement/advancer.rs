//! Per-frame consumption of a mobile's step queue: interpolates the sub-tile
//! offset towards the front step and commits it once its time is up.

use crate::config::MotionConfig;
use crate::entities::mobile::{Mobile, Offset};
use crate::movement::speed::{pixel_offset, time_to_complete_movement};
use crate::movement::walker::WalkerState;
use crate::telemetry::logging;
use crate::world::position::{Direction, Position};
use crate::world::time::GameTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementEvent {
    StepCommitted {
        position: Position,
        direction: Direction,
    },
    /// The front step could not be walked from the current tile and was
    /// applied as a snap.
    BadStep {
        from: Position,
        to: Position,
    },
    /// Committed step dropped the player by `height` Z units.
    Fell {
        height: i16,
    },
}

/// Advances `mobile` along its queued steps for the frame at `now`.
/// `walker` is the prediction ledger when `mobile` is the player.
pub fn process_steps(
    mobile: &mut Mobile,
    mut walker: Option<&mut WalkerState>,
    now: GameTick,
    config: &MotionConfig,
) -> Vec<MovementEvent> {
    let mut events = Vec::new();
    // Each pass either pops a step or stops.
    for _ in 0..mobile.steps.len() {
        let Some(step) = mobile.steps.front().copied() else {
            break;
        };
        if mobile.playback.is_from_server() {
            mobile.playback.clear();
        }

        let elapsed = now.millis_since(mobile.last_step_time);
        let max_delay = time_to_complete_movement(config, step.run, mobile.uses_fast_timings())
            .saturating_sub(config.frame_slack_ms);
        let destination = step.position();
        let turn_only = mobile.position.same_tile(destination);

        let mut bad_step = false;
        if !turn_only && mobile.offset.is_flat_zero() {
            let expected = mobile.position.step(step.direction);
            bad_step = !mobile.position.is_adjacent(destination)
                || !expected.is_some_and(|tile| tile.same_tile(destination));
        }

        if !bad_step && !turn_only && elapsed < max_delay {
            let anim_delay = config.character_animation_delay_ms.max(1) as f32;
            let frames_per_tile = max_delay as f32 / anim_delay;
            let progress = elapsed as f32 / anim_delay;
            let dz = f32::from(step.z) - f32::from(mobile.position.z);
            let (x, y) = pixel_offset(step.direction, progress, frames_per_tile);
            mobile.offset = Offset {
                x: x.trunc(),
                y: y.trunc(),
                z: (dz * progress * 4.0 / frames_per_tile).trunc(),
            };
            break;
        }

        let from = mobile.position;
        mobile.position = destination;
        mobile.direction = step.direction;
        mobile.running = step.run;
        mobile.offset = Offset::ZERO;
        mobile.steps.dequeue_front();
        mobile.idle_at = now.saturating_add_millis(config.idle_base_ms);

        if mobile.is_player {
            if let Some(walker) = walker.as_deref_mut() {
                walker.on_step_committed();
            }
        }

        if bad_step {
            logging::log_desync(&format!(
                "mobile {:#x}: bad step ({}, {}) -> ({}, {})",
                mobile.serial.0, from.x, from.y, destination.x, destination.y
            ));
            events.push(MovementEvent::BadStep {
                from,
                to: destination,
            });
        } else {
            events.push(MovementEvent::StepCommitted {
                position: destination,
                direction: step.direction,
            });
        }

        let fall = i16::from(from.z) - i16::from(destination.z);
        if mobile.is_player && fall >= config.fall_feedback_z {
            events.push(MovementEvent::Fell { height: fall });
        }

        if turn_only {
            continue;
        }
        mobile.last_step_time = now;
        break;
    }
    events
}
