use crate::config::MotionConfig;
use crate::entities::mobile::Mobile;
use crate::movement::step_queue::Step;
use crate::telemetry::logging;
use crate::world::position::{Direction, Position};
use crate::world::time::GameTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteMove {
    /// Same tile and facing as already queued.
    Ignored,
    /// Steps appended to the queue.
    Enqueued(usize),
    /// Placed directly at the reported position.
    Teleported,
}

/// Queues the steps that take a server-driven mobile from where it will be
/// to the reported `position` and `direction`.
pub fn enqueue_remote_move(
    mobile: &mut Mobile,
    position: Position,
    direction: Direction,
    run: bool,
    now: GameTick,
    config: &MotionConfig,
) -> RemoteMove {
    let (tail, tail_direction) = mobile.queue_tail();
    if tail == position && tail_direction == direction {
        return RemoteMove::Ignored;
    }

    if mobile.steps.is_empty() {
        if !mobile.is_walking(now, config) {
            mobile.playback.clear();
        }
        mobile.last_step_time = now;
    }

    let mut steps = Vec::with_capacity(3);
    match tail.direction_to(position) {
        Some(moving) => {
            if moving != tail_direction {
                steps.push(Step::new(tail, moving, run));
            }
            steps.push(Step::new(position, moving, run));
            if direction != moving {
                steps.push(Step::new(position, direction, run));
            }
        }
        None => steps.push(Step::new(position, direction, run)),
    }

    let z_jump = (i16::from(position.z) - i16::from(tail.z)).abs();
    let room = mobile.steps.capacity() - mobile.steps.len();
    if mobile.steps.is_full() || steps.len() > room || z_jump >= config.teleport_z_threshold {
        logging::log_desync(&format!(
            "mobile {:#x}: teleported to ({}, {}, {}) (queued {}, z jump {})",
            mobile.serial.0,
            position.x,
            position.y,
            position.z,
            mobile.steps.len(),
            z_jump
        ));
        mobile.teleport(position, direction);
        mobile.running = run;
        return RemoteMove::Teleported;
    }

    let count = steps.len();
    for step in steps {
        if !mobile.steps.enqueue(step) {
            break;
        }
    }
    RemoteMove::Enqueued(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::playback::{AnimationOrigin, DirectedAnimation};
    use crate::entities::mobile::Serial;

    fn npc() -> Mobile {
        Mobile::new(Serial(0x42), 0x00E1, Position::new(10, 10, 0), &MotionConfig::default())
    }

    fn queued(mobile: &Mobile) -> Vec<(Position, Direction)> {
        mobile
            .steps
            .iter()
            .map(|step| (step.position(), step.direction))
            .collect()
    }

    #[test]
    fn repeated_position_is_ignored() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(10, 10, 0),
            Direction::North,
            false,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Ignored);
        assert!(mobile.steps.is_empty());
    }

    #[test]
    fn turn_move_and_face_steps() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(11, 10, 0),
            Direction::South,
            false,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Enqueued(3));
        assert_eq!(
            queued(&mobile),
            vec![
                (Position::new(10, 10, 0), Direction::East),
                (Position::new(11, 10, 0), Direction::East),
                (Position::new(11, 10, 0), Direction::South),
            ]
        );
        assert_eq!(mobile.last_step_time, GameTick(100));
    }

    #[test]
    fn straight_move_is_a_single_step() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(10, 9, 0),
            Direction::North,
            true,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Enqueued(1));
        let second = enqueue_remote_move(
            &mut mobile,
            Position::new(10, 8, 0),
            Direction::North,
            true,
            GameTick(150),
            &config,
        );
        assert_eq!(second, RemoteMove::Enqueued(1));
        assert_eq!(mobile.last_step_time, GameTick(100));
    }

    #[test]
    fn facing_change_in_place() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(10, 10, 0),
            Direction::West,
            false,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Enqueued(1));
        assert_eq!(queued(&mobile), vec![(Position::new(10, 10, 0), Direction::West)]);
    }

    #[test]
    fn big_z_jump_teleports() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(10, 9, 25),
            Direction::North,
            false,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Teleported);
        assert_eq!(mobile.position, Position::new(10, 9, 25));
        assert!(mobile.steps.is_empty());
    }

    #[test]
    fn full_queue_teleports() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        for y in (5..10).rev() {
            enqueue_remote_move(
                &mut mobile,
                Position::new(10, y, 0),
                Direction::North,
                false,
                GameTick(100),
                &config,
            );
        }
        assert!(mobile.steps.is_full());
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(10, 4, 0),
            Direction::North,
            false,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Teleported);
        assert_eq!(mobile.position, Position::new(10, 4, 0));
        assert!(mobile.steps.is_empty());
    }

    #[test]
    fn distant_report_is_still_queued() {
        let config = MotionConfig::default();
        let mut mobile = npc().with_direction(Direction::East);
        let result = enqueue_remote_move(
            &mut mobile,
            Position::new(13, 10, 0),
            Direction::East,
            false,
            GameTick(100),
            &config,
        );
        assert_eq!(result, RemoteMove::Enqueued(1));
        assert_eq!(queued(&mobile), vec![(Position::new(13, 10, 0), Direction::East)]);
    }

    #[test]
    fn idle_mobile_drops_directed_animation() {
        let config = MotionConfig::default();
        let mut mobile = npc();
        mobile
            .playback
            .start(DirectedAnimation::once(9, AnimationOrigin::Idle), GameTick(0));
        enqueue_remote_move(
            &mut mobile,
            Position::new(10, 9, 0),
            Direction::North,
            false,
            GameTick(5_000),
            &config,
        );
        assert!(mobile.playback.directed().is_none());
    }
}
