use crate::config::MotionConfig;
use crate::world::position::Direction;

/// Time to walk one tile, in milliseconds.
pub fn time_to_complete_movement(config: &MotionConfig, run: bool, mounted: bool) -> u64 {
    match (mounted, run) {
        (true, true) => config.step_delay_mount_run_ms,
        (true, false) => config.step_delay_mount_walk_ms,
        (false, true) => config.step_delay_run_ms,
        (false, false) => config.step_delay_walk_ms,
    }
}

/// Screen-space pixel offset for a mobile `progress` animation frames into a
/// step towards `direction`, where a full tile takes `frames_per_tile` frames.
///
/// Tiles are 44x44 diamonds: cardinal map directions slide along a screen
/// diagonal (22 px on each axis), the map diagonals slide along a single
/// screen axis (44 px). Results are clamped to one tile.
pub fn pixel_offset(direction: Direction, progress: f32, frames_per_tile: f32) -> (f32, f32) {
    let frames = if frames_per_tile > 0.0 { frames_per_tile } else { 1.0 };
    let half = 22.0 / frames;
    let full = 44.0 / frames;
    let (x, y, limit_x, limit_y) = match direction {
        Direction::North => (progress * half, -progress * half, 22.0, 22.0),
        Direction::Northeast => (progress * full, 0.0, 44.0, 22.0),
        Direction::East => (progress * half, progress * half, 22.0, 22.0),
        Direction::Southeast => (0.0, progress * full, 22.0, 44.0),
        Direction::South => (-progress * half, progress * half, 22.0, 22.0),
        Direction::Southwest => (-progress * full, 0.0, 44.0, 22.0),
        Direction::West => (-progress * half, -progress * half, 22.0, 22.0),
        Direction::Northwest => (0.0, -progress * full, 22.0, 44.0),
    };
    (clamp_pixels(x, limit_x), clamp_pixels(y, limit_y))
}

fn clamp_pixels(value: f32, limit: f32) -> f32 {
    let whole = value.trunc();
    if whole.abs() > limit {
        limit.copysign(whole)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_follow_mount_and_run() {
        let config = MotionConfig::default();
        assert_eq!(time_to_complete_movement(&config, false, false), 400);
        assert_eq!(time_to_complete_movement(&config, true, false), 200);
        assert_eq!(time_to_complete_movement(&config, false, true), 200);
        assert_eq!(time_to_complete_movement(&config, true, true), 100);
    }

    #[test]
    fn half_step_north_moves_up_right_on_screen() {
        let (x, y) = pixel_offset(Direction::North, 1.0, 2.0);
        assert_eq!((x, y), (11.0, -11.0));
    }

    #[test]
    fn diagonal_map_steps_use_one_screen_axis() {
        let (x, y) = pixel_offset(Direction::Northeast, 1.0, 4.0);
        assert_eq!((x, y), (11.0, 0.0));
        let (x, y) = pixel_offset(Direction::Northwest, 1.0, 4.0);
        assert_eq!((x, y), (0.0, -11.0));
    }

    #[test]
    fn overshoot_is_clamped_to_one_tile() {
        for direction in Direction::ALL {
            let (x, y) = pixel_offset(direction, 10.0, 1.0);
            assert!(x.abs() <= 44.0 && y.abs() <= 44.0, "{direction:?}");
            if !direction.is_diagonal() {
                assert_eq!((x.abs(), y.abs()), (22.0, 22.0), "{direction:?}");
            }
        }
    }
}
