use std::time::Duration;

/// Milliseconds since the simulation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GameTick(pub u64);

impl GameTick {
    pub fn saturating_add_millis(self, millis: u64) -> Self {
        GameTick(self.0.saturating_add(millis))
    }

    pub fn millis_since(self, earlier: GameTick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Frame clock driven by the host loop. Every mobile reads the same `now`
/// within one frame.
#[derive(Debug, Clone)]
pub struct GameClock {
    tick: GameTick,
    last_frame: Duration,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            tick: GameTick(0),
            last_frame: Duration::ZERO,
        }
    }

    pub fn now(&self) -> GameTick {
        self.tick
    }

    /// Length of the most recent frame step.
    pub fn last_frame(&self) -> Duration {
        self.last_frame
    }

    pub fn advance_millis(&mut self, millis: u64) -> GameTick {
        self.tick = self.tick.saturating_add_millis(millis);
        self.last_frame = Duration::from_millis(millis);
        self.tick
    }

    pub fn advance_duration(&mut self, duration: Duration) -> GameTick {
        let millis = duration.as_millis().min(u128::from(u64::MAX)) as u64;
        self.advance_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_and_records_frame_length() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance_millis(16), GameTick(16));
        assert_eq!(clock.advance_duration(Duration::from_millis(34)), GameTick(50));
        assert_eq!(clock.last_frame(), Duration::from_millis(34));
    }

    #[test]
    fn millis_since_saturates() {
        assert_eq!(GameTick(5).millis_since(GameTick(10)), 0);
        assert_eq!(GameTick(10).millis_since(GameTick(4)), 6);
    }
}
