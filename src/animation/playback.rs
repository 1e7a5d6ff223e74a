//! Frame advance for one mobile.
//!
//! A mobile is either following its movement state (`Idle` / `Locomotion`,
//! group resolved fresh every frame) or playing a directed animation that
//! the server or the idle picker asked for (`Playing`). A directed animation
//! that runs out of cycles reports `Exhausted` once and the mobile falls
//! back to its movement state.

use crate::world::time::GameTick;

/// "No directed group": resolve from the movement state.
pub const NO_GROUP: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOrigin {
    Server,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectedAnimation {
    pub group: u8,
    pub origin: AnimationOrigin,
    /// Frames per cycle; 0 takes the count from the animation data.
    pub frame_count: u16,
    /// Cycles to play when `repeat` is set; 0 loops until cancelled.
    pub repeat_count: u16,
    pub repeat: bool,
    pub forward: bool,
    /// Extra frame delays between frames.
    pub interval: u8,
}

impl DirectedAnimation {
    pub fn once(group: u8, origin: AnimationOrigin) -> Self {
        Self {
            group,
            origin,
            frame_count: 0,
            repeat_count: 1,
            repeat: false,
            forward: true,
            interval: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Locomotion,
    Playing,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    directed: Option<DirectedAnimation>,
    cycles_left: u16,
    /// Negative means "start from the last frame" for backward playback.
    frame: i32,
    next_frame_at: GameTick,
}

const START_AT_END: i32 = -1;

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Self {
            directed: None,
            cycles_left: 0,
            frame: 0,
            next_frame_at: GameTick(0),
        }
    }

    pub fn start(&mut self, animation: DirectedAnimation, now: GameTick) {
        self.frame = if animation.forward { 0 } else { START_AT_END };
        self.cycles_left = animation.repeat_count;
        self.directed = Some(animation);
        self.next_frame_at = now;
    }

    /// Drops any directed animation; the next resolution follows movement.
    pub fn clear(&mut self) {
        self.directed = None;
        self.cycles_left = 0;
    }

    pub fn directed(&self) -> Option<&DirectedAnimation> {
        self.directed.as_ref()
    }

    pub fn directed_group(&self) -> u8 {
        self.directed.map(|anim| anim.group).unwrap_or(NO_GROUP)
    }

    pub fn is_from_server(&self) -> bool {
        matches!(
            self.directed,
            Some(DirectedAnimation {
                origin: AnimationOrigin::Server,
                ..
            })
        )
    }

    pub fn phase(&self, walking: bool) -> PlaybackPhase {
        match (self.directed.is_some(), walking) {
            (true, _) => PlaybackPhase::Playing,
            (false, true) => PlaybackPhase::Locomotion,
            (false, false) => PlaybackPhase::Idle,
        }
    }

    /// Frame to draw for a group with `available` frames.
    pub fn current_frame(&self, available: u16) -> u16 {
        let count = self.cycle_length(available);
        if count == 0 {
            return 0;
        }
        if self.frame < 0 {
            return count - 1;
        }
        (self.frame as u32 % u32::from(count)) as u16
    }

    pub fn is_due(&self, now: GameTick) -> bool {
        now >= self.next_frame_at
    }

    /// Moves one frame when due. `available` is the frame count of the group
    /// currently resolved for the mobile; `base_delay_ms` the per-frame delay.
    pub fn advance(&mut self, now: GameTick, available: u16, base_delay_ms: u64) -> PlaybackPhase {
        if !self.is_due(now) {
            return self.phase(false);
        }
        let Some(animation) = self.directed else {
            self.frame = if available == 0 {
                0
            } else {
                (self.current_frame(available) as i32 + 1) % i32::from(available)
            };
            self.next_frame_at = now.saturating_add_millis(base_delay_ms);
            return PlaybackPhase::Idle;
        };

        let delay = base_delay_ms.saturating_mul(u64::from(animation.interval) + 1);
        self.next_frame_at = now.saturating_add_millis(delay);
        let count = self.cycle_length(available);
        if count == 0 {
            return self.finish_cycle(animation);
        }
        let current = self.current_frame(available);
        if animation.forward {
            if current + 1 >= count {
                return self.finish_cycle(animation);
            }
            self.frame = i32::from(current) + 1;
        } else {
            if current == 0 {
                return self.finish_cycle(animation);
            }
            self.frame = i32::from(current) - 1;
        }
        PlaybackPhase::Playing
    }

    fn finish_cycle(&mut self, animation: DirectedAnimation) -> PlaybackPhase {
        if animation.repeat {
            if animation.repeat_count == 0 {
                self.frame = self.restart_frame(animation);
                return PlaybackPhase::Playing;
            }
            self.cycles_left = self.cycles_left.saturating_sub(1);
            if self.cycles_left > 0 {
                self.frame = self.restart_frame(animation);
                return PlaybackPhase::Playing;
            }
        }
        self.directed = None;
        self.cycles_left = 0;
        self.frame = 0;
        PlaybackPhase::Exhausted
    }

    fn restart_frame(&self, animation: DirectedAnimation) -> i32 {
        if animation.forward {
            0
        } else {
            START_AT_END
        }
    }

    fn cycle_length(&self, available: u16) -> u16 {
        match self.directed {
            Some(animation) if animation.frame_count != 0 => animation.frame_count,
            _ => available,
        }
    }
}
