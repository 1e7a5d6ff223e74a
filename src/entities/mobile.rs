use crate::animation::playback::Playback;
use crate::animation::resolver::AnimationContext;
use crate::config::MotionConfig;
use crate::entities::equipment::Equipment;
use crate::movement::step_queue::StepQueue;
use crate::world::position::{Direction, Position};
use crate::world::time::GameTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Serial(pub u32);

/// Sub-tile drawing offset in pixels while a step is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn is_flat_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMode {
    #[default]
    Normal,
    /// Server-granted fast movement; steps use mounted timings.
    Fast,
    /// Running is not allowed.
    CantRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileStatus {
    pub war_mode: bool,
    pub dead: bool,
    pub flying: bool,
    pub hidden: bool,
    pub paralyzed: bool,
    pub gargoyle: bool,
    pub speed_mode: SpeedMode,
    pub stamina: u16,
}

impl Default for MobileStatus {
    fn default() -> Self {
        Self {
            war_mode: false,
            dead: false,
            flying: false,
            hidden: false,
            paralyzed: false,
            gargoyle: false,
            speed_mode: SpeedMode::Normal,
            stamina: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mobile {
    pub serial: Serial,
    pub body: u16,
    pub is_player: bool,
    pub position: Position,
    pub direction: Direction,
    pub offset: Offset,
    pub running: bool,
    pub last_step_time: GameTick,
    pub steps: StepQueue,
    pub equipment: Equipment,
    pub status: MobileStatus,
    pub playback: Playback,
    pub idle_at: GameTick,
    pub destroyed: bool,
}

impl Mobile {
    pub fn new(serial: Serial, body: u16, position: Position, config: &MotionConfig) -> Self {
        Self {
            serial,
            body,
            is_player: false,
            position,
            direction: Direction::North,
            offset: Offset::ZERO,
            running: false,
            last_step_time: GameTick(0),
            steps: StepQueue::new(config.max_step_count),
            equipment: Equipment::new(),
            status: MobileStatus::default(),
            playback: Playback::new(),
            idle_at: GameTick(config.idle_base_ms),
            destroyed: false,
        }
    }

    pub fn player(serial: Serial, body: u16, position: Position, config: &MotionConfig) -> Self {
        let mut mobile = Self::new(serial, body, position, config);
        mobile.is_player = true;
        mobile
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn is_mounted(&self) -> bool {
        self.equipment.is_mounted()
    }

    /// Mounted, flying and fast mobiles use the mounted step timings.
    pub fn uses_fast_timings(&self) -> bool {
        self.is_mounted() || self.status.flying || self.status.speed_mode == SpeedMode::Fast
    }

    /// True while the last committed step is recent enough to keep the walk
    /// cycle going between steps.
    pub fn is_walking(&self, now: GameTick, config: &MotionConfig) -> bool {
        let window = if self.is_player {
            config.player_walking_delay_ms
        } else {
            config.walking_delay_ms
        };
        now.millis_since(self.last_step_time) < window && self.last_step_time.0 != 0
    }

    /// Empties the step queue and zeroes the sub-tile offset together so a
    /// half-walked mobile never snaps mid-tile.
    pub fn clear_steps(&mut self) {
        self.steps.clear();
        self.offset = Offset::ZERO;
    }

    /// Places the mobile without interpolation.
    pub fn teleport(&mut self, position: Position, direction: Direction) {
        self.clear_steps();
        self.position = position;
        self.direction = direction;
    }

    pub fn destroy(&mut self) {
        self.clear_steps();
        self.playback.clear();
        self.destroyed = true;
    }

    /// Position and facing the next enqueued step starts from.
    pub fn queue_tail(&self) -> (Position, Direction) {
        match self.steps.back() {
            Some(step) => (step.position(), step.direction),
            None => (self.position, self.direction),
        }
    }

    /// Facing the animation should use: the step in flight, else the mobile's.
    pub fn animation_direction(&self) -> Direction {
        self.steps
            .front()
            .map(|step| step.direction)
            .unwrap_or(self.direction)
    }

    pub fn animation_context(&self, now: GameTick, config: &MotionConfig) -> AnimationContext {
        let (walking, running) = match self.steps.front() {
            Some(step) => (true, step.run),
            None => (self.is_walking(now, config), self.running),
        };
        AnimationContext {
            body: self.body,
            direction: self.animation_direction(),
            walking,
            running,
            mounted: self.is_mounted(),
            war_mode: self.status.war_mode,
            dead: self.status.dead,
            flying: self.status.flying,
            gargoyle: self.status.gargoyle,
            hands: self.equipment.hand_items(),
            directed_group: self.playback.directed_group(),
            from_server: self.playback.is_from_server(),
        }
    }
}
