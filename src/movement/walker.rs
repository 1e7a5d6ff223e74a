//! Client-side prediction for the locally controlled mobile.
//!
//! Every accepted move is applied to the step queue immediately and recorded
//! in a small ledger until the server acknowledges or denies it. The cursor
//! splits the ledger: records below it have already been walked locally,
//! records at or above it are still queued.

use crate::config::MotionConfig;
use crate::entities::mobile::{Mobile, Serial, SpeedMode};
use crate::movement::fast_walk::FastWalkStack;
use crate::movement::speed::time_to_complete_movement;
use crate::movement::step_queue::Step;
use crate::telemetry::logging;
use crate::world::position::{Direction, Position};
use crate::world::time::GameTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkRequest {
    pub direction: Direction,
    pub sequence: u8,
    pub run: bool,
    pub fast_walk_key: u32,
}

/// Where the pathfinder lets a mobile go from a tile in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    pub direction: Direction,
    pub destination: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    Ack {
        sequence: u8,
    },
    Deny {
        sequence: u8,
        position: Position,
        direction: Direction,
    },
    MobileMoved {
        serial: Serial,
        position: Position,
        direction: Direction,
        run: bool,
    },
}

pub trait WalkNetwork {
    fn send_walk_request(&mut self, request: WalkRequest);
    fn send_resync(&mut self);
}

pub trait Pathfinder {
    /// `None` when nothing walkable lies in or around `direction`. The
    /// outcome may name a neighbouring direction when the path slides
    /// around a corner.
    fn can_walk(&self, from: Position, direction: Direction) -> Option<WalkOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    pub sequence: u8,
    pub old_direction: Direction,
    pub direction: Direction,
    pub timer: GameTick,
    pub accepted: bool,
    pub running: bool,
    pub no_rotation: bool,
    pub destination: Position,
}

#[derive(Debug, Clone)]
pub struct WalkerState {
    records: Vec<StepRecord>,
    capacity: usize,
    cursor: usize,
    sequence: u8,
    next_request_at: GameTick,
    unaccepted: u32,
    walking_failed: bool,
    resync_requested: bool,
    fast_walk: FastWalkStack,
}

impl WalkerState {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            records: Vec::with_capacity(config.max_step_count),
            capacity: config.max_step_count.max(1),
            cursor: 0,
            sequence: 0,
            next_request_at: GameTick(0),
            unaccepted: 0,
            walking_failed: false,
            resync_requested: false,
            fast_walk: FastWalkStack::new(config.fast_walk_stack_size),
        }
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn walking_failed(&self) -> bool {
        self.walking_failed
    }

    pub fn unaccepted(&self) -> u32 {
        self.unaccepted
    }

    /// Sequence number the next request will carry.
    pub fn next_sequence(&self) -> u8 {
        self.sequence
    }

    pub fn next_request_at(&self) -> GameTick {
        self.next_request_at
    }

    pub fn fast_walk_mut(&mut self) -> &mut FastWalkStack {
        &mut self.fast_walk
    }

    /// Clears every prediction and lets walking resume.
    pub fn reset(&mut self) {
        self.records.clear();
        self.cursor = 0;
        self.sequence = 0;
        self.next_request_at = GameTick(0);
        self.unaccepted = 0;
        self.walking_failed = false;
        self.resync_requested = false;
    }

    fn advance_sequence(&mut self) -> u8 {
        let current = self.sequence;
        self.sequence = if current == u8::MAX { 1 } else { current + 1 };
        current
    }

    fn effective_run(mobile: &Mobile, run: bool, config: &MotionConfig) -> bool {
        let status = &mobile.status;
        let mut run = run || config.always_run;
        if status.speed_mode == SpeedMode::CantRun
            || (status.stamina <= 1 && !status.dead)
            || (status.hidden && config.always_run_unless_hidden)
        {
            run = false;
        }
        run
    }

    /// Tries to start a step or turn of `player` towards `direction`.
    pub fn request_move(
        &mut self,
        player: &mut Mobile,
        direction: Direction,
        run: bool,
        now: GameTick,
        config: &MotionConfig,
        pathfinder: &dyn Pathfinder,
        network: &mut dyn WalkNetwork,
    ) -> bool {
        if self.walking_failed
            || now < self.next_request_at
            || self.records.len() >= self.capacity
            || player.steps.is_full()
        {
            return false;
        }
        if config.paralysis_blocks_walk && player.status.paralyzed {
            return false;
        }

        let run = Self::effective_run(player, run, config);
        let (from, old_direction) = player.queue_tail();

        let (new_direction, destination) = if old_direction == direction {
            let Some(outcome) = pathfinder.can_walk(from, direction) else {
                return false;
            };
            if outcome.direction != direction {
                (outcome.direction, from)
            } else {
                (direction, outcome.destination)
            }
        } else {
            match pathfinder.can_walk(from, direction) {
                Some(outcome) if outcome.direction == old_direction => {
                    (old_direction, outcome.destination)
                }
                _ => (direction, from),
            }
        };
        let turn_only = destination.same_tile(from);

        let was_idle = player.steps.is_empty();
        if !player.steps.enqueue(Step::new(destination, new_direction, run)) {
            return false;
        }
        if was_idle {
            player.last_step_time = now;
        }

        let sequence = self.advance_sequence();
        let drop = i16::from(from.z) - i16::from(destination.z);
        self.records.push(StepRecord {
            sequence,
            old_direction,
            direction: new_direction,
            timer: now,
            accepted: false,
            running: run,
            no_rotation: old_direction == new_direction && drop >= config.no_rotation_z,
            destination,
        });

        network.send_walk_request(WalkRequest {
            direction: new_direction,
            sequence,
            run,
            fast_walk_key: self.fast_walk.take_value(),
        });
        self.unaccepted += 1;
        if self.unaccepted >= config.max_unaccepted_steps {
            self.walking_failed = true;
            logging::log_desync(&format!(
                "{} walk requests unanswered, walking paused",
                self.unaccepted
            ));
        }

        let delay = if turn_only {
            config.turn_delay_ms
        } else {
            time_to_complete_movement(config, run, player.uses_fast_timings())
        };
        self.next_request_at = now.saturating_add_millis(delay);

        logging::log_movement(&format!(
            "walk seq {} dir {:?} run {} -> ({}, {}, {})",
            sequence, new_direction, run, destination.x, destination.y, destination.z
        ));
        true
    }

    /// Server accepted the step with `sequence`.
    pub fn on_ack(&mut self, sequence: u8, network: &mut dyn WalkNetwork) {
        self.unaccepted = self.unaccepted.saturating_sub(1);
        match self.records.iter().position(|record| record.sequence == sequence) {
            Some(index) if index >= self.cursor => self.records[index].accepted = true,
            // Late ack for an already committed step. This also swallows a
            // reordered ack for the oldest record.
            Some(0) => {
                self.records.remove(0);
                self.cursor -= 1;
            }
            found => {
                logging::log_desync(&format!(
                    "ack for seq {} out of order (index {:?}, cursor {}), resyncing",
                    sequence, found, self.cursor
                ));
                self.walking_failed = true;
                self.records.clear();
                self.cursor = 0;
                if !self.resync_requested {
                    self.resync_requested = true;
                    network.send_resync();
                }
            }
        }
    }

    /// Server rejected the step with `sequence` and reports where the
    /// player really is.
    pub fn on_deny(
        &mut self,
        sequence: u8,
        position: Position,
        direction: Direction,
        player: &mut Mobile,
        config: &MotionConfig,
    ) {
        logging::log_desync(&format!(
            "walk seq {} denied, back to ({}, {}, {})",
            sequence, position.x, position.y, position.z
        ));
        player.teleport(position, direction);
        self.reset();
        self.walking_failed = config.deny_blocks_walking;
    }

    /// Authoritative position update for the player. Ends a failed walk.
    pub fn on_position_correction(
        &mut self,
        position: Position,
        direction: Direction,
        player: &mut Mobile,
    ) {
        player.teleport(position, direction);
        self.reset();
    }

    /// Ledger bookkeeping when the advancer commits the player's front step.
    pub fn on_step_committed(&mut self) {
        match self.records.get(self.cursor) {
            Some(record) if record.accepted => {
                self.records.remove(self.cursor);
            }
            Some(_) => self.cursor += 1,
            None => {}
        }
    }

    /// Routes player-related events. Returns `false` for events about other
    /// mobiles, which the caller hands to the remote mover.
    pub fn handle_event(
        &mut self,
        event: &WalkEvent,
        player: &mut Mobile,
        config: &MotionConfig,
        network: &mut dyn WalkNetwork,
    ) -> bool {
        match *event {
            WalkEvent::Ack { sequence } => {
                self.on_ack(sequence, network);
                true
            }
            WalkEvent::Deny {
                sequence,
                position,
                direction,
            } => {
                self.on_deny(sequence, position, direction, player, config);
                true
            }
            WalkEvent::MobileMoved {
                serial,
                position,
                direction,
                ..
            } if serial == player.serial => {
                self.on_position_correction(position, direction, player);
                true
            }
            WalkEvent::MobileMoved { .. } => false,
        }
    }
}
