use std::collections::VecDeque;

use crate::world::position::{Direction, Position};

/// One queued movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub x: u16,
    pub y: u16,
    pub z: i8,
    pub direction: Direction,
    pub run: bool,
}

impl Step {
    pub fn new(destination: Position, direction: Direction, run: bool) -> Self {
        Self {
            x: destination.x,
            y: destination.y,
            z: destination.z,
            direction,
            run,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

/// Bounded FIFO of pending steps for one mobile. The front is the step being
/// walked, the back the most recently requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepQueue {
    steps: VecDeque<Step>,
    capacity: usize,
}

impl StepQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            steps: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `step` at the back. Returns `false` and leaves the queue
    /// untouched when it is already at its bound.
    #[must_use]
    pub fn enqueue(&mut self, step: Step) -> bool {
        if self.is_full() {
            return false;
        }
        self.steps.push_back(step);
        true
    }

    pub fn front(&self) -> Option<&Step> {
        self.steps.front()
    }

    pub fn back(&self) -> Option<&Step> {
        self.steps.back()
    }

    /// Drops the oldest step; the caller has already applied it.
    pub fn dequeue_front(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    /// Empties the queue. Mobiles go through `Mobile::clear_steps`, which
    /// also zeroes the sub-tile offset.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.steps.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> + '_ {
        self.steps.iter()
    }
}
