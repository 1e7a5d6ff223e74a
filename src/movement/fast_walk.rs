/// Keys the server hands out to pace walk requests. Each walk request
/// consumes one key; 0 means "no key available".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastWalkStack {
    keys: Vec<u32>,
}

impl FastWalkStack {
    pub fn new(size: usize) -> Self {
        Self {
            keys: vec![0; size.max(1)],
        }
    }

    /// Overwrites the key at `index`; out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, value: u32) {
        if let Some(slot) = self.keys.get_mut(index) {
            *slot = value;
        }
    }

    /// Stores `value` in the first free slot. Dropped when the stack is full.
    pub fn add_value(&mut self, value: u32) -> bool {
        match self.keys.iter_mut().find(|slot| **slot == 0) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Takes the first stored key, or 0 when none is left.
    pub fn take_value(&mut self) -> u32 {
        for slot in self.keys.iter_mut() {
            if *slot != 0 {
                return std::mem::take(slot);
            }
        }
        0
    }

    pub fn clear(&mut self) {
        self.keys.iter_mut().for_each(|slot| *slot = 0);
    }

    pub fn len(&self) -> usize {
        self.keys.iter().filter(|slot| **slot != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_taken_front_first() {
        let mut stack = FastWalkStack::new(3);
        assert!(stack.add_value(10));
        assert!(stack.add_value(20));
        assert_eq!(stack.take_value(), 10);
        assert_eq!(stack.take_value(), 20);
        assert_eq!(stack.take_value(), 0);
    }

    #[test]
    fn full_stack_drops_new_keys() {
        let mut stack = FastWalkStack::new(2);
        assert!(stack.add_value(1));
        assert!(stack.add_value(2));
        assert!(!stack.add_value(3));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn set_value_fills_hole_and_ignores_out_of_range() {
        let mut stack = FastWalkStack::new(2);
        stack.set_value(1, 7);
        stack.set_value(5, 9);
        assert_eq!(stack.len(), 1);
        assert!(stack.add_value(8));
        assert_eq!(stack.take_value(), 8);
        assert_eq!(stack.take_value(), 7);
        stack.add_value(4);
        stack.clear();
        assert!(stack.is_empty());
    }
}
