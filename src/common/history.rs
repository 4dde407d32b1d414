use alloc::{boxed::Box, vec};

/// A fixed capacity ring buffer holding the most recently pushed values.
/// Values older than the capacity are overwritten. Slots that have not been
/// written yet read as `T::default()`.
pub struct History<T> {
    buffer: Box<[T]>,
    /// Index of the slot the next value is written to.
    write_index: usize,
}

impl<T: Copy + Default> History<T> {
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("History capacity must be greater than 0")
        }
        History {
            buffer: vec![T::default(); capacity].into_boxed_slice(),
            write_index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn push(&mut self, value: T) {
        self.buffer[self.write_index] = value;
        self.write_index = if self.write_index == self.buffer.len() - 1 {
            0
        } else {
            self.write_index + 1
        };
    }

    /// Returns the value pushed `delay` pushes ago. A delay of 0 is the most
    /// recent value. `delay` must be less than the capacity.
    #[inline]
    pub fn ago(&self, delay: usize) -> T {
        debug_assert!(delay < self.buffer.len());
        let index = if delay < self.write_index {
            self.write_index - 1 - delay
        } else {
            self.buffer.len() + self.write_index - 1 - delay
        };
        self.buffer[index]
    }

    /// Overwrites all values with `T::default()`.
    pub fn clear(&mut self) {
        for value in self.buffer.iter_mut() {
            *value = T::default();
        }
        self.write_index = 0;
    }
}
