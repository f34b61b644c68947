//! Ring Buffer Implementation

use crate::cursor::{Cursor, Iter, Position};
use crate::error::RingBufferError;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Remainder of `a / b` that always lies in `[0, b)`, whatever the sign of `a`.
///
/// Circular index arithmetic such as `newest - k` goes negative before it
/// wraps, and `%` keeps the sign of the dividend.
///
/// # Panics
///
/// Panics if `b` is zero.
pub fn true_mod(a: isize, b: usize) -> usize {
    assert!(b > 0, "modulus must be positive");
    a.rem_euclid(b as isize) as usize
}

/// Fixed-capacity ring buffer that keeps the most recent `capacity` values
#[derive(Clone)]
pub struct RingBuffer<T> {
    /// Live values, reserved up front so filling never reallocates
    storage: Vec<T>,
    /// Maximum number of live values
    capacity: usize,
    /// Slot of the most recently inserted value, `None` while empty
    newest: Option<usize>,
    /// Total values inserted (for statistics)
    total_inserted: usize,
}

impl<T> RingBuffer<T> {
    /// Ring buffer holding at most `capacity` values, allocated up front
    ///
    /// A capacity of zero is allowed; such a buffer stays empty forever.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            capacity,
            newest: None,
            total_inserted: 0,
        }
    }

    /// Insert a value, overwriting the oldest one if the buffer is full
    pub fn insert(&mut self, value: T) {
        self.total_inserted += 1;

        if self.capacity == 0 {
            debug!("Ring buffer has zero capacity, dropping inserted value");
            return;
        }

        let slot = if self.is_full() {
            let slot = self
                .newest
                .map_or(0, |newest| true_mod(newest as isize + 1, self.capacity));
            self.storage[slot] = value;
            slot
        } else {
            self.storage.push(value);
            self.storage.len() - 1
        };

        self.newest = Some(slot);
    }

    /// Get the number of live values
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// No live values
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Live count has reached capacity; the next insert overwrites the oldest
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Maximum number of live values, fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live values over capacity, `0.0` for a zero-capacity buffer
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.len() as f64 / self.capacity as f64
    }

    /// Get total values inserted over the buffer's lifetime
    pub fn total_inserted(&self) -> usize {
        self.total_inserted
    }

    /// Drop all live values. Capacity and allocation are kept.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.newest = None;
    }

    /// Cursor at the oldest value, or the end marker if the buffer is empty
    pub fn begin(&self) -> Cursor<'_, T> {
        match self.oldest_slot() {
            Some(slot) => Cursor::new(self, Position::Slot(slot)),
            None => self.end(),
        }
    }

    /// End-marker cursor, one past the newest value
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, Position::End)
    }

    /// Iterate over live values from oldest to newest
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin(), self.len())
    }

    /// Cursor at the value inserted `age` insertions before the newest one
    ///
    /// `offset_from_end(0)` is the newest value, `offset_from_end(1)` the one
    /// before it.
    ///
    /// # Panics
    ///
    /// Panics if `age >= self.len()`, including on an empty buffer.
    pub fn offset_from_end(&self, age: usize) -> Cursor<'_, T> {
        match self.try_offset_from_end(age) {
            Ok(cursor) => cursor,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`offset_from_end`](Self::offset_from_end), but reports an
    /// out-of-range age as an error
    pub fn try_offset_from_end(&self, age: usize) -> Result<Cursor<'_, T>, RingBufferError> {
        let slot = self.age_slot(age)?;
        Ok(Cursor::new(self, Position::Slot(slot)))
    }

    /// Value inserted `age` insertions before the newest one
    ///
    /// # Panics
    ///
    /// Panics if `age >= self.len()`.
    pub fn from_end(&self, age: usize) -> &T {
        self.offset_from_end(age).get()
    }

    /// Mutable access to the value inserted `age` insertions before the newest one
    ///
    /// # Panics
    ///
    /// Panics if `age >= self.len()`.
    pub fn from_end_mut(&mut self, age: usize) -> &mut T {
        match self.age_slot(age) {
            Ok(slot) => &mut self.storage[slot],
            Err(e) => panic!("{e}"),
        }
    }

    /// Most recently inserted value
    pub fn newest(&self) -> Option<&T> {
        self.newest.map(|slot| &self.storage[slot])
    }

    /// Mutable access to the most recently inserted value
    pub fn newest_mut(&mut self) -> Option<&mut T> {
        self.newest.map(|slot| &mut self.storage[slot])
    }

    pub(crate) fn newest_slot(&self) -> Option<usize> {
        self.newest
    }

    pub(crate) fn slot(&self, slot: usize) -> &T {
        &self.storage[slot]
    }

    /// Oldest live slot. The modulus is the live count: it equals the
    /// capacity once wrapped, and the oldest slot is 0 before that.
    fn oldest_slot(&self) -> Option<usize> {
        self.newest
            .map(|newest| true_mod(newest as isize + 1, self.len()))
    }

    fn age_slot(&self, age: usize) -> Result<usize, RingBufferError> {
        let len = self.len();
        match self.newest {
            Some(newest) if age < len => Ok(true_mod(newest as isize - age as isize, len)),
            _ => Err(RingBufferError::AgeOutOfRange { index: age, len }),
        }
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Serializes the live values as a sequence, oldest first
impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
