//! Ring Buffer Cursor and Iterator

use crate::buffer::{true_mod, RingBuffer};
use std::fmt;
use std::iter::FusedIterator;

/// Logical position of a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    /// Storage slot of a live value
    Slot(usize),
    /// One past the newest value
    End,
}

/// Position within a [`RingBuffer`], either a live value or the end marker
///
/// Cursors borrow the buffer, so no insertion can happen while one is alive.
pub struct Cursor<'a, T> {
    buffer: &'a RingBuffer<T>,
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(buffer: &'a RingBuffer<T>, position: Position) -> Self {
        Self { buffer, position }
    }

    /// Whether this cursor is the end marker
    pub fn is_end(&self) -> bool {
        self.position == Position::End
    }

    /// Storage slot this cursor points at, `None` for the end marker
    pub fn slot(&self) -> Option<usize> {
        match self.position {
            Position::Slot(slot) => Some(slot),
            Position::End => None,
        }
    }

    /// Step towards the newest value. Stepping past the newest value yields
    /// the end marker, which stays put.
    pub fn advance(&mut self) {
        if let Position::Slot(slot) = self.position {
            self.position = if Some(slot) == self.buffer.newest_slot() {
                Position::End
            } else {
                Position::Slot(true_mod(slot as isize + 1, self.buffer.len()))
            };
        }
    }

    /// Value under the cursor
    ///
    /// # Panics
    ///
    /// Panics if this is the end marker.
    pub fn get(&self) -> &'a T {
        match self.try_get() {
            Some(value) => value,
            None => panic!("cannot dereference the end-marker cursor"),
        }
    }

    /// Value under the cursor, `None` for the end marker
    pub fn try_get(&self) -> Option<&'a T> {
        self.slot().map(|slot| self.buffer.slot(slot))
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

/// Cursors are equal when both are the end marker or both point at the same slot
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(
            std::ptr::eq(self.buffer, other.buffer),
            "compared cursors from different ring buffers"
        );
        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("position", &self.position).finish()
    }
}

/// Oldest-to-newest iterator, see [`RingBuffer::iter`]
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(cursor: Cursor<'a, T>, remaining: usize) -> Self {
        Self { cursor, remaining }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.try_get()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_begin_is_end() {
        let buffer: RingBuffer<u8> = RingBuffer::new(3);
        assert_eq!(buffer.begin(), buffer.end());
        assert!(buffer.begin().is_end());
        assert!(buffer.begin().try_get().is_none());
    }

    #[test]
    fn test_manual_traversal_after_wrap() {
        let mut buffer = RingBuffer::new(3);
        buffer.extend(['a', 'b', 'c', 'd', 'e']);

        let mut cursor = buffer.begin();
        let mut seen = Vec::new();
        while cursor != buffer.end() {
            seen.push(*cursor.get());
            cursor.advance();
        }
        assert_eq!(seen, vec!['c', 'd', 'e']);

        cursor.advance();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_begin_slot_before_and_after_wrap() {
        let mut buffer = RingBuffer::new(3);
        buffer.extend([1, 2]);
        assert_eq!(buffer.begin().slot(), Some(0));

        buffer.extend([3, 4]);
        // slot 0 now holds 4, the oldest (2) sits in slot 1
        assert_eq!(buffer.begin().slot(), Some(1));
        assert_eq!(buffer.offset_from_end(0).slot(), Some(0));
        assert_eq!(buffer.offset_from_end(1).slot(), Some(2));
    }

    #[test]
    fn test_cursor_equality() {
        let mut buffer = RingBuffer::new(2);
        buffer.extend([10, 20, 30]);

        assert_eq!(buffer.offset_from_end(1), buffer.begin());
        assert_ne!(buffer.offset_from_end(0), buffer.begin());
        assert_ne!(buffer.offset_from_end(0), buffer.end());

        let mut cursor = buffer.offset_from_end(0);
        cursor.advance();
        assert_eq!(cursor, buffer.end());
    }

    #[test]
    #[should_panic(expected = "end-marker cursor")]
    fn test_dereference_end_panics() {
        let mut buffer = RingBuffer::new(2);
        buffer.insert(1);
        buffer.end().get();
    }

    #[test]
    fn test_iter_exact_size_and_fused() {
        let mut buffer = RingBuffer::new(4);
        buffer.extend(0..6);

        let mut iter = buffer.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_into_iterator_for_reference() {
        let mut buffer = RingBuffer::new(2);
        buffer.extend(["x", "y", "z"]);

        let mut collected = Vec::new();
        for value in &buffer {
            collected.push(*value);
        }
        assert_eq!(collected, vec!["y", "z"]);
    }
}
