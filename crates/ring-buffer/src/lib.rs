//! Fixed-Capacity Ring Buffer
//!
//! Retains the most recent N values inserted by a sequential pipeline and
//! overwrites the oldest once full. Values can be read oldest-to-newest with
//! [`RingBuffer::iter`] or addressed by age with
//! [`RingBuffer::offset_from_end`] (0 = newest, 1 = previous, ...).
//!
//! The buffer is not safe for concurrent mutation. Wrap it in a mutex if it
//! has to be shared between threads.

mod buffer;
mod cursor;
mod error;

pub use buffer::{true_mod, RingBuffer};
pub use cursor::{Cursor, Iter};
pub use error::RingBufferError;
