//! Lock-free single-producer single-consumer triple buffer.
//!
//! Latest-value handoff between two execution contexts: the producer
//! always has a private slot to write into, the consumer always has a
//! private slot to read from, and whole values move between them through
//! a single atomic swap of the shared "middle" slot index. Neither side
//! ever waits, and the consumer can never observe a value the producer is
//! still writing.
//!
//! # Safety Contract
//!
//! The contract is enforced by [`split()`](TripleBuffer::split): it hands
//! out exactly one [`Writer`] and one [`Reader`], and both need `&mut self`
//! to operate, so there is at most one producer and one consumer.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Set in `middle` when the middle slot holds a value the reader has not taken.
const FRESH: u8 = 0b100;
const INDEX_MASK: u8 = 0b011;

/// Three-slot latest-value buffer.
///
/// Slot ownership is a permutation of `{0, 1, 2}` across `back` (writer),
/// `middle` (shared) and `front` (reader); only the atomic swap of
/// `middle` ever moves a slot between sides.
pub struct TripleBuffer<T> {
    slots: [UnsafeCell<T>; 3],
    /// Shared slot index, plus [`FRESH`] when it holds an unread value.
    middle: AtomicU8,
    /// Writer-private slot index (only touched through [`Writer`]).
    back: UnsafeCell<u8>,
    /// Reader-private slot index (only touched through [`Reader`]).
    front: UnsafeCell<u8>,
    split: AtomicBool,
}

// SAFETY: T: Send is required because values cross thread/ISR boundaries.
// `split()` hands out a single writer and a single reader, so `back` and
// `front` each have one accessor, and the slot permutation guarantees the
// two sides never touch the same slot at the same time. The AcqRel swap of
// `middle` publishes the slot contents along with the index.
unsafe impl<T: Send> Sync for TripleBuffer<T> {}
unsafe impl<T: Send> Send for TripleBuffer<T> {}

impl<T: Copy> TripleBuffer<T> {
    /// Create a buffer whose slots all hold `initial`.
    pub const fn new(initial: T) -> Self {
        TripleBuffer {
            slots: [
                UnsafeCell::new(initial),
                UnsafeCell::new(initial),
                UnsafeCell::new(initial),
            ],
            middle: AtomicU8::new(1),
            back: UnsafeCell::new(2),
            front: UnsafeCell::new(0),
            split: AtomicBool::new(false),
        }
    }

    /// Take the writer and reader handles.
    ///
    /// Returns `None` on every call after the first.
    pub fn split(&self) -> Option<(Writer<'_, T>, Reader<'_, T>)> {
        if self.split.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((Writer { buffer: self }, Reader { buffer: self }))
    }
}

/// Producer handle of a [`TripleBuffer`].
pub struct Writer<'a, T> {
    buffer: &'a TripleBuffer<T>,
}

impl<T: Copy> Writer<'_, T> {
    /// Make `value` the latest value, replacing any the reader has not taken yet.
    pub fn write(&mut self, value: T) {
        let buffer = self.buffer;
        // SAFETY: this is the only Writer, so `back` and the slot it names
        // are ours. The reader never holds the back slot.
        unsafe {
            let back = *buffer.back.get();
            *buffer.slots[back as usize].get() = value;
            // Release: the slot write above is visible before the index is.
            let previous = buffer.middle.swap(back | FRESH, Ordering::AcqRel);
            *buffer.back.get() = previous & INDEX_MASK;
        }
    }
}

/// Consumer handle of a [`TripleBuffer`].
pub struct Reader<'a, T> {
    buffer: &'a TripleBuffer<T>,
}

impl<T: Copy> Reader<'_, T> {
    /// Return the most recently written value.
    ///
    /// If nothing new was written since the last read, the previous value
    /// is returned again.
    pub fn read(&mut self) -> T {
        let buffer = self.buffer;
        // SAFETY: this is the only Reader, so `front` and the slot it names
        // are ours. The writer never holds the front slot.
        unsafe {
            let mut front = *buffer.front.get();
            if buffer.middle.load(Ordering::Relaxed) & FRESH != 0 {
                // Acquire pairs with the writer's swap, making its slot write visible.
                let previous = buffer.middle.swap(front, Ordering::AcqRel);
                front = previous & INDEX_MASK;
                *buffer.front.get() = front;
            }
            *buffer.slots[front as usize].get()
        }
    }

    /// `true` if a value was written since the last [`read()`](Self::read).
    pub fn has_update(&self) -> bool {
        self.buffer.middle.load(Ordering::Acquire) & FRESH != 0
    }
}
