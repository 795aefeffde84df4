use std::{
    fmt::{self, Debug},
    mem::MaybeUninit,
    ops::Index,
};

use tracing::{debug, trace};

use super::ring_offsets::RingOffsets;
use crate::error::RingBufferError;

/// FIFO ring over a preallocated contiguous array.
///
/// Pushing into a full buffer overwrites the oldest element, which is handed
/// back to the caller. A zero-capacity buffer is permanently both empty and
/// full and drops everything pushed into it.
pub struct FixedRingBuffer<T> {
    offsets: RingOffsets,
    elements: Box<[MaybeUninit<T>]>,
}

impl<T> FixedRingBuffer<T> {
    pub fn new(capacity: isize) -> Result<Self, RingBufferError> {
        let capacity =
            usize::try_from(capacity).map_err(|_| RingBufferError::InvalidArgument(capacity))?;

        Ok(Self::with_capacity(capacity))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut elements = Vec::with_capacity(capacity);
        elements.resize_with(capacity, MaybeUninit::uninit);

        Self {
            offsets: RingOffsets::default(),
            elements: elements.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.offsets.is_full(self.capacity())
    }

    #[inline]
    fn set_element(&mut self, idx: usize, elem: T) {
        self.elements[idx].write(elem);
    }

    #[inline]
    fn take_element(&mut self, idx: usize) -> T {
        let elem = &mut self.elements[idx];
        unsafe { elem.assume_init_read() }
    }

    #[inline]
    fn replace_element(&mut self, idx: usize, elem: T) -> T {
        let slot = &mut self.elements[idx];
        unsafe { std::mem::replace(slot, MaybeUninit::new(elem)).assume_init() }
    }

    /// Appends `elem` as the newest element, returning the evicted oldest
    /// element if the buffer was full.
    pub fn push(&mut self, elem: T) -> Option<T> {
        let capacity = self.capacity();
        if capacity == 0 {
            debug!("push into zero-capacity buffer dropped");
            return None;
        }

        let idx = self.offsets.free();
        let evicted = if self.is_full() {
            trace!(capacity, len = self.len(), slot = idx, "overwriting oldest element");
            Some(self.replace_element(idx, elem))
        } else {
            self.set_element(idx, elem);
            None
        };

        self.offsets.push_forward(capacity);
        evicted
    }

    pub fn pop(&mut self) -> Result<T, RingBufferError> {
        if self.is_empty() {
            return Err(RingBufferError::EmptyBuffer);
        }

        let idx = self.offsets.oldest();
        self.offsets.pop_forward(self.capacity());

        Ok(self.take_element(idx))
    }

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let elem = &self.elements[self.offsets.oldest()];
        Some(unsafe { elem.assume_init_ref() })
    }

    /// Only the oldest element is addressable, at index 0.
    pub fn get(&self, index: usize) -> Result<&T, RingBufferError> {
        if index != 0 {
            return Err(RingBufferError::InvalidIndex(index));
        }

        self.peek().ok_or(RingBufferError::EmptyBuffer)
    }

    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
        self.offsets.reset();
    }
}

impl<T> Index<usize> for FixedRingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        assert_eq!(index, 0, "only index 0 is addressable");
        assert!(!self.is_empty(), "buffer is empty");

        unsafe { self.elements[self.offsets.oldest()].assume_init_ref() }
    }
}

impl<T> Clone for FixedRingBuffer<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let capacity = self.capacity();
        let mut elements: Vec<MaybeUninit<T>> = Vec::with_capacity(capacity);
        elements.resize_with(capacity, MaybeUninit::uninit);

        let mut idx = self.offsets.oldest();

        for _ in 0..self.len() {
            let elem = unsafe { self.elements[idx].assume_init_ref() };
            elements[idx] = MaybeUninit::new(elem.clone());

            idx = (idx + 1) % capacity;
        }

        Self {
            offsets: self.offsets.clone(),
            elements: elements.into_boxed_slice(),
        }
    }
}

impl<T> Debug for FixedRingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedRingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("oldest", &self.offsets.oldest())
            .field("free", &self.offsets.free())
            .finish()
    }
}

impl<T> Drop for FixedRingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn error_on_negative_capacity() {
        let result: Result<FixedRingBuffer<usize>, _> = FixedRingBuffer::new(-1);
        assert_eq!(result.unwrap_err(), RingBufferError::InvalidArgument(-1));
    }

    #[test]
    fn no_error_on_correct_capacity() {
        let b: FixedRingBuffer<usize> = FixedRingBuffer::new(4).unwrap();
        assert_eq!(b.len(), 0);
        assert_eq!(b.capacity(), 4);
        assert!(b.is_empty());
        assert!(!b.is_full());
    }

    #[test]
    fn push_and_pop() {
        let mut b = FixedRingBuffer::with_capacity(4);

        // [0, 1, 2, n]
        assert!(b.push(0).is_none());
        assert!(b.push(1).is_none());
        assert!(b.push(2).is_none());
        assert_eq!(b.len(), 3);
        assert_eq!(b.offsets.oldest(), 0);
        assert_eq!(b.offsets.free(), 3);
        assert_eq!(b[0], 0);

        // [n, 1, 2, n]
        assert_eq!(b.pop(), Ok(0));
        assert_eq!(b.offsets.oldest(), 1);
        assert_eq!(*b.get(0).unwrap(), 1);

        // [4, 1, 2, 3]
        assert!(b.push(3).is_none());
        assert!(b.push(4).is_none());
        assert!(b.is_full());
        assert_eq!(b.offsets.oldest(), 1);
        assert_eq!(b.offsets.free(), 1);

        assert_eq!(b.pop(), Ok(1));
        assert_eq!(b.pop(), Ok(2));
        assert_eq!(b.pop(), Ok(3));
        assert_eq!(b.pop(), Ok(4));
        assert_eq!(b.pop(), Err(RingBufferError::EmptyBuffer));
        assert!(b.is_empty());
    }

    #[test]
    fn overwrite_oldest_when_full() {
        let mut b = FixedRingBuffer::with_capacity(3);

        for i in 0..3 {
            assert!(b.push(i).is_none());
        }

        assert_eq!(b.push(3), Some(0));
        assert_eq!(b.push(4), Some(1));
        assert_eq!(b.len(), 3);
        assert!(b.is_full());

        assert_eq!(b.pop(), Ok(2));
        assert_eq!(b.pop(), Ok(3));
        assert_eq!(b.pop(), Ok(4));
    }

    #[test]
    fn zero_capacity_is_empty_and_full() {
        let mut b = FixedRingBuffer::with_capacity(0);
        assert!(b.is_empty());
        assert!(b.is_full());

        assert!(b.push(7).is_none());
        assert_eq!(b.len(), 0);
        assert_eq!(b.pop(), Err(RingBufferError::EmptyBuffer));
        assert_eq!(b.get(0), Err(RingBufferError::EmptyBuffer));
    }

    #[test]
    fn single_slot_keeps_last_value() {
        let mut b = FixedRingBuffer::with_capacity(1);

        assert!(b.push(1).is_none());
        assert_eq!(b.push(2), Some(1));
        assert_eq!(b.push(3), Some(2));
        assert_eq!(b.len(), 1);
        assert_eq!(b[0], 3);

        assert_eq!(b.pop(), Ok(3));
        assert!(b.is_empty());
    }

    #[test]
    fn invalid_index() {
        let mut b = FixedRingBuffer::with_capacity(2);
        b.push(10);
        b.push(11);

        assert_eq!(b.get(1), Err(RingBufferError::InvalidIndex(1)));
        assert_eq!(b.get(0), Ok(&10));
        assert_eq!(b.len(), 2);
    }

    #[test]
    #[should_panic]
    fn index_panics_on_nonzero() {
        let mut b = FixedRingBuffer::with_capacity(2);
        b.push(10);
        let _ = b[1];
    }

    #[test]
    fn clear_resets_cursors() {
        let mut b = FixedRingBuffer::with_capacity(3);
        for i in 0..5 {
            b.push(i);
        }

        b.clear();
        assert_eq!(b.len(), 0);
        assert!(b.is_empty());
        assert_eq!(b.offsets.oldest(), 0);
        assert_eq!(b.offsets.free(), 0);
        assert_eq!(b.pop(), Err(RingBufferError::EmptyBuffer));

        b.push(10);
        b.push(11);
        assert_eq!(b.pop(), Ok(10));
        assert_eq!(b.pop(), Ok(11));
        assert!(b.is_empty());
    }

    #[test]
    fn clone_preserves_order() {
        let mut b = FixedRingBuffer::with_capacity(3);
        for i in 0..5 {
            b.push(i.to_string());
        }

        let mut c = b.clone();
        assert_eq!(c.len(), 3);
        assert_eq!(c.pop().unwrap(), "2");
        assert_eq!(c.pop().unwrap(), "3");
        assert_eq!(c.pop().unwrap(), "4");

        assert_eq!(b.peek().unwrap(), "2");
    }

    #[test]
    fn drops_live_elements() {
        let tracker = Rc::new(());

        {
            let mut b = FixedRingBuffer::with_capacity(4);
            for _ in 0..6 {
                b.push(Rc::clone(&tracker));
            }
            b.pop().unwrap();
            assert_eq!(Rc::strong_count(&tracker), 4);
        }

        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn large_capacity_round_trip() {
        let b: FixedRingBuffer<u64> = FixedRingBuffer::new(1_000_000).unwrap();
        assert_eq!(b.capacity(), 1_000_000);
    }
}
