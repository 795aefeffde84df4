use std::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::Index,
    ptr::NonNull,
};

use tracing::{debug, trace};

use super::node::Node;
use crate::error::RingBufferError;

/// FIFO ring over a singly-linked cycle of heap nodes.
///
/// Nodes are allocated lazily until `capacity` of them exist; from then on a
/// push into a full buffer overwrites the oldest element in place. Every
/// allocated node stays in the cycle until the buffer is dropped: the live
/// elements are the `len` consecutive nodes from `oldest` to `newest`, and
/// the vacated ones between `newest` and `oldest` are reused by later pushes.
pub struct LinkedRingBuffer<T> {
    oldest: Option<NonNull<Node<T>>>,
    newest: Option<NonNull<Node<T>>>,
    capacity: usize,
    len: usize,
    allocated: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedRingBuffer<T> {
    pub fn new(capacity: isize) -> Result<Self, RingBufferError> {
        let capacity =
            usize::try_from(capacity).map_err(|_| RingBufferError::InvalidArgument(capacity))?;

        Ok(Self::with_capacity(capacity))
    }

    /// Creates a buffer already holding `elem`.
    pub fn with_first(capacity: isize, elem: T) -> Result<Self, RingBufferError> {
        let mut buffer = Self::new(capacity)?;
        buffer.push(elem);

        Ok(buffer)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            oldest: None,
            newest: None,
            capacity,
            len: 0,
            allocated: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Appends `elem` as the newest element, returning the evicted oldest
    /// element if the buffer was full.
    pub fn push(&mut self, elem: T) -> Option<T> {
        if self.capacity == 0 {
            debug!("push into zero-capacity buffer dropped");
            return None;
        }

        let Some(newest) = self.newest else {
            let node = Node::alloc(elem);
            trace!(capacity = self.capacity, "allocated first node");

            self.oldest = Some(node);
            self.newest = Some(node);
            self.allocated = 1;
            self.len = 1;

            return None;
        };

        if self.len == self.allocated && self.allocated < self.capacity {
            let node = unsafe { Node::alloc_after(newest, elem) };
            self.allocated += 1;
            trace!(allocated = self.allocated, capacity = self.capacity, "grew ring");

            self.newest = Some(node);
            self.oldest.get_or_insert(node);
            self.len += 1;

            return None;
        }

        // Either a vacated node or, when full, the oldest one.
        let mut target = unsafe { newest.as_ref().next };
        let evicted = unsafe { target.as_mut().elem.replace(elem) };
        self.newest = Some(target);

        if self.len == self.capacity {
            trace!(capacity = self.capacity, len = self.len, "overwrote oldest element");
            self.oldest = Some(unsafe { target.as_ref().next });
        } else {
            self.oldest.get_or_insert(target);
            self.len += 1;
        }

        debug_assert!(self.len <= self.capacity);
        evicted
    }

    pub fn pop(&mut self) -> Result<T, RingBufferError> {
        let mut oldest = self.oldest.ok_or(RingBufferError::EmptyBuffer)?;

        let elem = unsafe { oldest.as_mut().elem.take() }.ok_or(RingBufferError::EmptyBuffer)?;
        self.len -= 1;

        self.oldest = if self.len == 0 {
            None
        } else {
            Some(unsafe { oldest.as_ref().next })
        };

        Ok(elem)
    }

    pub fn peek(&self) -> Option<&T> {
        let oldest = self.oldest?;
        unsafe { (*oldest.as_ptr()).elem.as_ref() }
    }

    /// Only the oldest element is addressable, at index 0.
    pub fn get(&self, index: usize) -> Result<&T, RingBufferError> {
        if index != 0 {
            return Err(RingBufferError::InvalidIndex(index));
        }

        self.peek().ok_or(RingBufferError::EmptyBuffer)
    }

    /// Drops every live element. Allocated nodes are kept for reuse.
    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
    }

    /// Walks the cycle once from `oldest` and returns the number of live
    /// nodes passed before the first vacated node or the return to `oldest`.
    #[cfg(test)]
    fn count_live(&self) -> usize {
        let Some(start) = self.oldest else {
            return 0;
        };

        let mut count = 0;
        let mut cursor = start;

        loop {
            let node = unsafe { cursor.as_ref() };
            if node.elem.is_none() {
                break;
            }

            count += 1;
            cursor = node.next;

            if cursor == start {
                break;
            }
        }

        count
    }

    /// Number of nodes in the cycle, found by walking it.
    #[cfg(test)]
    fn count_nodes(&self) -> usize {
        let Some(start) = self.newest else {
            return 0;
        };

        let mut count = 1;
        let mut cursor = unsafe { start.as_ref().next };

        while cursor != start {
            count += 1;
            cursor = unsafe { cursor.as_ref().next };
        }

        count
    }
}

impl<T> Index<usize> for LinkedRingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        assert_eq!(index, 0, "only index 0 is addressable");

        match self.peek() {
            Some(elem) => elem,
            None => panic!("buffer is empty"),
        }
    }
}

impl<T> Debug for LinkedRingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedRingBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("allocated", &self.allocated)
            .finish()
    }
}

impl<T> Drop for LinkedRingBuffer<T> {
    fn drop(&mut self) {
        let Some(start) = self.newest else {
            return;
        };

        let mut cursor = unsafe { start.as_ref().next };

        for _ in 0..self.allocated {
            let next = unsafe { cursor.as_ref().next };
            unsafe { Node::free(cursor) };
            cursor = next;
        }
    }
}
