/// Cursor pair over a contiguous ring of `capacity` slots.
///
/// `oldest` is the slot of the earliest live element and `free` the slot the
/// next push writes to. Both stay in `[0, capacity)`; the explicit `len`
/// decides between empty and full when they coincide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RingOffsets {
    oldest: usize,
    free: usize,
    len: usize,
}

impl RingOffsets {
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_full(&self, capacity: usize) -> bool {
        self.len == capacity
    }

    #[inline(always)]
    pub const fn oldest(&self) -> usize {
        self.oldest
    }

    #[inline(always)]
    pub const fn free(&self) -> usize {
        self.free
    }

    #[inline(always)]
    const fn wrap(val: usize, capacity: usize) -> usize {
        if val + 1 >= capacity {
            0
        } else {
            val + 1
        }
    }

    /// Records a write into `free`. When the ring was already full the oldest
    /// slot is the one just overwritten, so `oldest` moves along with `free`.
    #[inline(always)]
    pub fn push_forward(&mut self, capacity: usize) {
        debug_assert!(capacity > 0);

        if self.is_full(capacity) {
            self.oldest = Self::wrap(self.oldest, capacity);
        } else {
            self.len += 1;
        }

        self.free = Self::wrap(self.free, capacity);
    }

    #[inline(always)]
    pub fn pop_forward(&mut self, capacity: usize) {
        debug_assert!(!self.is_empty());

        self.oldest = Self::wrap(self.oldest, capacity);
        self.len -= 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
