use super::{RingError, Storage};
use log::{debug, trace};
use std::ops::Range;

/// Fixed-capacity FIFO over `capacity` slots of `element_size` bytes each.
///
/// Full and empty are told apart by `count`, so every slot is usable.
#[derive(Debug)]
pub struct RingBuffer<'a> {
    storage: Storage<'a>,
    capacity: usize,
    element_size: usize,
    head: usize,
    tail: usize,
    count: usize,
}

/// Validates the geometry and returns the byte length of the slot region.
pub fn region_len(capacity: usize, element_size: usize) -> Result<usize, RingError> {
    let invalid = |reason| RingError::InvalidArgument {
        capacity,
        element_size,
        reason,
    };
    if capacity == 0 {
        return Err(invalid("capacity must be non-zero"));
    }
    if element_size == 0 {
        return Err(invalid("element size must be non-zero"));
    }
    capacity
        .checked_mul(element_size)
        .ok_or_else(|| invalid("capacity * element size overflows usize"))
}

impl<'a> RingBuffer<'a> {
    /// Borrows `storage` when given, otherwise allocates and owns the region.
    pub fn init(
        storage: Option<&'a mut [u8]>,
        capacity: usize,
        element_size: usize,
    ) -> Result<Self, RingError> {
        let len = region_len(capacity, element_size)?;
        let storage = match storage {
            Some(region) => Storage::borrow(region, len)?,
            None => Storage::allocate(len)?,
        };

        debug!(
            "ring init: capacity={} element_size={} storage={:?}",
            capacity, element_size, storage
        );

        Ok(Self {
            storage,
            capacity,
            element_size,
            head: 0,
            tail: 0,
            count: 0,
        })
    }

    pub fn borrowed(
        storage: &'a mut [u8],
        capacity: usize,
        element_size: usize,
    ) -> Result<Self, RingError> {
        Self::init(Some(storage), capacity, element_size)
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    #[inline(always)]
    pub fn available(&self) -> usize {
        self.capacity - self.count
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn storage(&self) -> &Storage<'a> {
        &self.storage
    }

    #[inline]
    pub fn enqueue(&mut self, value: &[u8]) -> Result<(), RingError> {
        if self.is_full() {
            trace!("enqueue rejected: {} slots in use", self.count);
            return Err(RingError::QueueFull {
                capacity: self.capacity,
            });
        }
        self.check_element(value.len())?;

        let slot = self.slot(self.tail);
        self.storage.bytes_mut()[slot].copy_from_slice(value);
        self.tail = self.advance(self.tail);
        self.count += 1;
        Ok(())
    }

    #[inline]
    pub fn dequeue(&mut self, out: &mut [u8]) -> Result<(), RingError> {
        self.peek_head(out)?;
        self.head = self.advance(self.head);
        self.count -= 1;
        Ok(())
    }

    #[inline]
    pub fn peek_head(&self, out: &mut [u8]) -> Result<(), RingError> {
        self.read_slot(self.head, out)
    }

    #[inline]
    pub fn peek_tail(&self, out: &mut [u8]) -> Result<(), RingError> {
        if self.is_empty() {
            return Err(RingError::QueueEmpty);
        }
        let newest = (self.tail + self.capacity - 1) % self.capacity;
        self.read_slot(newest, out)
    }

    /// Forgets every element and zero-fills the slots. Capacity is kept.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.storage.bytes_mut().fill(0);
        debug!("ring cleared: capacity={}", self.capacity);
    }

    /// Frees owned storage. The handle is left with zero capacity, so every
    /// later enqueue is rejected as full and every read as empty.
    ///
    /// Borrowed storage is never freed; destroying such a ring does nothing.
    /// Repeated calls are no-ops.
    pub fn destroy(&mut self) {
        if !self.storage.is_owned() {
            trace!("destroy ignored: storage={:?}", self.storage);
            return;
        }
        let freed = self.storage.release();
        self.capacity = 0;
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        debug!("ring destroyed: released {} bytes", freed);
    }

    fn read_slot(&self, index: usize, out: &mut [u8]) -> Result<(), RingError> {
        if self.is_empty() {
            trace!("read rejected: queue empty");
            return Err(RingError::QueueEmpty);
        }
        self.check_element(out.len())?;
        out.copy_from_slice(&self.storage.bytes()[self.slot(index)]);
        Ok(())
    }

    #[inline(always)]
    fn check_element(&self, len: usize) -> Result<(), RingError> {
        if len != self.element_size {
            return Err(RingError::ElementSize {
                expected: self.element_size,
                actual: len,
            });
        }
        Ok(())
    }

    #[inline(always)]
    fn slot(&self, index: usize) -> Range<usize> {
        let start = index * self.element_size;
        start..start + self.element_size
    }

    #[inline(always)]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity
    }
}

impl RingBuffer<'static> {
    pub fn owned(capacity: usize, element_size: usize) -> Result<Self, RingError> {
        Self::init(None, capacity, element_size)
    }
}
