use super::{RingBuffer, RingError, region_len};
use bytemuck::Pod;
use std::marker::PhantomData;
use std::mem;

/// A [`RingBuffer`] whose slots hold values of `T`.
///
/// `T: Pod` guarantees every slot is exactly `size_of::<T>()` plain bytes,
/// so values are copied in and out without any padding concerns.
#[derive(Debug)]
pub struct TypedRing<'a, T: Pod> {
    raw: RingBuffer<'a>,
    _marker: PhantomData<T>,
}

/// Byte queue over caller memory, e.g. a `static mut [u8; N]` on firmware.
pub type ByteQueue<'a> = TypedRing<'a, u8>;

impl<'a, T: Pod> TypedRing<'a, T> {
    pub fn init(storage: Option<&'a mut [T]>, capacity: usize) -> Result<Self, RingError> {
        // Zero-sized `T` cannot be cast to bytes; reject it before the cast.
        region_len(capacity, mem::size_of::<T>())?;
        let bytes = storage.map(bytemuck::cast_slice_mut::<T, u8>);
        let raw = RingBuffer::init(bytes, capacity, mem::size_of::<T>())?;
        Ok(Self {
            raw,
            _marker: PhantomData,
        })
    }

    pub fn borrowed(storage: &'a mut [T], capacity: usize) -> Result<Self, RingError> {
        Self::init(Some(storage), capacity)
    }

    /// Uses all of `storage` as slots.
    pub fn with_storage(storage: &'a mut [T]) -> Result<Self, RingError> {
        let capacity = storage.len();
        Self::init(Some(storage), capacity)
    }

    #[inline]
    pub fn enqueue(&mut self, value: T) -> Result<(), RingError> {
        self.raw.enqueue(bytemuck::bytes_of(&value))
    }

    #[inline]
    pub fn dequeue(&mut self) -> Result<T, RingError> {
        let mut value = T::zeroed();
        self.dequeue_into(&mut value)?;
        Ok(value)
    }

    /// Leaves `out` untouched when the queue is empty.
    #[inline]
    pub fn dequeue_into(&mut self, out: &mut T) -> Result<(), RingError> {
        self.raw.dequeue(bytemuck::bytes_of_mut(out))
    }

    #[inline]
    pub fn peek_head(&self) -> Result<T, RingError> {
        let mut value = T::zeroed();
        self.raw.peek_head(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    #[inline]
    pub fn peek_tail(&self) -> Result<T, RingError> {
        let mut value = T::zeroed();
        self.raw.peek_tail(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.raw.size()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.raw.is_full()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[inline(always)]
    pub fn available(&self) -> usize {
        self.raw.available()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn destroy(&mut self) {
        self.raw.destroy();
    }

    pub fn as_raw(&self) -> &RingBuffer<'a> {
        &self.raw
    }
}

impl<T: Pod> TypedRing<'static, T> {
    pub fn owned(capacity: usize) -> Result<Self, RingError> {
        Self::init(None, capacity)
    }
}
