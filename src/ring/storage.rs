use super::RingError;
use std::fmt;

/// Backing bytes of a ring buffer, tagged with who owns them.
///
/// Only `Owned` storage is ever released by the ring. `Borrowed` storage is a
/// plain `&mut` borrow, so its lifetime stays with the caller.
pub enum Storage<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Box<[u8]>),
    Released,
}

impl<'a> Storage<'a> {
    pub(crate) fn allocate(len: usize) -> Result<Self, RingError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| RingError::OutOfMemory { bytes: len })?;
        buf.resize(len, 0);
        Ok(Self::Owned(buf.into_boxed_slice()))
    }

    /// Attaches to the first `len` bytes of `region`; the tail of a larger
    /// region is left alone.
    pub(crate) fn borrow(region: &'a mut [u8], len: usize) -> Result<Self, RingError> {
        if region.len() < len {
            return Err(RingError::StorageTooSmall {
                required: len,
                available: region.len(),
            });
        }
        Ok(Self::Borrowed(&mut region[..len]))
    }

    #[inline(always)]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    #[inline(always)]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    #[inline(always)]
    pub fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Self::Borrowed(buf) => buf,
            Self::Owned(buf) => buf,
            Self::Released => &[],
        }
    }

    #[inline(always)]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Borrowed(buf) => buf,
            Self::Owned(buf) => buf,
            Self::Released => &mut [],
        }
    }

    /// Drops owned bytes. Returns how many bytes were freed; borrowed and
    /// already released storage free nothing.
    pub(crate) fn release(&mut self) -> usize {
        match self {
            Self::Owned(buf) => {
                let freed = buf.len();
                *self = Self::Released;
                freed
            }
            Self::Borrowed(_) | Self::Released => 0,
        }
    }
}

impl fmt::Debug for Storage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(buf) => write!(f, "Borrowed({} bytes)", buf.len()),
            Self::Owned(buf) => write!(f, "Owned({} bytes)", buf.len()),
            Self::Released => f.write_str("Released"),
        }
    }
}
