use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct FileHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub created_at: i64,
    pub capacity: u64,
    pub element_size: u64,
    pub _reserved: [u8; 32],
}

impl FileHeader {
    pub const SIZE: usize = 64;
    pub const MAGIC: [u8; 4] = *b"RNGQ";
    pub const VERSION: u32 = 1;

    pub fn new(created_at: i64, capacity: usize, element_size: usize) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            created_at,
            capacity: capacity as u64,
            element_size: element_size as u64,
            _reserved: [0; 32],
        }
    }

    #[inline]
    pub fn validate(&self) -> bool {
        self.magic == Self::MAGIC && self.version == Self::VERSION
    }

    /// Bytes the whole file needs: header plus every slot.
    pub fn file_len(&self) -> Option<usize> {
        let capacity = usize::try_from(self.capacity).ok()?;
        let element_size = usize::try_from(self.element_size).ok()?;
        capacity
            .checked_mul(element_size)?
            .checked_add(Self::SIZE)
    }
}

const _: () = assert!(std::mem::size_of::<FileHeader>() == FileHeader::SIZE);
