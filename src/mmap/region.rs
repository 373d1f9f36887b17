use super::FileHeader;
use crate::ring::{RingBuffer, RingError, region_len};
use log::debug;
use memmap2::MmapMut;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// A file-backed slot region. Rings built on it borrow the mapped bytes.
pub struct MmapRegion {
    _file: File,
    mmap: MmapMut,
    header: FileHeader,
}

impl MmapRegion {
    pub fn create<P: AsRef<Path>>(path: P, capacity: usize, element_size: usize) -> io::Result<Self> {
        let slots_len = region_len(capacity, element_size).map_err(invalid_input)?;
        let file_len = slots_len
            .checked_add(FileHeader::SIZE)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "region too large"))?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;
        file.set_len(file_len as u64)?;

        let mut mmap = unsafe { MmapMut::map_mut(&file)? };

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let header = FileHeader::new(now, capacity, element_size);
        mmap[..FileHeader::SIZE].copy_from_slice(bytemuck::bytes_of(&header));

        debug!(
            "created region {}: capacity={} element_size={}",
            path.as_ref().display(),
            capacity,
            element_size
        );

        Ok(Self {
            _file: file,
            mmap,
            header,
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;
        let len = file.metadata()?.len() as usize;

        if len < FileHeader::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "File too small for header",
            ));
        }

        let mmap = unsafe { MmapMut::map_mut(&file)? };
        let header: FileHeader = bytemuck::pod_read_unaligned(&mmap[..FileHeader::SIZE]);

        if !header.validate() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid file header",
            ));
        }
        if header.file_len() != Some(len) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "File length does not match header geometry",
            ));
        }

        debug!(
            "opened region {}: capacity={} element_size={}",
            path.as_ref().display(),
            header.capacity,
            header.element_size
        );

        Ok(Self {
            _file: file,
            mmap,
            header,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity as usize
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.header.element_size as usize
    }

    #[inline]
    pub fn created_at(&self) -> i64 {
        self.header.created_at
    }

    pub fn header(&self) -> FileHeader {
        self.header
    }

    pub fn slots(&self) -> &[u8] {
        &self.mmap[FileHeader::SIZE..]
    }

    pub fn slots_mut(&mut self) -> &mut [u8] {
        &mut self.mmap[FileHeader::SIZE..]
    }

    /// An empty ring over the mapped slots. Indices are not persisted.
    pub fn ring(&mut self) -> Result<RingBuffer<'_>, RingError> {
        let (capacity, element_size) = (self.capacity(), self.element_size());
        RingBuffer::borrowed(self.slots_mut(), capacity, element_size)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.mmap.flush()
    }

    pub fn flush_async(&self) -> io::Result<()> {
        self.mmap.flush_async()
    }
}

impl Drop for MmapRegion {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

fn invalid_input(err: RingError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}
