pub mod header;
pub mod region;

pub use header::FileHeader;
pub use region::MmapRegion;
