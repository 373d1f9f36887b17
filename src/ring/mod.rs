pub mod buffer;
pub mod ring_error;
pub mod storage;
pub mod typed;

pub use buffer::{RingBuffer, region_len};
pub use ring_error::*;
pub use storage::Storage;
pub use typed::*;
