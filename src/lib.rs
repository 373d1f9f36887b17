pub mod config;
pub mod mmap;
pub mod ring;
