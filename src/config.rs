use crate::ring::{RingBuffer, RingError, region_len};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_CAPACITY: &str = "RINGQ_CAPACITY";
pub const ENV_ELEMENT_SIZE: &str = "RINGQ_ELEMENT_SIZE";
pub const ENV_MMAP_PATH: &str = "RINGQ_MMAP_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error(transparent)]
    Ring(#[from] RingError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    /// Number of slots.
    pub capacity: usize,
    /// Bytes per slot.
    pub element_size: usize,
    /// When set, slots live in this file instead of on the heap.
    pub mmap_path: Option<PathBuf>,
}

impl Default for RingConfig {
    fn default() -> Self {
        RingConfig {
            capacity: 1024,
            element_size: 1,
            mmap_path: None,
        }
    }
}

impl RingConfig {
    pub fn byte_queue(capacity: usize) -> Self {
        RingConfig {
            capacity,
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = RingConfig {
            capacity: parse_usize(&lookup, ENV_CAPACITY)?.unwrap_or(defaults.capacity),
            element_size: parse_usize(&lookup, ENV_ELEMENT_SIZE)?
                .unwrap_or(defaults.element_size),
            mmap_path: lookup(ENV_MMAP_PATH)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        };
        config.region_len()?;
        Ok(config)
    }

    pub fn region_len(&self) -> Result<usize, RingError> {
        region_len(self.capacity, self.element_size)
    }

    pub fn build_owned(&self) -> Result<RingBuffer<'static>, RingError> {
        RingBuffer::owned(self.capacity, self.element_size)
    }

    pub fn build_borrowed<'a>(&self, storage: &'a mut [u8]) -> Result<RingBuffer<'a>, RingError> {
        RingBuffer::borrowed(storage, self.capacity, self.element_size)
    }
}

fn parse_usize<F>(lookup: &F, key: &'static str) -> Result<Option<usize>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
