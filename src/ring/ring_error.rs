use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("Invalid argument (capacity {capacity}, element size {element_size}): {reason}")]
    InvalidArgument {
        capacity: usize,
        element_size: usize,
        reason: &'static str,
    },
    #[error("Borrowed storage too small: required {required} bytes, available {available} bytes")]
    StorageTooSmall { required: usize, available: usize },
    #[error("Out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },
    #[error("Queue full: all {capacity} slots are in use")]
    QueueFull { capacity: usize },
    #[error("Queue empty")]
    QueueEmpty,
    #[error("Element size mismatch: expected {expected} bytes, got {actual} bytes")]
    ElementSize { expected: usize, actual: usize },
}

impl RingError {
    /// Construction-time errors: the arguments can never produce a usable ring.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::StorageTooSmall { .. }
        )
    }
}
