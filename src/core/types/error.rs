//! Crate-wide error types

use thiserror::Error;

/// Main error type for memory and input operations
#[derive(Error, Debug)]
pub enum MemoryError {
    /// The target process exited. Detected reactively, after a syscall has
    /// already failed, never as a pre-check on the hot path.
    #[error("client must be running to perform this action")]
    ClientClosed,

    #[error("unable to read memory at address 0x{address:X}")]
    ReadFailed { address: usize },

    #[error("unable to write memory at address 0x{address:X}")]
    WriteFailed { address: usize },

    #[error("{0} is not a valid data type")]
    InvalidType(String),

    #[error("invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("pattern {0} failed")]
    PatternNotFound(String),

    #[error("got {count} results for pattern {pattern}")]
    PatternAmbiguous { pattern: String, count: usize },

    #[error("invalid pattern format: {0}")]
    InvalidPattern(String),

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("client to screen conversion failed")]
    CoordinateConversion,

    #[error("{0} is not active")]
    HookNotActive(String),

    #[error("{0} was already activated")]
    HookAlreadyActive(String),

    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    #[error("windows API: {0}")]
    WindowsApi(String),

    #[error("background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a read failed error for an address
    pub fn read_failed(address: usize) -> Self {
        MemoryError::ReadFailed { address }
    }

    /// Creates a write failed error for an address
    pub fn write_failed(address: usize) -> Self {
        MemoryError::WriteFailed { address }
    }

    /// Creates a pattern ambiguity error
    pub fn pattern_ambiguous(pattern: impl Into<String>, count: usize) -> Self {
        MemoryError::PatternAmbiguous {
            pattern: pattern.into(),
            count,
        }
    }
}
