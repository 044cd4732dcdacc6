//! Core module containing the fundamental types used throughout memwalker

pub mod types;

pub use types::{
    Address, MemoryError, MemoryRegion, MemoryResult, ModuleInfo, ProcessId, ScanResult,
    TypedValue, ValueType,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
