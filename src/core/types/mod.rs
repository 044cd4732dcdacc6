//! Foundational types shared across the crate

mod address;
mod error;
mod module;
mod region;
mod scan;
mod value;

pub use address::Address;
pub use error::{MemoryError, MemoryResult};
pub use module::ModuleInfo;
pub use region::{
    MemoryRegion, MEM_COMMIT, PAGE_EXECUTE_READ, PAGE_EXECUTE_READWRITE, PAGE_READONLY,
    PAGE_READWRITE,
};
pub use scan::ScanResult;
pub use value::{TypedValue, ValueType};

/// Process identifier
pub type ProcessId = u32;
