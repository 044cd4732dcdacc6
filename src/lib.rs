//! Asynchronous access to another process's virtual memory and input queue.
//!
//! The memory layer reads and writes typed values and locates structures by
//! wildcard byte-pattern signature; every blocking syscall runs on the
//! worker pool so the cooperative scheduler is never stalled. The input
//! layer synthesizes mouse events against the target's window, serialized
//! through a per-client click lock.

pub mod core;
pub mod input;
pub mod memory;
pub mod process;

#[cfg(windows)]
pub mod windows;

pub use crate::core::types::{
    Address, MemoryError, MemoryRegion, MemoryResult, ModuleInfo, ProcessId, ScanResult,
    TypedValue, ValueType,
};
pub use input::{ClickOptions, CursorHook, MouseHandler, WindowMessenger};
pub use memory::{MemoryReader, MemoryScanner, Pattern, USER_SPACE_CEILING};
pub use process::ProcessMemory;

#[cfg(windows)]
pub use process::ProcessHandle;
