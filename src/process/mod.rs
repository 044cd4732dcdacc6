//! Process handle abstraction
//!
//! `ProcessMemory` is the seam between the async memory layer and the
//! platform: the Windows `ProcessHandle` implements it over raw syscalls,
//! and tests implement it over an in-memory address space.

use crate::core::types::{MemoryRegion, MemoryResult, ModuleInfo};

#[cfg(windows)]
mod handle;

#[cfg(windows)]
pub use handle::{access, ProcessHandle};

/// Raw, blocking access to another process's virtual memory.
///
/// Every method may block on a syscall; callers above this trait are
/// responsible for moving calls off the cooperative scheduler. The
/// underlying handle is assumed safe for concurrent use, so implementations
/// take `&self` and impose no extra locking.
pub trait ProcessMemory: Send + Sync + 'static {
    /// Whether the target process is still running.
    ///
    /// Must not error on a dead process; it reports false. Used as a
    /// secondary diagnostic after a read/write already failed, never as a
    /// pre-check on the hot path.
    fn is_running(&self) -> bool;

    /// Reads exactly `buf.len()` bytes at `address`. All-or-nothing.
    fn read(&self, address: usize, buf: &mut [u8]) -> MemoryResult<()>;

    /// Writes exactly `data.len()` bytes at `address`. All-or-nothing.
    fn write(&self, address: usize, data: &[u8]) -> MemoryResult<()>;

    /// Queries the region containing `address`
    fn query_region(&self, address: usize) -> MemoryResult<MemoryRegion>;

    /// The process's base (executable) module
    fn base_module(&self) -> MemoryResult<ModuleInfo>;

    /// Looks up a loaded module by name, case-insensitively
    fn module_by_name(&self, name: &str) -> MemoryResult<ModuleInfo>;

    /// Allocates `size` bytes of committed, read-write memory in the target
    fn allocate(&self, size: usize) -> MemoryResult<usize>;

    /// Frees an allocation previously returned by [`ProcessMemory::allocate`]
    fn free(&self, address: usize) -> MemoryResult<()>;
}
