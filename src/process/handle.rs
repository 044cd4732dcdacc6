//! Safe process handle wrapper with RAII semantics

use super::ProcessMemory;
use crate::core::types::{Address, MemoryError, MemoryRegion, MemoryResult, ModuleInfo};
use crate::windows::bindings::{kernel32, psapi};
use crate::windows::types::Handle;
use std::fmt;
use winapi::um::winnt::HANDLE;

/// Process access rights, as passed to OpenProcess
pub mod access {
    pub const ALL: u32 = 0x1F_FFFF;
    pub const QUERY_INFORMATION: u32 = 0x0400;
    pub const VM_READ: u32 = 0x0010;
    pub const VM_WRITE: u32 = 0x0020;
    pub const VM_OPERATION: u32 = 0x0008;

    /// Everything the memory and scan layers need
    pub const MEMORY: u32 = QUERY_INFORMATION | VM_READ | VM_WRITE | VM_OPERATION;
}

/// Owns the handle to the target process
pub struct ProcessHandle {
    handle: Handle,
    pid: u32,
}

impl ProcessHandle {
    /// Wraps an already-opened handle. Attachment is the caller's concern.
    pub fn from_raw_handle(handle: HANDLE, pid: u32) -> Self {
        ProcessHandle {
            handle: Handle::new(handle),
            pid,
        }
    }

    /// Opens a process with the given [`access`] rights
    pub fn open(pid: u32, access: u32) -> MemoryResult<Self> {
        let raw = kernel32::open_process(pid, access)?;
        Ok(ProcessHandle {
            handle: Handle::new(raw),
            pid,
        })
    }

    /// Opens a process for memory reading, writing and scanning
    pub fn open_for_memory_access(pid: u32) -> MemoryResult<Self> {
        Self::open(pid, access::MEMORY)
    }

    /// Get the process ID
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    fn modules(&self) -> MemoryResult<Vec<ModuleInfo>> {
        unsafe { psapi::module_entries(self.handle.raw()) }
    }
}

impl ProcessMemory for ProcessHandle {
    fn is_running(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        unsafe { kernel32::is_process_alive(self.handle.raw()) }
    }

    fn read(&self, address: usize, buf: &mut [u8]) -> MemoryResult<()> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "process handle is null".to_string(),
            ));
        }
        unsafe { kernel32::read_process_memory(self.handle.raw(), address, buf) }
    }

    fn write(&self, address: usize, data: &[u8]) -> MemoryResult<()> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "process handle is null".to_string(),
            ));
        }
        unsafe { kernel32::write_process_memory(self.handle.raw(), address, data) }
    }

    fn query_region(&self, address: usize) -> MemoryResult<MemoryRegion> {
        let mbi = unsafe { kernel32::virtual_query_ex(self.handle.raw(), address)? };
        Ok(MemoryRegion::new(
            Address::new(mbi.BaseAddress as usize),
            mbi.RegionSize,
            mbi.Protect,
            mbi.State,
        ))
    }

    fn base_module(&self) -> MemoryResult<ModuleInfo> {
        // the first enumerated module is the executable image
        self.modules()?
            .into_iter()
            .next()
            .ok_or_else(|| MemoryError::ModuleNotFound("base module".to_string()))
    }

    fn module_by_name(&self, name: &str) -> MemoryResult<ModuleInfo> {
        self.modules()?
            .into_iter()
            .find(|module| module.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MemoryError::ModuleNotFound(name.to_string()))
    }

    fn allocate(&self, size: usize) -> MemoryResult<usize> {
        unsafe { kernel32::virtual_alloc_ex(self.handle.raw(), size) }
    }

    fn free(&self, address: usize) -> MemoryResult<()> {
        unsafe { kernel32::virtual_free_ex(self.handle.raw(), address) }
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessHandle(pid={}, valid={})",
            self.pid,
            self.is_valid()
        )
    }
}
