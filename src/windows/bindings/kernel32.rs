//! Kernel32.dll bindings for process and memory operations

use crate::core::types::{MemoryError, MemoryResult};
use std::mem;
use std::ptr;
use winapi::shared::minwindef::{DWORD, FALSE, LPVOID};
use winapi::um::memoryapi::{
    ReadProcessMemory, VirtualAllocEx, VirtualFreeEx, VirtualQueryEx, WriteProcessMemory,
};
use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
use winapi::um::winnt::{
    HANDLE, MEMORY_BASIC_INFORMATION, MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_READWRITE,
};

// exit code reported for processes that have not terminated
const STILL_ACTIVE: DWORD = 259;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> MemoryResult<HANDLE> {
    let handle = unsafe { OpenProcess(desired_access, FALSE, pid) };
    if handle.is_null() {
        return Err(MemoryError::WindowsApi(format!(
            "OpenProcess failed for PID {}",
            pid
        )));
    }
    Ok(handle)
}

/// Whether the process behind `handle` is still running.
///
/// # Safety
/// The handle must be a valid process handle
pub unsafe fn is_process_alive(handle: HANDLE) -> bool {
    let mut exit_code: DWORD = 0;
    GetExitCodeProcess(handle, &mut exit_code) != FALSE && exit_code == STILL_ACTIVE
}

/// Safe wrapper for ReadProcessMemory. All-or-nothing: a short read fails.
///
/// # Safety
/// The handle must be a valid process handle with appropriate access rights
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: usize,
    buffer: &mut [u8],
) -> MemoryResult<()> {
    let mut transferred = 0;
    let ok = ReadProcessMemory(
        handle,
        address as LPVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut transferred,
    ) != FALSE;

    if ok && transferred == buffer.len() {
        Ok(())
    } else {
        Err(MemoryError::read_failed(address))
    }
}

/// Safe wrapper for WriteProcessMemory. All-or-nothing: a short write fails.
///
/// # Safety
/// The handle must be a valid process handle with appropriate access rights
pub unsafe fn write_process_memory(
    handle: HANDLE,
    address: usize,
    data: &[u8],
) -> MemoryResult<()> {
    let mut transferred = 0;
    let ok = WriteProcessMemory(
        handle,
        address as LPVOID,
        data.as_ptr() as LPVOID,
        data.len(),
        &mut transferred,
    ) != FALSE;

    if ok && transferred == data.len() {
        Ok(())
    } else {
        Err(MemoryError::write_failed(address))
    }
}

/// Safe wrapper for VirtualQueryEx
///
/// # Safety
/// The handle must be a valid process handle with appropriate access rights
pub unsafe fn virtual_query_ex(
    handle: HANDLE,
    address: usize,
) -> MemoryResult<MEMORY_BASIC_INFORMATION> {
    let mut mbi: MEMORY_BASIC_INFORMATION = mem::zeroed();
    let written = VirtualQueryEx(
        handle,
        address as LPVOID,
        &mut mbi,
        mem::size_of::<MEMORY_BASIC_INFORMATION>(),
    );

    if written == 0 {
        return Err(MemoryError::WindowsApi(format!(
            "VirtualQueryEx failed for address 0x{:X}",
            address
        )));
    }
    Ok(mbi)
}

/// Safe wrapper for VirtualAllocEx, committing read-write pages
///
/// # Safety
/// The handle must be a valid process handle with VM_OPERATION access
pub unsafe fn virtual_alloc_ex(handle: HANDLE, size: usize) -> MemoryResult<usize> {
    let base = VirtualAllocEx(
        handle,
        ptr::null_mut(),
        size,
        MEM_COMMIT | MEM_RESERVE,
        PAGE_READWRITE,
    );

    if base.is_null() {
        return Err(MemoryError::WindowsApi(format!(
            "VirtualAllocEx failed for size {}",
            size
        )));
    }
    Ok(base as usize)
}

/// Safe wrapper for VirtualFreeEx
///
/// # Safety
/// The handle must be a valid process handle; `address` must be the base of
/// an allocation made with [`virtual_alloc_ex`]
pub unsafe fn virtual_free_ex(handle: HANDLE, address: usize) -> MemoryResult<()> {
    if VirtualFreeEx(handle, address as LPVOID, 0, MEM_RELEASE) == FALSE {
        return Err(MemoryError::WindowsApi(format!(
            "VirtualFreeEx failed for address 0x{:X}",
            address
        )));
    }
    Ok(())
}
