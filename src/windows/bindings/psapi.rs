//! PSAPI.dll bindings for module enumeration

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo};
use std::ffi::OsString;
use std::mem;
use std::os::windows::ffi::OsStringExt;
use std::ptr;
use winapi::shared::minwindef::{FALSE, HMODULE, MAX_PATH};
use winapi::um::psapi::{
    EnumProcessModules, GetModuleBaseNameW, GetModuleInformation, MODULEINFO,
};
use winapi::um::winnt::HANDLE;

/// Every module loaded in the target process, in load order. The first
/// entry is the executable image itself.
///
/// # Safety
/// The handle must be a valid process handle with query access
pub unsafe fn module_entries(handle: HANDLE) -> MemoryResult<Vec<ModuleInfo>> {
    let handles = module_handles(handle)?;

    let mut entries = Vec::with_capacity(handles.len());
    for module in handles {
        let mut info: MODULEINFO = mem::zeroed();
        if GetModuleInformation(handle, module, &mut info, mem::size_of::<MODULEINFO>() as u32)
            == FALSE
        {
            return Err(MemoryError::WindowsApi(
                "GetModuleInformation failed".to_string(),
            ));
        }

        entries.push(ModuleInfo::new(
            module_base_name(handle, module)?,
            Address::new(info.lpBaseOfDll as usize),
            info.SizeOfImage as usize,
        ));
    }

    Ok(entries)
}

unsafe fn module_handles(handle: HANDLE) -> MemoryResult<Vec<HMODULE>> {
    // first call sizes the array, second fills it; a module loading in
    // between just means a slightly stale snapshot
    let mut needed = 0u32;
    if EnumProcessModules(handle, ptr::null_mut(), 0, &mut needed) == FALSE {
        return Err(MemoryError::WindowsApi(
            "EnumProcessModules failed".to_string(),
        ));
    }

    let capacity = needed as usize / mem::size_of::<HMODULE>();
    let mut handles = vec![ptr::null_mut(); capacity.max(1)];
    if EnumProcessModules(handle, handles.as_mut_ptr(), needed, &mut needed) == FALSE {
        return Err(MemoryError::WindowsApi(
            "EnumProcessModules failed".to_string(),
        ));
    }

    handles.truncate(needed as usize / mem::size_of::<HMODULE>());
    Ok(handles)
}

unsafe fn module_base_name(handle: HANDLE, module: HMODULE) -> MemoryResult<String> {
    let mut wide = [0u16; MAX_PATH];
    let written = GetModuleBaseNameW(handle, module, wide.as_mut_ptr(), MAX_PATH as u32);
    if written == 0 {
        return Err(MemoryError::WindowsApi(
            "GetModuleBaseNameW failed".to_string(),
        ));
    }

    OsString::from_wide(&wide[..written as usize])
        .into_string()
        .map_err(|_| MemoryError::WindowsApi("module name is not valid unicode".to_string()))
}
