//! Owned process handle with automatic close

use std::fmt;
use std::ptr;
use winapi::um::handleapi::CloseHandle;
use winapi::um::winnt::HANDLE;

/// Owns a Windows HANDLE and closes it on drop.
pub struct Handle(HANDLE);

impl Handle {
    pub fn new(raw: HANDLE) -> Self {
        Handle(raw)
    }

    pub fn null() -> Self {
        Handle(ptr::null_mut())
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// The raw handle, still owned by this wrapper
    pub fn raw(&self) -> HANDLE {
        self.0
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // close failures on teardown are unrecoverable and ignored
            unsafe { CloseHandle(self.0) };
        }
    }
}

// HANDLEs are process-local kernel object references, usable from any thread
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", self.0)
    }
}
