//! Windows implementation of the window messaging surface

use super::mouse::WindowMessenger;
use crate::core::types::MemoryResult;
use crate::windows::bindings::user32;
use winapi::shared::windef::HWND;

/// The target application's top-level window
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Wraps an already-located window handle
    pub fn new(hwnd: HWND) -> Self {
        Window { hwnd }
    }

    /// Get the raw window handle
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

// window handles are usable from any thread for messaging purposes
unsafe impl Send for Window {}
unsafe impl Sync for Window {}

impl WindowMessenger for Window {
    fn client_to_screen(&self, x: i32, y: i32) -> MemoryResult<(i32, i32)> {
        unsafe { user32::client_to_screen(self.hwnd, x, y) }
    }

    fn send_message(&self, msg: u32, wparam: usize, lparam: isize) -> MemoryResult<()> {
        unsafe { user32::send_message(self.hwnd, msg, wparam, lparam) };
        Ok(())
    }

    fn post_message(&self, msg: u32, wparam: usize, lparam: isize) -> MemoryResult<()> {
        unsafe { user32::post_message(self.hwnd, msg, wparam, lparam) }
    }
}
