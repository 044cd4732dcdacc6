//! User32.dll bindings for window messaging and coordinate conversion

use crate::core::types::{MemoryError, MemoryResult};
use winapi::shared::windef::{HWND, POINT};
use winapi::um::winuser::{ClientToScreen, PostMessageW, SendMessageW};

/// Safe wrapper for ClientToScreen.
///
/// Converts client-area coordinates to absolute screen coordinates.
///
/// # Safety
/// The window handle must identify an existing window
pub unsafe fn client_to_screen(hwnd: HWND, x: i32, y: i32) -> MemoryResult<(i32, i32)> {
    let mut point = POINT { x, y };

    if ClientToScreen(hwnd, &mut point) == 0 {
        Err(MemoryError::CoordinateConversion)
    } else {
        Ok((point.x, point.y))
    }
}

/// Safe wrapper for SendMessageW. Blocks until the target handles the
/// message.
///
/// # Safety
/// The window handle must identify an existing window
pub unsafe fn send_message(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) {
    SendMessageW(hwnd, msg, wparam, lparam);
}

/// Safe wrapper for PostMessageW. Fire-and-forget.
///
/// # Safety
/// The window handle must identify an existing window
pub unsafe fn post_message(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> MemoryResult<()> {
    if PostMessageW(hwnd, msg, wparam, lparam) == 0 {
        Err(MemoryError::WindowsApi(format!(
            "PostMessageW failed for message 0x{:X}",
            msg
        )))
    } else {
        Ok(())
    }
}
