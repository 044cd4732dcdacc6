//! Input synthesis against the target process's window

mod hook;
mod mouse;

#[cfg(windows)]
mod window;

pub use hook::CursorHook;
pub use mouse::{
    ClickOptions, MouseHandler, WindowMessenger, WM_LBUTTONDOWN, WM_MOUSEMOVE, WM_RBUTTONDOWN,
};

#[cfg(windows)]
pub use window::Window;
