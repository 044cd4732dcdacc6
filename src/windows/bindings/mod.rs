//! Raw Windows API wrappers

pub mod kernel32;
pub mod psapi;
pub mod user32;
