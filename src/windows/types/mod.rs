//! Windows-specific wrapper types

mod handle;

pub use handle::Handle;
