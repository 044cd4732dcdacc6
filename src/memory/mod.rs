//! Memory access: byte-level and typed I/O plus pattern scanning
//!
//! Everything here dispatches its blocking syscalls through the worker pool;
//! no operation in this module blocks the cooperative scheduler.

mod pattern;
mod reader;
mod scanner;

pub use pattern::Pattern;
pub use reader::MemoryReader;
pub use scanner::{MemoryScanner, USER_SPACE_CEILING};
