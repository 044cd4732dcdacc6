//! Contract consumed from the hook-injection layer
//!
//! The in-process trampoline subsystem is an external collaborator; the
//! input synthesizer only needs these two calls from it.

use crate::core::types::MemoryResult;

/// The mouseless cursor hook: lets the target track a virtual cursor
/// position without real OS mouse movement.
pub trait CursorHook: Send + Sync + 'static {
    /// Activates the mouseless cursor mode.
    ///
    /// Fails with [`crate::MemoryError::HookAlreadyActive`] when already on.
    fn activate(&self) -> MemoryResult<()>;

    /// Stores absolute screen coordinates where the target's input path
    /// reads the cursor position from.
    fn write_mouse_position(&self, x: i32, y: i32) -> MemoryResult<()>;
}
