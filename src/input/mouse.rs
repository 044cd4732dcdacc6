//! Synthetic mouse input against the target window

use super::hook::CursorHook;
use crate::core::types::MemoryResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task;
use tracing::debug;

/// WM_MOUSEMOVE
pub const WM_MOUSEMOVE: u32 = 0x200;
/// WM_LBUTTONDOWN
pub const WM_LBUTTONDOWN: u32 = 0x201;
/// WM_RBUTTONDOWN
pub const WM_RBUTTONDOWN: u32 = 0x204;

/// Window messaging surface for the input synthesizer.
///
/// The Windows implementation wraps a real window handle; tests substitute a
/// recording fake.
pub trait WindowMessenger: Send + Sync + 'static {
    /// Maps client-area coordinates to absolute screen coordinates.
    ///
    /// Fails with [`crate::MemoryError::CoordinateConversion`] when the OS
    /// call reports failure.
    fn client_to_screen(&self, x: i32, y: i32) -> MemoryResult<(i32, i32)>;

    /// Synchronous message dispatch; blocks until the target handles it
    fn send_message(&self, msg: u32, wparam: usize, lparam: isize) -> MemoryResult<()>;

    /// Fire-and-forget message dispatch
    fn post_message(&self, msg: u32, wparam: usize, lparam: isize) -> MemoryResult<()>;
}

/// Options for [`MouseHandler::click`]
#[derive(Debug, Clone, Copy)]
pub struct ClickOptions {
    /// Right instead of left click
    pub right_click: bool,
    /// Delay between button-down and button-up
    pub sleep: Duration,
    /// Post instead of send; does not affect serialization
    pub use_post: bool,
}

impl Default for ClickOptions {
    fn default() -> Self {
        ClickOptions {
            right_click: false,
            sleep: Duration::ZERO,
            use_post: false,
        }
    }
}

/// Handles clicking and moving the virtual mouse position.
///
/// One handler exists per client; the click lock is constructed with it and
/// serializes the down/sleep/up sequence across all callers, so two
/// concurrent clicks can never interleave their button states.
pub struct MouseHandler<W: WindowMessenger, H: CursorHook> {
    window: Arc<W>,
    hook: Arc<H>,
    click_lock: Mutex<()>,
}

impl<W: WindowMessenger, H: CursorHook> MouseHandler<W, H> {
    /// Creates a handler over the target window and the cursor hook contract
    pub fn new(window: Arc<W>, hook: Arc<H>) -> Self {
        MouseHandler {
            window,
            hook,
            click_lock: Mutex::new(()),
        }
    }

    /// Activates the mouseless cursor hook
    pub async fn activate_mouseless(&self) -> MemoryResult<()> {
        let hook = Arc::clone(&self.hook);
        task::spawn_blocking(move || hook.activate()).await?
    }

    async fn dispatch(
        &self,
        msg: u32,
        wparam: usize,
        lparam: isize,
        use_post: bool,
    ) -> MemoryResult<()> {
        let window = Arc::clone(&self.window);
        task::spawn_blocking(move || {
            if use_post {
                window.post_message(msg, wparam, lparam)
            } else {
                window.send_message(msg, wparam, lparam)
            }
        })
        .await?
    }

    /// Moves the virtual cursor to `x`, `y`.
    ///
    /// With `convert_from_client` the coordinates are client-relative and get
    /// mapped to screen coordinates first. The resulting position is written
    /// through the hook, then a mouse-move message is dispatched so the
    /// target highlights hovered elements.
    pub async fn set_mouse_position(
        &self,
        x: i32,
        y: i32,
        convert_from_client: bool,
        use_post: bool,
    ) -> MemoryResult<()> {
        let (x, y) = if convert_from_client {
            self.window.client_to_screen(x, y)?
        } else {
            (x, y)
        };

        debug!(x, y, "setting mouse position");

        let hook = Arc::clone(&self.hook);
        task::spawn_blocking(move || hook.write_mouse_position(x, y)).await??;

        // parameters are irrelevant for the move message
        self.dispatch(WM_MOUSEMOVE, 0, 0, use_post).await
    }

    /// Clicks at client-relative `x`, `y`.
    ///
    /// The whole position/down/sleep/up sequence runs under the click lock;
    /// the lock is released when the guard drops, including on failure.
    pub async fn click(&self, x: i32, y: i32, options: ClickOptions) -> MemoryResult<()> {
        let button_down = if options.right_click {
            WM_RBUTTONDOWN
        } else {
            WM_LBUTTONDOWN
        };

        let _guard = self.click_lock.lock().await;

        self.set_mouse_position(x, y, true, options.use_post).await?;
        self.dispatch(button_down, 1, 0, options.use_post).await?;
        if !options.sleep.is_zero() {
            tokio::time::sleep(options.sleep).await;
        }
        self.dispatch(button_down + 1, 0, 0, options.use_post).await
    }
}
