use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use bitflags::bitflags;
use calloop::ping::Ping;

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Widget needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// Widget needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

/// Unique identifier for a widget
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Generate a new unique widget ID
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Shared "a frame is wanted" flag for one host.
///
/// Clones share the same flag. Once a wakeup ping is installed, the first
/// request after each [`FrameRequest::take`] wakes the event loop.
#[derive(Clone, Default)]
pub struct FrameRequest {
    requested: Arc<AtomicBool>,
    wakeup: Arc<OnceLock<Ping>>,
}

impl FrameRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the wakeup handle for the owning event loop
    pub fn init_wakeup(&self, ping: Ping) {
        let _ = self.wakeup.set(ping);
    }

    /// Request that the event loop process a frame
    pub fn request(&self) {
        // Only ping on first request - avoids redundant syscalls when several setters run
        let was_requested = self.requested.swap(true, Ordering::Relaxed);
        if !was_requested {
            if let Some(ping) = self.wakeup.get() {
                ping.ping();
            }
        }
    }

    /// Check if a frame has been requested and clear the flag
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::Relaxed)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for FrameRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRequest")
            .field("requested", &self.is_requested())
            .field("has_wakeup", &self.wakeup.get().is_some())
            .finish()
    }
}
