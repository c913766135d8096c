use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "keep reading" switch.
///
/// Starts raised. The controller lowers it once; the reader notices at the
/// top of its next frame or within one transport read timeout.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop_requested(&self) -> bool {
        !self.is_running()
    }

    /// Ask the reader to stop. Does not wait for it.
    pub fn request_stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}
