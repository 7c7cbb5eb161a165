//! Per-display-frame tick scheduling.

/// Handle to one requested tick; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Cooperative "run before the next repaint" scheduler.
///
/// At most one request is pending. A new request supersedes the previous
/// one, and the host fires the pending request once per display frame.
#[derive(Debug, Default)]
pub struct FrameClock {
    next_id: u64,
    pending: Option<TickHandle>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a tick for the next display frame.
    pub fn request(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Cancel `handle` if it is still pending. Returns whether it was.
    pub fn cancel(&mut self, handle: TickHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Take the pending request, if any, for the display frame starting now.
    pub fn fire(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.pending == Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_fire() {
        let mut clock = FrameClock::new();
        let handle = clock.request();
        assert!(clock.is_pending(handle));
        assert_eq!(clock.fire(), Some(handle));
        assert_eq!(clock.fire(), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = FrameClock::new();
        let handle = clock.request();
        assert!(clock.cancel(handle));
        assert!(!clock.cancel(handle));
        assert_eq!(clock.fire(), None);
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut clock = FrameClock::new();
        let old = clock.request();
        let new = clock.request();
        assert_ne!(old, new);
        assert!(!clock.is_pending(old));
        // Cancelling the stale handle must not cancel the live one
        assert!(!clock.cancel(old));
        assert_eq!(clock.fire(), Some(new));
    }
}
