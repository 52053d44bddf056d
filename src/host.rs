//! Callbacks into the host UI framework.

use std::fmt;
use std::sync::Arc;

/// Services the embedding view provides to the core.
///
/// Both calls only schedule work; the host runs the actual layout or paint
/// pass later on its UI thread.
pub trait HostView: Send + Sync {
    /// Schedule a repaint.
    fn post_invalidate(&self);

    /// Schedule a layout pass before the next paint.
    fn request_layout(&self);
}

/// Shared handle to a host view.
pub type SharedHost = Arc<dyn HostView>;

/// Debounced redraw request.
///
/// While a redraw is pending further requests are dropped; the owning
/// component clears the flag when it is drawn.
#[derive(Clone)]
pub(crate) struct RedrawRequest {
    host: Option<SharedHost>,
    pending: bool,
}

impl RedrawRequest {
    /// A fresh component has never been painted, so its first paint is
    /// already due.
    pub(crate) fn new() -> Self {
        Self {
            host: None,
            pending: true,
        }
    }

    pub(crate) fn attach(&mut self, host: SharedHost) {
        self.host = Some(host);
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Request a redraw. Returns `true` if this call posted one.
    pub(crate) fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        if let Some(host) = &self.host {
            host.post_invalidate();
        }
        true
    }

    /// Mark the pending redraw as serviced.
    pub(crate) fn serviced(&mut self) {
        self.pending = false;
    }

    pub(crate) fn request_layout(&self) {
        if let Some(host) = &self.host {
            host.request_layout();
        }
    }
}

impl Default for RedrawRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RedrawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedrawRequest")
            .field("attached", &self.host.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::HostView;

    /// Host double that counts the calls it receives.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        invalidations: AtomicUsize,
        layouts: AtomicUsize,
    }

    impl RecordingHost {
        pub(crate) fn invalidations(&self) -> usize {
            self.invalidations.load(Ordering::SeqCst)
        }

        pub(crate) fn layouts(&self) -> usize {
            self.layouts.load(Ordering::SeqCst)
        }
    }

    impl HostView for RecordingHost {
        fn post_invalidate(&self) {
            self.invalidations.fetch_add(1, Ordering::SeqCst);
        }

        fn request_layout(&self) {
            self.layouts.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn requests_coalesce_until_serviced() {
        let host = Arc::new(RecordingHost::default());
        let mut redraw = RedrawRequest::new();
        redraw.attach(host.clone());

        assert!(!redraw.request(), "first paint is already due");
        redraw.serviced();
        assert!(redraw.request());
        assert!(!redraw.request());
        assert!(!redraw.request());
        assert_eq!(host.invalidations(), 1);

        redraw.serviced();
        assert!(redraw.request());
        assert_eq!(host.invalidations(), 2);
    }

    #[test]
    fn detached_request_only_tracks_state() {
        let mut redraw = RedrawRequest::new();
        redraw.serviced();
        assert!(redraw.request());
        assert!(redraw.is_pending());
        redraw.request_layout();
    }
}
