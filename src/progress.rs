//! Observable render state.
//!
//! A [`RenderReporter`] publishes progress, the busy flag and the last
//! failure message over a `tokio::sync::watch` channel, so a control
//! surface can subscribe and redraw whenever the state changes.

use std::sync::Arc;

use tokio::sync::watch;

/// Snapshot of the render state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderStatus {
    /// Fraction of elements emitted, in `[0, 1]`
    pub progress: f32,
    /// Whether a render is in flight
    pub rendering: bool,
    /// Message of the last failed render, cleared when a new one starts
    pub error: Option<String>,
}

/// Publisher of [`RenderStatus`] updates. Clones share one channel.
#[derive(Debug, Clone)]
pub struct RenderReporter {
    tx: Arc<watch::Sender<RenderStatus>>,
}

impl Default for RenderReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderReporter {
    /// Create a reporter in the idle state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RenderStatus::default());
        Self { tx: Arc::new(tx) }
    }

    /// Receive every subsequent status change.
    pub fn subscribe(&self) -> watch::Receiver<RenderStatus> {
        self.tx.subscribe()
    }

    /// Current status.
    pub fn status(&self) -> RenderStatus {
        self.tx.borrow().clone()
    }

    /// Current progress fraction.
    pub fn progress(&self) -> f32 {
        self.tx.borrow().progress
    }

    /// Whether a render is in flight; the trigger should be disabled while
    /// this is true.
    pub fn is_rendering(&self) -> bool {
        self.tx.borrow().rendering
    }

    /// Message of the last failed render.
    pub fn last_error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    /// Enter the rendering state. Progress returns to zero and the busy
    /// flag clears when the returned guard is dropped.
    pub fn begin(&self) -> RenderGuard<'_> {
        self.tx.send_modify(|status| {
            status.progress = 0.0;
            status.rendering = true;
            status.error = None;
        });
        RenderGuard { reporter: self }
    }

    /// Publish `completed` out of `total` elements.
    pub fn report(&self, completed: usize, total: usize) {
        let progress = if total == 0 {
            0.0
        } else {
            completed as f32 / total as f32
        };
        self.tx.send_modify(|status| status.progress = progress.clamp(0.0, 1.0));
    }

    /// Record a failure message.
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|status| status.error = Some(message));
    }

    fn reset(&self) {
        self.tx.send_modify(|status| {
            status.progress = 0.0;
            status.rendering = false;
        });
    }
}

/// Resets progress and the busy flag when dropped.
#[must_use = "the render state resets as soon as the guard is dropped"]
#[derive(Debug)]
pub struct RenderGuard<'a> {
    reporter: &'a RenderReporter,
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.reporter.reset();
    }
}
