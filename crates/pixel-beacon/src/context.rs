//! Application-held tracker handle.
//!
//! [`TrackerContext`] lives in the application's composition root and is
//! passed (or cloned) to whatever code tracks events. It starts out
//! uninitialized; every operation fails with [`Error::Uninitialized`] until
//! [`TrackerContext::init`] succeeds.

use crate::tracker::{PendingEvent, PixelTracker};
use crate::types::StandardEvent;
use crate::Error;
use std::sync::Arc;
use tracing::info;

/// Tracker lifecycle state.
#[derive(Debug, Clone, Default)]
pub enum TrackerState {
    #[default]
    Uninitialized,
    Ready(Arc<PixelTracker>),
}

/// Caller-held handle to the application's pixel tracker.
#[derive(Debug, Clone, Default)]
pub struct TrackerContext {
    state: TrackerState,
}

impl TrackerContext {
    /// Create an uninitialized context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize with a live tracker for `pixel_id`, replacing any previous one.
    pub fn init(&mut self, pixel_id: impl Into<String>) -> Result<(), Error> {
        let tracker = PixelTracker::builder(pixel_id).build()?;
        self.init_with(tracker);
        Ok(())
    }

    /// Initialize with a pre-built tracker.
    pub fn init_with(&mut self, tracker: PixelTracker) {
        info!(pixel_id = %tracker.pixel_id(), "tracker context initialized");
        self.state = TrackerState::Ready(Arc::new(tracker));
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, TrackerState::Ready(_))
    }

    /// Get the tracker, or [`Error::Uninitialized`].
    pub fn tracker(&self) -> Result<&PixelTracker, Error> {
        match &self.state {
            TrackerState::Ready(tracker) => Ok(tracker.as_ref()),
            TrackerState::Uninitialized => Err(Error::Uninitialized),
        }
    }

    pub fn track(&self, event: StandardEvent) -> Result<PendingEvent<'_>, Error> {
        Ok(self.tracker()?.track(event))
    }

    pub fn track_custom(&self, event_name: impl Into<String>) -> Result<PendingEvent<'_>, Error> {
        Ok(self.tracker()?.track_custom(event_name))
    }

    pub fn track_page_view(&self) -> Result<(), Error> {
        self.tracker()?.track_page_view()
    }

    standard_event_methods!(Result<PendingEvent<'_>, Error>);
}

impl From<PixelTracker> for TrackerContext {
    fn from(tracker: PixelTracker) -> Self {
        Self {
            state: TrackerState::Ready(Arc::new(tracker)),
        }
    }
}
