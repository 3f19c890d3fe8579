use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{analysis::entities::Analysis, capture::entities::Capture};

/// Session-scoped store shared by the capture flow.
///
/// Holds the pending [`Capture`] and the normalized [`Analysis`] between
/// views. Single writer at a time: each view writes only while settling
/// its own request, so no slot is concurrently written by two in-flight
/// operations.
#[derive(Clone, Default)]
pub struct MealSession {
    inner: Arc<RwLock<Slots>>,
}

#[derive(Default)]
struct Slots {
    capture: Option<Capture>,
    analysis: Option<Analysis>,
}

impl MealSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn capture(&self) -> Option<Capture> {
        self.inner.read().await.capture.clone()
    }

    pub async fn analysis(&self) -> Option<Analysis> {
        self.inner.read().await.analysis.clone()
    }

    pub async fn set_capture(&self, capture: Option<Capture>) {
        self.inner.write().await.capture = capture;
    }

    pub async fn set_analysis(&self, analysis: Option<Analysis>) {
        self.inner.write().await.analysis = analysis;
    }

    /// Clears both slots in one write, used when a flow settles with a
    /// failure or is abandoned.
    pub async fn clear(&self) {
        let mut slots = self.inner.write().await;
        slots.capture = None;
        slots.analysis = None;
    }
}
