use chrono::{DateTime, Utc};

/// Options forwarded with a prediction request.
#[derive(Debug, Clone, Default)]
pub struct PredictOptions {
    pub captured_at: Option<DateTime<Utc>>,
}
