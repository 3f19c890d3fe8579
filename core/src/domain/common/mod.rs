use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;

#[derive(Clone, Debug)]
pub struct MealsnapConfig {
    pub prediction: PredictionConfig,
    pub media: MediaConfig,
}

#[derive(Clone, Debug)]
pub struct PredictionConfig {
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub base_url: String,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
