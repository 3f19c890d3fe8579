mod http_client;

pub use http_client::{HttpPredictionClient, LOW_CONFIDENCE_CODE};
