use std::future::Future;

use crate::domain::{
    analysis::{entities::Prediction, value_objects::PredictOptions},
    capture::entities::CaptureFile,
    common::entities::app_errors::CoreError,
};

/// Client for the external meal prediction service.
#[cfg_attr(test, mockall::automock)]
pub trait PredictionClient: Send + Sync {
    /// Submits the capture for nutritional prediction.
    ///
    /// `Ok(None)` means the service answered with an empty body; callers
    /// treat that as a generic prediction failure. Low-confidence
    /// rejections surface as [`CoreError::LowConfidence`] with the
    /// diagnostic payload attached.
    fn predict_meal(
        &self,
        file: CaptureFile,
        options: PredictOptions,
    ) -> impl Future<Output = Result<Option<Prediction>, CoreError>> + Send;
}
