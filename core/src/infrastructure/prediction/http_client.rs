use reqwest::{multipart, Client};
use serde::Deserialize;

use crate::domain::{
    analysis::{
        entities::{ModelDiagnostics, Prediction},
        ports::PredictionClient,
        value_objects::PredictOptions,
    },
    capture::entities::CaptureFile,
    common::entities::app_errors::CoreError,
};

/// Error code the prediction service uses for low-confidence rejections.
pub const LOW_CONFIDENCE_CODE: &str = "LOW_CONFIDENCE";

#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PredictErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<ModelDiagnostics>,
}

impl HttpPredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl PredictionClient for HttpPredictionClient {
    async fn predict_meal(
        &self,
        file: CaptureFile,
        options: PredictOptions,
    ) -> Result<Option<Prediction>, CoreError> {
        let url = format!("{}/predict", self.base_url);

        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| CoreError::PredictionFailed {
                message: Some(format!("invalid capture content type: {e}")),
            })?;
        let mut form = multipart::Form::new().part("image", part);
        if let Some(captured_at) = options.captured_at {
            form = form.text("captured_at", captured_at.to_rfc3339());
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("prediction request failed: {}", e);
                CoreError::PredictionFailed {
                    message: Some(format!("prediction request failed: {e}")),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: PredictErrorBody = response.json().await.unwrap_or_default();
            if body.code.as_deref() == Some(LOW_CONFIDENCE_CODE) {
                return Err(CoreError::LowConfidence {
                    message: body.message,
                    details: body.details.unwrap_or_default(),
                });
            }
            tracing::error!("prediction service error: {} - {:?}", status, body.message);
            return Err(CoreError::PredictionFailed {
                message: body.message,
            });
        }

        // A `null` body deserializes to `None`, which callers treat as a
        // generic failure.
        response.json::<Option<Prediction>>().await.map_err(|e| {
            tracing::error!("failed to parse prediction response: {}", e);
            CoreError::PredictionFailed {
                message: Some(format!("failed to parse prediction response: {e}")),
            }
        })
    }
}
