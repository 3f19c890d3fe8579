use reqwest::Client;
use serde::Deserialize;

use crate::domain::{common::entities::app_errors::CoreError, meal::ports::MealDirectory};

#[derive(Debug, Clone)]
pub struct HttpMealDirectory {
    base_url: String,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefreshErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpMealDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl MealDirectory for HttpMealDirectory {
    async fn refresh_meals(&self) -> Result<(), CoreError> {
        let url = format!("{}/meals", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("meal refresh request failed: {}", e);
            CoreError::RefreshFailed {
                server_message: None,
                server_error: None,
                message: Some(format!("meal refresh request failed: {e}")),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: RefreshErrorBody = response.json().await.unwrap_or_default();
            tracing::error!(
                "meal refresh error: {} - {:?} {:?}",
                status,
                body.message,
                body.error
            );
            return Err(CoreError::RefreshFailed {
                server_message: body.message,
                server_error: body.error,
                message: Some(format!("meal refresh returned {status}")),
            });
        }

        Ok(())
    }
}
