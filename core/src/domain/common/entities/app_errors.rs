use thiserror::Error;

use crate::domain::analysis::entities::ModelDiagnostics;

/// Message shown whenever a prediction fails without carrying its own text.
pub const GENERIC_PREDICTION_ERROR: &str =
    "Sorry! Unfortunately, we cannot analyze your picture!";

/// Message shown when a save fails without any usable server text.
pub const SAVE_ERROR_FALLBACK: &str =
    "Unable to save this meal right now. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The model's top guess did not clear its confidence threshold.
    #[error("low confidence prediction")]
    LowConfidence {
        message: Option<String>,
        details: ModelDiagnostics,
    },

    #[error("prediction failed")]
    PredictionFailed { message: Option<String> },

    #[error("prediction service returned an empty response")]
    EmptyPrediction,

    /// The meal directory refused or failed the refresh call. The server
    /// body may carry either a `message` or an `error` field.
    #[error("meal refresh failed")]
    RefreshFailed {
        server_message: Option<String>,
        server_error: Option<String>,
        message: Option<String>,
    },
}

impl CoreError {
    /// Display text for the processing error panel.
    ///
    /// Chain order is a contract: low-confidence failures prefer the
    /// diagnostic free text, then the carried message, then the generic
    /// string. Every other failure uses message-or-generic.
    pub fn prediction_display_message(&self) -> String {
        match self {
            CoreError::LowConfidence { message, details } => details
                .details
                .clone()
                .or_else(|| message.clone())
                .unwrap_or_else(|| GENERIC_PREDICTION_ERROR.to_string()),
            CoreError::PredictionFailed { message } => message
                .clone()
                .unwrap_or_else(|| GENERIC_PREDICTION_ERROR.to_string()),
            _ => GENERIC_PREDICTION_ERROR.to_string(),
        }
    }

    /// Display text for save failures, resolved in order: server-provided
    /// message, server-provided error field, transport message, fixed
    /// fallback.
    pub fn save_display_message(&self) -> String {
        match self {
            CoreError::RefreshFailed {
                server_message,
                server_error,
                message,
            } => server_message
                .clone()
                .or_else(|| server_error.clone())
                .or_else(|| message.clone())
                .unwrap_or_else(|| SAVE_ERROR_FALLBACK.to_string()),
            _ => SAVE_ERROR_FALLBACK.to_string(),
        }
    }
}
