use serde::{Deserialize, Serialize};

use crate::domain::capture::entities::Capture;

use super::prediction::{ModelDiagnostics, Prediction, PredictionMetadata};

/// Meal name used when the prediction carries neither `meal` nor `food`.
pub const MEAL_NAME_PLACEHOLDER: &str = "Logged Meal";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub proteins: Option<f64>,
    pub fats: Option<f64>,
}

/// Normalized, display-ready projection of a [`Prediction`].
///
/// Produced exactly once by the processing view and consumed read-only by
/// the result view. Every field resolves through a defined fallback so
/// rendering never has to guard against a missing nutrition value beyond
/// checking for `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub meal: String,
    pub ingredients: Vec<String>,
    pub calories: Option<f64>,
    /// Backend image reference from the prediction, not yet resolved to a
    /// fetchable URL.
    pub image: Option<String>,
    pub nutrition_facts: NutritionFacts,
    pub metadata: PredictionMetadata,
    pub inference_source: Option<String>,
    pub ml_service_error: Option<String>,
    pub hf_diagnostics: Option<ModelDiagnostics>,
    pub preview_url: Option<String>,
    pub captured_at: Option<String>,
    pub raw: Prediction,
}

impl Analysis {
    /// Normalizes a raw prediction against the capture it came from.
    ///
    /// Each field resolves through an ordered first-match-wins chain. The
    /// chain order is a contract covered by tests, not incidental code
    /// order:
    ///
    /// - calories: prediction → nutrition facts
    /// - facts calories: inferred calories → nutrition facts → metadata
    /// - meal: `meal` → legacy `food` → placeholder
    /// - captured-at: capture → `consumed_at` → `timestamp` → metadata
    pub fn from_prediction(prediction: Prediction, capture: &Capture) -> Self {
        let metadata = prediction.metadata.clone().unwrap_or_default();
        let nutrition = prediction.nutrition_facts.clone().unwrap_or_default();
        let inferred_calories = prediction.calories.or(nutrition.calories);

        Self {
            meal: prediction
                .meal
                .clone()
                .or_else(|| prediction.food.clone())
                .unwrap_or_else(|| MEAL_NAME_PLACEHOLDER.to_string()),
            ingredients: prediction.ingredients.clone().unwrap_or_default(),
            calories: inferred_calories,
            image: prediction
                .image_url
                .clone()
                .or_else(|| prediction.image.clone()),
            nutrition_facts: NutritionFacts {
                calories: inferred_calories
                    .or(nutrition.calories)
                    .or(metadata.calories),
                carbohydrates: nutrition.carbohydrates,
                proteins: nutrition.proteins,
                fats: nutrition.fats,
            },
            inference_source: prediction
                .inference_source
                .clone()
                .or_else(|| metadata.inference_source.clone()),
            ml_service_error: prediction
                .ml_service_error
                .clone()
                .or_else(|| metadata.ml_service_error.clone()),
            hf_diagnostics: metadata.hf_space.clone(),
            preview_url: capture.preview_url.clone(),
            captured_at: capture
                .captured_at
                .map(|at| at.to_rfc3339())
                .or_else(|| prediction.consumed_at.clone())
                .or_else(|| prediction.timestamp.clone())
                .or_else(|| metadata.meal_date.clone()),
            metadata,
            raw: prediction,
        }
    }
}
