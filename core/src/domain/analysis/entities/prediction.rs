use serde::{Deserialize, Serialize};

/// Raw prediction payload as returned by the meal prediction service.
///
/// The shape is loosely structured and every field may be absent; fields
/// the service adds that we do not know about are kept in `extra` so the
/// payload survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    pub meal: Option<String>,
    /// Legacy field name still emitted by older service versions.
    pub food: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub calories: Option<f64>,
    pub image_url: Option<String>,
    pub image: Option<String>,
    pub nutrition_facts: Option<RawNutritionFacts>,
    pub metadata: Option<PredictionMetadata>,
    pub inference_source: Option<String>,
    pub ml_service_error: Option<String>,
    pub consumed_at: Option<String>,
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNutritionFacts {
    pub calories: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub proteins: Option<f64>,
    pub fats: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionMetadata {
    pub calories: Option<f64>,
    pub inference_source: Option<String>,
    pub ml_service_error: Option<String>,
    pub meal_date: Option<String>,
    pub nutrition_facts: Option<RawNutritionFacts>,
    pub hf_space: Option<ModelDiagnostics>,
}

/// Diagnostic block attached by the inference service: the top label, its
/// confidence, the acceptance threshold, and optional free text. Every
/// field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDiagnostics {
    pub label: Option<String>,
    pub confidence: Option<f64>,
    pub threshold: Option<f64>,
    pub details: Option<String>,
}
