mod analysis;
mod prediction;

pub use analysis::{Analysis, NutritionFacts, MEAL_NAME_PLACEHOLDER};
pub use prediction::{ModelDiagnostics, Prediction, PredictionMetadata, RawNutritionFacts};
