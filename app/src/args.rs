use std::path::PathBuf;

use clap::Parser;
use url::Url;

use mealsnap_core::domain::common::{MealsnapConfig, MediaConfig, PredictionConfig};

/// Environment-driven configuration for the capture flow.
#[derive(Debug, Clone, Parser)]
#[command(name = "mealsnap", about = "Submit a meal photo for prediction and confirm the result")]
pub struct Args {
    /// Base URL of the meal prediction service.
    #[arg(
        long,
        env = "MEALSNAP_PREDICTION_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub prediction_url: Url,

    /// Base URL used to resolve backend image references.
    #[arg(long, env = "MEALSNAP_MEDIA_URL", default_value = "http://localhost:8000")]
    pub media_url: Url,

    /// Photo to submit.
    #[arg(long)]
    pub image: PathBuf,

    /// Content type of the photo.
    #[arg(long, default_value = "image/jpeg")]
    pub mime_type: String,

    /// Skip the confirmation step and save as soon as the result renders.
    #[arg(long)]
    pub auto_save: bool,
}

impl Args {
    pub fn to_config(&self) -> MealsnapConfig {
        MealsnapConfig {
            prediction: PredictionConfig {
                base_url: self.prediction_url.as_str().to_string(),
            },
            media: MediaConfig {
                base_url: self.media_url.as_str().to_string(),
            },
        }
    }
}
