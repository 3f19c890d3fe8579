mod application;
mod args;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mealsnap_core::{
    domain::{
        capture::entities::{Capture, CaptureFile},
        session::MealSession,
    },
    infrastructure::{
        meal::HttpMealDirectory, media::BackendImageResolver, prediction::HttpPredictionClient,
    },
};

use crate::application::{
    navigation::{Navigator, Route},
    views::{
        processing::{ProcessingStatus, ProcessingView},
        result::ResultView,
    },
};

/// Logs transitions instead of driving a browser history.
struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn replace(&self, route: Route) {
        tracing::info!("navigate (replace) -> {}", route.path());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = args::Args::parse();
    let config = args.to_config();

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("reading {}", args.image.display()))?;
    let file_name = args
        .image
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("capture.jpg")
        .to_string();

    let session = MealSession::new();
    session
        .set_capture(Some(Capture::new(
            CaptureFile {
                file_name,
                mime_type: args.mime_type.clone(),
                bytes: bytes.into(),
            },
            None,
            Some(chrono::Utc::now()),
        )))
        .await;

    let navigator: Arc<dyn Navigator> = Arc::new(LoggingNavigator);
    let predictor = Arc::new(HttpPredictionClient::new(config.prediction.base_url.clone()));
    let directory = Arc::new(HttpMealDirectory::new(config.prediction.base_url.clone()));
    let resolver = Arc::new(BackendImageResolver::new(config.media.base_url.clone()));

    let mut processing = ProcessingView::new(session.clone(), predictor, navigator.clone());
    processing.activate().await;

    match processing.state().status {
        ProcessingStatus::Succeeded => {}
        ProcessingStatus::Failed => {
            if let Some(error) = &processing.state().error {
                eprintln!("{error}");
            }
            if let Some(details) = &processing.state().low_confidence_details {
                eprintln!("diagnostics: {}", serde_json::to_string_pretty(details)?);
            }
            processing.deactivate();
            return Ok(());
        }
        _ => {
            processing.deactivate();
            return Ok(());
        }
    }
    // The CLI has no screen to linger on; skip the display delay.
    processing.deactivate();

    let mut result = ResultView::new(session.clone(), directory, resolver, navigator.clone());
    if !result.activate().await {
        return Ok(());
    }

    println!("{}", result.meal_name().await);
    println!("image: {}", result.image_src().await);
    if let Some(date) = result.meal_date().await {
        println!("logged for {date}");
    }
    let ingredients = result.ingredients().await;
    if ingredients.is_empty() {
        println!("(no ingredients detected)");
    } else {
        for ingredient in &ingredients {
            println!("- {ingredient}");
        }
    }
    for entry in result.macro_entries().await {
        println!("{}: {}", entry.label, entry.display());
    }
    if let Some(insights) = result.insights().await {
        println!("model insights: {}", serde_json::to_string_pretty(&insights)?);
    }

    if args.auto_save {
        result.handle_save().await;
        match result.error() {
            None => println!("saved."),
            Some(error) => eprintln!("{error}"),
        }
    } else {
        result.handle_cancel().await;
        println!("discarded (pass --auto-save to keep the meal).");
    }

    Ok(())
}
