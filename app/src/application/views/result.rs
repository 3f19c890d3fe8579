use std::sync::Arc;

use serde::Serialize;

use mealsnap_core::domain::{
    analysis::{
        entities::{NutritionFacts, MEAL_NAME_PLACEHOLDER},
        helpers::{format_meal_date, format_percent, readable_source},
    },
    meal::ports::{ImageResolver, MealDirectory},
    session::MealSession,
};

use crate::application::navigation::{Navigator, Route};

/// Asset shown when no preview or backend image is available.
pub const PLACEHOLDER_IMAGE: &str = "/img/home-decor-1.jpeg";

/// One row of the estimated-nutrition grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
}

impl MacroEntry {
    /// "450 Cal" when the value is present; an em-dash with no unit when
    /// it is null.
    pub fn display(&self) -> String {
        match self.value {
            Some(value) => format!("{} {}", value, self.unit),
            None => "\u{2014}".to_string(),
        }
    }
}

/// Model-insight panel contents. Every field is independently optional;
/// the panel itself is omitted when nothing is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInsights {
    pub source: Option<String>,
    pub top_label: Option<String>,
    pub confidence: Option<String>,
    pub threshold: Option<String>,
    pub service_error: Option<String>,
}

/// Controller for the result screen: renders the stored analysis and
/// offers save/cancel. All rendering derivations are pure reads over the
/// session, recomputed on each call.
pub struct ResultView<M: MealDirectory, R: ImageResolver> {
    session: MealSession,
    directory: Arc<M>,
    resolver: Arc<R>,
    navigator: Arc<dyn Navigator>,
    error: Option<String>,
    saving: bool,
}

impl<M: MealDirectory, R: ImageResolver> ResultView<M, R> {
    pub fn new(
        session: MealSession,
        directory: Arc<M>,
        resolver: Arc<R>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            directory,
            resolver,
            navigator,
            error: None,
            saving: false,
        }
    }

    /// Mount guard. Without an analysis the view immediately navigates
    /// home and renders nothing; returns whether the view may render.
    pub async fn activate(&mut self) -> bool {
        if self.session.analysis().await.is_none() {
            self.navigator.replace(Route::Home);
            return false;
        }
        true
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    pub async fn meal_name(&self) -> String {
        self.session
            .analysis()
            .await
            .map(|analysis| analysis.meal)
            .unwrap_or_else(|| MEAL_NAME_PLACEHOLDER.to_string())
    }

    pub async fn ingredients(&self) -> Vec<String> {
        self.session
            .analysis()
            .await
            .map(|analysis| analysis.ingredients)
            .unwrap_or_default()
    }

    /// Image source chain: analysis preview, capture preview, resolved
    /// backend reference, fixed placeholder.
    pub async fn image_src(&self) -> String {
        let analysis = self.session.analysis().await;
        if let Some(url) = analysis.as_ref().and_then(|a| a.preview_url.clone()) {
            return url;
        }
        if let Some(url) = self
            .session
            .capture()
            .await
            .and_then(|capture| capture.preview_url)
        {
            return url;
        }
        if let Some(reference) = analysis.as_ref().and_then(|a| a.image.clone()) {
            return self.resolver.resolve(&reference);
        }
        PLACEHOLDER_IMAGE.to_string()
    }

    /// "Logged for …" label: analysis captured-at, else the raw
    /// prediction timestamp, else nothing.
    pub async fn meal_date(&self) -> Option<String> {
        let analysis = self.session.analysis().await?;
        analysis
            .captured_at
            .as_deref()
            .map(format_meal_date)
            .or_else(|| analysis.raw.timestamp.as_deref().map(format_meal_date))
    }

    /// Nutrition facts with the result-side per-field fallback: normalized
    /// facts first, top-level calories as the final calories fallback.
    pub async fn nutrition_facts(&self) -> NutritionFacts {
        let Some(analysis) = self.session.analysis().await else {
            return NutritionFacts::default();
        };
        let facts = analysis.nutrition_facts;
        NutritionFacts {
            calories: facts.calories.or(analysis.calories),
            carbohydrates: facts.carbohydrates,
            proteins: facts.proteins,
            fats: facts.fats,
        }
    }

    /// The four fixed macro rows of the estimated-nutrition grid.
    pub async fn macro_entries(&self) -> [MacroEntry; 4] {
        let facts = self.nutrition_facts().await;
        [
            MacroEntry {
                key: "calories",
                label: "Calories",
                value: facts.calories,
                unit: "Cal",
            },
            MacroEntry {
                key: "carbohydrates",
                label: "Carbs",
                value: facts.carbohydrates,
                unit: "g",
            },
            MacroEntry {
                key: "proteins",
                label: "Protein",
                value: facts.proteins,
                unit: "g",
            },
            MacroEntry {
                key: "fats",
                label: "Fat",
                value: facts.fats,
                unit: "g",
            },
        ]
    }

    /// Model-insight panel contents, or `None` when neither an inference
    /// source, a diagnostic block, nor a service error is present.
    pub async fn insights(&self) -> Option<ModelInsights> {
        let analysis = self.session.analysis().await?;
        let metadata = &analysis.metadata;

        let diagnostics = analysis
            .hf_diagnostics
            .clone()
            .or_else(|| metadata.hf_space.clone());
        let source = analysis
            .inference_source
            .clone()
            .or_else(|| analysis.raw.inference_source.clone())
            .or_else(|| metadata.inference_source.clone());
        let service_error = analysis
            .ml_service_error
            .clone()
            .or_else(|| analysis.raw.ml_service_error.clone())
            .or_else(|| metadata.ml_service_error.clone());

        if source.is_none() && diagnostics.is_none() && service_error.is_none() {
            return None;
        }

        Some(ModelInsights {
            source: source.as_deref().map(readable_source),
            top_label: diagnostics.as_ref().and_then(|d| d.label.clone()),
            confidence: diagnostics
                .as_ref()
                .and_then(|d| format_percent(d.confidence)),
            threshold: diagnostics
                .as_ref()
                .and_then(|d| format_percent(d.threshold)),
            service_error,
        })
    }

    /// Discards the flow: clears the session and navigates home. Makes no
    /// network call.
    pub async fn handle_cancel(&mut self) {
        self.session.clear().await;
        self.navigator.replace(Route::Home);
    }

    /// Confirms the meal. No-op without an analysis. On refresh failure
    /// the session is left untouched so the user can retry; the saving
    /// flag is cleared either way.
    pub async fn handle_save(&mut self) {
        if self.session.analysis().await.is_none() {
            return;
        }
        self.error = None;
        self.saving = true;

        match self.directory.refresh_meals().await {
            Ok(()) => {
                self.session.clear().await;
                self.navigator.replace(Route::Home);
            }
            Err(err) => {
                self.error = Some(err.save_display_message());
            }
        }
        self.saving = false;
    }
}
