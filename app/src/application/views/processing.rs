use std::{sync::Arc, time::Duration};

use serde::Serialize;

use mealsnap_core::domain::{
    analysis::{
        entities::{Analysis, ModelDiagnostics},
        helpers::format_percent,
        ports::PredictionClient,
        value_objects::PredictOptions,
    },
    capture::entities::Capture,
    common::entities::app_errors::CoreError,
    session::MealSession,
};

use crate::application::navigation::{Navigator, Route, ScheduledNavigation};

/// How long the success state stays on screen before moving to the result.
pub const RESULT_DISPLAY_DELAY: Duration = Duration::from_millis(3000);
/// Longer back-delay for low-confidence rejections so the diagnostics can
/// be read.
pub const LOW_CONFIDENCE_REDIRECT_DELAY: Duration = Duration::from_millis(4000);
/// Back-delay for every other prediction failure.
pub const FAILURE_REDIRECT_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed,
    /// Activated without a usable capture; the view has already navigated
    /// home and does nothing further.
    Redirected,
}

/// Display state backing the processing screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingState {
    pub status: ProcessingStatus,
    pub error: Option<String>,
    pub low_confidence_details: Option<ModelDiagnostics>,
    /// Capture preview retained on failure so the error panel can still
    /// show the photo.
    pub error_preview: Option<String>,
}

impl ProcessingState {
    /// Confidence row of the low-confidence panel: present only when the
    /// diagnostics carry a confidence, rendered as a percentage with an
    /// em-dash for unformattable values.
    pub fn confidence_display(&self) -> Option<String> {
        let details = self.low_confidence_details.as_ref()?;
        details.confidence?;
        Some(format_percent(details.confidence).unwrap_or_else(|| "\u{2014}".to_string()))
    }

    /// Threshold row of the low-confidence panel, same rules as
    /// [`Self::confidence_display`].
    pub fn threshold_display(&self) -> Option<String> {
        let details = self.low_confidence_details.as_ref()?;
        details.threshold?;
        Some(format_percent(details.threshold).unwrap_or_else(|| "\u{2014}".to_string()))
    }
}

/// Controller for the processing screen: submits the capture for
/// prediction, settles the session, and arms the redirect.
pub struct ProcessingView<P: PredictionClient> {
    session: MealSession,
    predictor: Arc<P>,
    navigator: Arc<dyn Navigator>,
    state: ProcessingState,
    pending_redirect: Option<ScheduledNavigation>,
}

impl<P: PredictionClient> ProcessingView<P> {
    pub fn new(session: MealSession, predictor: Arc<P>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            predictor,
            navigator,
            state: ProcessingState::default(),
            pending_redirect: None,
        }
    }

    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Runs the view's mount effect. Re-run whenever the capture identity
    /// changes; any redirect armed by an earlier run is cancelled first.
    ///
    /// An in-flight prediction is not cancelled when the capture changes;
    /// the caller decides whether to await or supersede it.
    pub async fn activate(&mut self) {
        self.cancel_pending_redirect();

        let capture = self.session.capture().await;
        let Some(capture) = capture else {
            self.redirect_home_now();
            return;
        };
        let Some(file) = capture.file.clone() else {
            self.redirect_home_now();
            return;
        };

        self.state = ProcessingState {
            status: ProcessingStatus::Requesting,
            ..ProcessingState::default()
        };

        let options = PredictOptions {
            captured_at: capture.captured_at,
        };
        match self.predictor.predict_meal(file, options).await {
            Ok(Some(prediction)) => {
                let analysis = Analysis::from_prediction(prediction, &capture);
                self.session.set_analysis(Some(analysis)).await;
                self.state.low_confidence_details = None;
                self.state.status = ProcessingStatus::Succeeded;
                self.schedule_redirect(Route::Result, RESULT_DISPLAY_DELAY);
            }
            Ok(None) => self.settle_failure(CoreError::EmptyPrediction, &capture).await,
            Err(err) => self.settle_failure(err, &capture).await,
        }
    }

    async fn settle_failure(&mut self, err: CoreError, capture: &Capture) {
        self.state.error_preview = capture.preview_url.clone();

        let delay = match &err {
            CoreError::LowConfidence { .. } => LOW_CONFIDENCE_REDIRECT_DELAY,
            _ => FAILURE_REDIRECT_DELAY,
        };
        self.state.low_confidence_details = match &err {
            CoreError::LowConfidence { details, .. } => Some(details.clone()),
            _ => None,
        };
        self.state.error = Some(err.prediction_display_message());

        self.session.clear().await;
        self.state.status = ProcessingStatus::Failed;
        self.schedule_redirect(Route::Home, delay);
    }

    fn redirect_home_now(&mut self) {
        self.state.status = ProcessingStatus::Redirected;
        self.navigator.replace(Route::Home);
    }

    fn schedule_redirect(&mut self, route: Route, delay: Duration) {
        self.pending_redirect = Some(ScheduledNavigation::after(
            delay,
            self.navigator.clone(),
            route,
        ));
    }

    fn cancel_pending_redirect(&mut self) {
        if let Some(pending) = self.pending_redirect.take() {
            pending.cancel();
        }
    }

    /// View teardown. Cancels any armed redirect so no navigation fires
    /// after the view is gone.
    pub fn deactivate(&mut self) {
        self.cancel_pending_redirect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mealsnap_core::domain::{
        analysis::entities::Prediction,
        capture::entities::CaptureFile,
        common::entities::app_errors::GENERIC_PREDICTION_ERROR,
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl RecordingNavigator {
        fn routes(&self) -> Vec<Route> {
            self.routes.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn replace(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    struct StubPredictor {
        response: Result<Option<Prediction>, CoreError>,
        calls: AtomicUsize,
    }

    impl StubPredictor {
        fn returning(response: Result<Option<Prediction>, CoreError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionClient for StubPredictor {
        async fn predict_meal(
            &self,
            _file: CaptureFile,
            _options: PredictOptions,
        ) -> Result<Option<Prediction>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn capture_with_file() -> Capture {
        Capture::new(
            CaptureFile {
                file_name: "meal.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: Bytes::from_static(b"jpeg"),
            },
            Some("blob:preview".to_string()),
            None,
        )
    }

    fn low_confidence_error() -> CoreError {
        CoreError::LowConfidence {
            message: None,
            details: ModelDiagnostics {
                label: Some("pizza".to_string()),
                confidence: Some(0.42),
                threshold: Some(0.6),
                details: None,
            },
        }
    }

    async fn run_timers(ms: u64) {
        // Let freshly spawned redirect tasks register their sleep before
        // the paused clock moves, so deadlines are relative to arming time.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn test_missing_file_redirects_home_without_predicting() {
        let session = MealSession::new();
        session
            .set_capture(Some(Capture::without_file(None)))
            .await;
        let predictor = StubPredictor::returning(Ok(Some(Prediction::default())));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session, predictor.clone(), navigator.clone());
        view.activate().await;

        assert_eq!(view.state().status, ProcessingStatus::Redirected);
        assert_eq!(navigator.routes(), vec![Route::Home]);
        assert_eq!(predictor.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_capture_redirects_home() {
        let session = MealSession::new();
        let predictor = StubPredictor::returning(Ok(Some(Prediction::default())));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session, predictor.clone(), navigator.clone());
        view.activate().await;

        assert_eq!(navigator.routes(), vec![Route::Home]);
        assert_eq!(predictor.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_stores_analysis_and_redirects_after_display_delay() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"calories": null, "nutrition_facts": {"calories": 450}}"#,
        )
        .unwrap();
        let session = MealSession::new();
        session.set_capture(Some(capture_with_file())).await;
        let predictor = StubPredictor::returning(Ok(Some(prediction)));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session.clone(), predictor, navigator.clone());
        view.activate().await;

        assert_eq!(view.state().status, ProcessingStatus::Succeeded);
        assert_eq!(view.state().error, None);
        let analysis = session.analysis().await.unwrap();
        assert_eq!(analysis.nutrition_facts.calories, Some(450.0));

        run_timers(2999).await;
        assert!(navigator.routes().is_empty());
        run_timers(1).await;
        assert_eq!(navigator.routes(), vec![Route::Result]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_low_confidence_keeps_details_and_uses_longer_delay() {
        let session = MealSession::new();
        session.set_capture(Some(capture_with_file())).await;
        let predictor = StubPredictor::returning(Err(low_confidence_error()));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session.clone(), predictor, navigator.clone());
        view.activate().await;

        assert_eq!(view.state().status, ProcessingStatus::Failed);
        let details = view.state().low_confidence_details.clone().unwrap();
        assert_eq!(details.label.as_deref(), Some("pizza"));
        assert_eq!(details.confidence, Some(0.42));
        assert_eq!(details.threshold, Some(0.6));
        assert_eq!(view.state().confidence_display().as_deref(), Some("42%"));
        assert_eq!(view.state().threshold_display().as_deref(), Some("60%"));
        assert_eq!(view.state().error.as_deref(), Some(GENERIC_PREDICTION_ERROR));
        assert_eq!(view.state().error_preview.as_deref(), Some("blob:preview"));

        // Session is cleared on failure.
        assert!(session.capture().await.is_none());
        assert!(session.analysis().await.is_none());

        // Not the short failure delay.
        run_timers(2500).await;
        assert!(navigator.routes().is_empty());
        run_timers(1500).await;
        assert_eq!(navigator.routes(), vec![Route::Home]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_failure_uses_fallback_message_and_short_delay() {
        let session = MealSession::new();
        session.set_capture(Some(capture_with_file())).await;
        let predictor =
            StubPredictor::returning(Err(CoreError::PredictionFailed { message: None }));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session, predictor, navigator.clone());
        view.activate().await;

        assert_eq!(view.state().error.as_deref(), Some(GENERIC_PREDICTION_ERROR));
        assert_eq!(view.state().low_confidence_details, None);

        run_timers(2500).await;
        assert_eq!(navigator.routes(), vec![Route::Home]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_response_is_a_generic_failure() {
        let session = MealSession::new();
        session.set_capture(Some(capture_with_file())).await;
        let predictor = StubPredictor::returning(Ok(None));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session.clone(), predictor, navigator.clone());
        view.activate().await;

        assert_eq!(view.state().status, ProcessingStatus::Failed);
        assert_eq!(view.state().error.as_deref(), Some(GENERIC_PREDICTION_ERROR));
        assert!(session.analysis().await.is_none());

        run_timers(2500).await;
        assert_eq!(navigator.routes(), vec![Route::Home]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_cancels_pending_redirect() {
        let session = MealSession::new();
        session.set_capture(Some(capture_with_file())).await;
        let predictor = StubPredictor::returning(Ok(Some(Prediction::default())));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session, predictor, navigator.clone());
        view.activate().await;
        view.deactivate();

        run_timers(10_000).await;
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reactivation_restarts_the_request() {
        let session = MealSession::new();
        session.set_capture(Some(capture_with_file())).await;
        let predictor = StubPredictor::returning(Ok(Some(Prediction::default())));
        let navigator = Arc::new(RecordingNavigator::default());

        let mut view = ProcessingView::new(session.clone(), predictor.clone(), navigator.clone());
        view.activate().await;

        session.set_capture(Some(capture_with_file())).await;
        view.activate().await;
        assert_eq!(predictor.calls(), 2);

        // Only the redirect armed by the second run survives.
        run_timers(3000).await;
        assert_eq!(navigator.routes(), vec![Route::Result]);
    }
}
