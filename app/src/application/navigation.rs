use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

/// Routes the capture flow navigates between. Both transitions replace
/// the current history entry so the back button never returns to a
/// settled processing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Result,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/dashboard/home",
            Route::Result => "/result",
        }
    }
}

/// History-replacing navigation, implemented by the embedding shell.
pub trait Navigator: Send + Sync {
    fn replace(&self, route: Route);
}

/// A navigation armed to fire after a display delay.
///
/// Dropping or cancelling it aborts the timer, so a view torn down
/// before the delay elapses can never navigate afterwards.
pub struct ScheduledNavigation {
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    pub fn after(delay: Duration, navigator: Arc<dyn Navigator>, route: Route) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.replace(route);
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
