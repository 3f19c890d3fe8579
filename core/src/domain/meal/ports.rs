use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Collaborator that owns meal persistence.
///
/// By the time the result view saves, the prediction pipeline upstream
/// has already stored the meal; refreshing pulls the stored list, so a
/// successful refresh implies the meal is persisted.
#[cfg_attr(test, mockall::automock)]
pub trait MealDirectory: Send + Sync {
    fn refresh_meals(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Resolves a backend image reference into a fetchable URL.
#[cfg_attr(test, mockall::automock)]
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, image_ref: &str) -> String;
}
