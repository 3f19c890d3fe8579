use crate::domain::meal::ports::ImageResolver;

/// Resolves backend-relative image references against the media base URL.
/// Absolute URLs and data URLs pass through untouched.
#[derive(Debug, Clone)]
pub struct BackendImageResolver {
    base_url: String,
}

impl BackendImageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ImageResolver for BackendImageResolver {
    fn resolve(&self, image_ref: &str) -> String {
        if image_ref.starts_with("http://")
            || image_ref.starts_with("https://")
            || image_ref.starts_with("data:")
        {
            return image_ref.to_string();
        }
        format!("{}/{}", self.base_url, image_ref.trim_start_matches('/'))
    }
}
