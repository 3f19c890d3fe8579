use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;

/// A photo the user has submitted but not yet analyzed.
///
/// Created by the capture flow, read by the processing and result views,
/// and cleared from the session once processing settles. The id gives a
/// capture its identity; a new id means the processing view must run
/// again.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub id: Uuid,
    pub file: Option<CaptureFile>,
    pub preview_url: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl Capture {
    pub fn new(
        file: CaptureFile,
        preview_url: Option<String>,
        captured_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: generate_uuid_v7(),
            file: Some(file),
            preview_url,
            captured_at,
        }
    }

    /// A capture whose file was lost or never attached. The processing
    /// view redirects straight home when it sees one of these.
    pub fn without_file(preview_url: Option<String>) -> Self {
        Self {
            id: generate_uuid_v7(),
            file: None,
            preview_url,
            captured_at: None,
        }
    }
}
