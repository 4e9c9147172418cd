//! Request, record and response shapes for one upload authorization.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::UploadError;

/// Body of `POST /upload-url`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    /// Name of the file, used verbatim as the last key segment.
    pub filename: String,

    /// MIME type the eventual upload must declare.
    #[serde(rename = "contentType")]
    pub content_type: String,

    /// Requester's email. Not validated.
    pub email: String,
}

impl UploadRequest {
    /// Parse and validate a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, UploadError> {
        let request: UploadRequest = serde_json::from_slice(body)?;
        if request.filename.is_empty() {
            return Err(UploadError::Parse("`filename` must not be empty".into()));
        }
        Ok(request)
    }
}

/// Row written to the record store for each issued upload URL.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadRecord {
    pub email: String,

    /// Public address the object will have once uploaded.
    pub url: String,

    /// Creation time, RFC 3339 UTC with milliseconds.
    pub datetime: String,
}

impl UploadRecord {
    pub fn new(email: impl Into<String>, url: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            url: url.into(),
            datetime: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Success body returned to the caller.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadResponse {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}

/// `{prefix}/{filename}`, no escaping.
pub fn storage_key(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix, filename)
}

pub fn public_object_url(bucket: &str, key: &str) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket, key)
}

// Sent when the URL is issued, before any upload happens.
pub fn notification_message(filename: &str, email: &str) -> String {
    format!("A new file named {} was uploaded by {}.", filename, email)
}
