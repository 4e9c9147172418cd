//! Collaborator seams and the service that drives them.
//!
//! The upload workflow talks to three managed services. Each one sits behind
//! a small trait so the workflow can run against AWS in production and
//! against in-memory fakes in tests.

use crate::models::upload::UploadRecord;
use async_trait::async_trait;
use std::time::Duration;

pub mod dynamodb;
pub mod s3;
pub mod sns;
pub mod upload_service;

#[cfg(test)]
pub mod fakes;

/// Issues time-limited write authorizations against object storage.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Return a URL allowing a single PUT of `key` with `content_type`
    /// until `expires_in` has elapsed.
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> anyhow::Result<String>;
}

/// Durable table-style persistence for upload records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_record(&self, table: &str, record: &UploadRecord) -> anyhow::Result<()>;
}

/// Fire-and-forget publish to a broker topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic_arn: &str, message: &str) -> anyhow::Result<()>;
}
