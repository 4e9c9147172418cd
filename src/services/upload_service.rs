//! src/services/upload_service.rs
//!
//! UploadService: issues a pre-signed upload URL, records the request and
//! announces it. The three collaborator calls run strictly in order and the
//! first failure aborts the rest. Nothing is retried or compensated: a failed
//! publish leaves the record in place.

use super::{
    Notifier, RecordStore, UploadSigner, dynamodb::DynamoRecordStore, s3::S3UploadSigner,
    sns::SnsNotifier,
};
use crate::{
    config::AppConfig,
    errors::UploadError,
    models::upload::{
        UploadRecord, UploadRequest, notification_message, public_object_url, storage_key,
    },
};
use aws_config::SdkConfig;
use chrono::Utc;
use std::{sync::Arc, time::Duration};

/// Lifetime of every issued upload URL.
pub const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(60);

/// Names of the collaborators' targets. Any of them may be unset; the step
/// that needs a missing one fails with [`UploadError::MissingConfig`].
#[derive(Clone, Debug, Default)]
pub struct UploadSettings {
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
    pub table_name: Option<String>,
    pub topic_arn: Option<String>,
}

impl UploadSettings {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            bucket_name: cfg.bucket_name.clone(),
            bucket_prefix: cfg.bucket_prefix.clone(),
            table_name: cfg.table_name.clone(),
            topic_arn: cfg.topic_arn.clone(),
        }
    }

    /// Environment names of every unset setting.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("AWS_BUCKET_NAME", &self.bucket_name),
            ("AWS_BUCKET_PREFIX", &self.bucket_prefix),
            ("AWS_DYNAMODB_TABLE_NAME", &self.table_name),
            ("AWS_SNS_TOPIC_ARN", &self.topic_arn),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, UploadError> {
    value.as_deref().ok_or(UploadError::MissingConfig(name))
}

/// Process-wide context shared by every request.
///
/// Cloning is cheap; collaborators are held behind `Arc` and never mutated.
#[derive(Clone)]
pub struct UploadService {
    signer: Arc<dyn UploadSigner>,
    records: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    settings: UploadSettings,
}

impl UploadService {
    pub fn new(
        signer: Arc<dyn UploadSigner>,
        records: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            signer,
            records,
            notifier,
            settings,
        }
    }

    /// Build the AWS-backed service. All three clients share `aws_config`.
    pub fn from_aws(aws_config: &SdkConfig, settings: UploadSettings) -> Self {
        Self::new(
            Arc::new(S3UploadSigner::new(aws_config)),
            Arc::new(DynamoRecordStore::new(aws_config)),
            Arc::new(SnsNotifier::new(aws_config)),
            settings,
        )
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Run the whole workflow for one request and return the upload URL.
    #[tracing::instrument(
        skip(self, request),
        fields(filename = %request.filename, content_type = %request.content_type)
    )]
    pub async fn authorize_upload(&self, request: &UploadRequest) -> Result<String, UploadError> {
        let bucket = required(&self.settings.bucket_name, "AWS_BUCKET_NAME")?;
        let prefix = required(&self.settings.bucket_prefix, "AWS_BUCKET_PREFIX")?;
        let key = storage_key(prefix, &request.filename);

        let upload_url = self
            .signer
            .presign_put(bucket, &key, &request.content_type, UPLOAD_URL_EXPIRY)
            .await
            .map_err(|e| UploadError::Authorization(format!("{:#}", e)))?;

        let record = UploadRecord::new(
            request.email.as_str(),
            public_object_url(bucket, &key),
            Utc::now(),
        );
        let table = required(&self.settings.table_name, "AWS_DYNAMODB_TABLE_NAME")?;
        self.records
            .put_record(table, &record)
            .await
            .map_err(|e| UploadError::Persistence(format!("{:#}", e)))?;

        // The message says "uploaded" although only the URL exists so far.
        let message = notification_message(&request.filename, &request.email);
        let topic = required(&self.settings.topic_arn, "AWS_SNS_TOPIC_ARN")?;
        self.notifier
            .publish(topic, &message)
            .await
            .map_err(|e| UploadError::Notification(format!("{:#}", e)))?;

        tracing::info!(key = %key, "issued upload url");
        Ok(upload_url)
    }
}
