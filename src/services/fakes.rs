//! In-memory collaborators that record every call.

use super::{Notifier, RecordStore, UploadSigner};
use crate::models::upload::UploadRecord;
use async_trait::async_trait;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignCall {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub expires_in: Duration,
}

#[derive(Clone, Default)]
pub struct FakeSigner {
    pub calls: Arc<Mutex<Vec<SignCall>>>,
    pub fail: bool,
}

impl FakeSigner {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UploadSigner for FakeSigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(SignCall {
            bucket: bucket.into(),
            key: key.into(),
            content_type: content_type.into(),
            expires_in,
        });
        if self.fail {
            anyhow::bail!("signing credentials expired");
        }
        Ok(format!("https://{}.s3.test/{}?X-Amz-Expires={}", bucket, key, expires_in.as_secs()))
    }
}

#[derive(Clone, Default)]
pub struct FakeRecordStore {
    pub records: Arc<Mutex<Vec<(String, UploadRecord)>>>,
    pub fail: bool,
}

impl FakeRecordStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RecordStore for FakeRecordStore {
    async fn put_record(&self, table: &str, record: &UploadRecord) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("ResourceNotFoundException: table {} does not exist", table);
        }
        self.records
            .lock()
            .unwrap()
            .push((table.to_string(), record.clone()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub messages: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn publish(&self, topic_arn: &str, message: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("NotFound: topic {} does not exist", topic_arn);
        }
        self.messages
            .lock()
            .unwrap()
            .push((topic_arn.to_string(), message.to_string()));
        Ok(())
    }
}

/// Settings with every collaborator target present.
pub fn full_settings() -> super::upload_service::UploadSettings {
    super::upload_service::UploadSettings {
        bucket_name: Some("media-bucket".into()),
        bucket_prefix: Some("incoming".into()),
        table_name: Some("uploads".into()),
        topic_arn: Some("arn:aws:sns:us-east-1:123456789012:uploads".into()),
    }
}
