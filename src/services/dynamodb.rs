//! DynamoDB-backed [`RecordStore`].

use super::RecordStore;
use crate::models::upload::UploadRecord;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct DynamoRecordStore {
    inner: aws_sdk_dynamodb::Client,
}

impl DynamoRecordStore {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self {
            inner: aws_sdk_dynamodb::Client::new(aws_config),
        }
    }
}

/// Every attribute is stored as a string (`S`).
fn record_item(record: &UploadRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("email".to_string(), AttributeValue::S(record.email.clone())),
        ("url".to_string(), AttributeValue::S(record.url.clone())),
        (
            "datetime".to_string(),
            AttributeValue::S(record.datetime.clone()),
        ),
    ])
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    #[tracing::instrument(skip(self, record))]
    async fn put_record(&self, table: &str, record: &UploadRecord) -> anyhow::Result<()> {
        self.inner
            .put_item()
            .table_name(table)
            .set_item(Some(record_item(record)))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{}", DisplayErrorContext(&e)))?;

        tracing::debug!(url = %record.url, "saved upload record");
        Ok(())
    }
}
