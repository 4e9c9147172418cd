//! S3-backed [`UploadSigner`].

use super::UploadSigner;
use anyhow::Context;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::{error::DisplayErrorContext, presigning::PresigningConfig};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct S3UploadSigner {
    inner: aws_sdk_s3::Client,
}

impl S3UploadSigner {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_s3::Client::new(aws_config))
    }

    pub fn from_client(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    #[tracing::instrument(skip(self))]
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> anyhow::Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .context("invalid presigning expiry")?;

        let request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| anyhow::anyhow!("{}", DisplayErrorContext(&e)))?;

        tracing::debug!("generated presigned PUT url");
        Ok(request.uri().to_string())
    }
}
