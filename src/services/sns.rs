//! SNS-backed [`Notifier`].

use super::Notifier;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;

#[derive(Clone, Debug)]
pub struct SnsNotifier {
    inner: aws_sdk_sns::Client,
}

impl SnsNotifier {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self {
            inner: aws_sdk_sns::Client::new(aws_config),
        }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    #[tracing::instrument(skip(self, message))]
    async fn publish(&self, topic_arn: &str, message: &str) -> anyhow::Result<()> {
        let output = self
            .inner
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{}", DisplayErrorContext(&e)))?;

        tracing::debug!(message_id = ?output.message_id(), "published notification");
        Ok(())
    }
}
