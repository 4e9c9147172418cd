use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig, meta::region::RegionProviderChain};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub region: Option<String>,
    pub topic_arn: Option<String>,
    pub table_name: Option<String>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
    pub lambda: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Issues pre-signed S3 upload URLs")]
pub struct Args {
    /// Host to bind to (overrides UPLOAD_AUTHORIZER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides UPLOAD_AUTHORIZER_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// AWS region (overrides AWS_VPC_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// SNS topic receiving upload notifications (overrides AWS_SNS_TOPIC_ARN)
    #[arg(long)]
    pub topic_arn: Option<String>,

    /// DynamoDB table for upload records (overrides AWS_DYNAMODB_TABLE_NAME)
    #[arg(long)]
    pub table_name: Option<String>,

    /// Target bucket (overrides AWS_BUCKET_NAME)
    #[arg(long)]
    pub bucket_name: Option<String>,

    /// Key prefix inside the bucket (overrides AWS_BUCKET_PREFIX)
    #[arg(long)]
    pub bucket_prefix: Option<String>,

    /// Serve through the Lambda runtime instead of a TCP listener
    #[arg(long)]
    pub lambda: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |key| env::var(key).ok())
    }

    /// Merge parsed CLI args over values produced by `lookup`.
    ///
    /// Collaborator settings have no defaults: a missing one only fails the
    /// request that needs it.
    pub fn resolve<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_host = lookup("UPLOAD_AUTHORIZER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let env_port = match lookup("UPLOAD_AUTHORIZER_PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing UPLOAD_AUTHORIZER_PORT value `{}`", value))?,
            None => 3000,
        };

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            region: args.region.or_else(|| lookup("AWS_VPC_REGION")),
            topic_arn: args.topic_arn.or_else(|| lookup("AWS_SNS_TOPIC_ARN")),
            table_name: args.table_name.or_else(|| lookup("AWS_DYNAMODB_TABLE_NAME")),
            bucket_name: args.bucket_name.or_else(|| lookup("AWS_BUCKET_NAME")),
            bucket_prefix: args.bucket_prefix.or_else(|| lookup("AWS_BUCKET_PREFIX")),
            lambda: args.lambda || lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the shared AWS configuration every client is built from.
    pub async fn load_aws_config(&self) -> SdkConfig {
        let region_provider = RegionProviderChain::first_try(self.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new("us-east-1"));

        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await
    }
}
