//! S3 object reads through the AWS SDK.
//!
//! Credentials and region come from the standard AWS chain (environment,
//! shared profile files, SSO, container and instance roles). An `endpoint`
//! override switches to path-style addressing (MinIO, local fakes).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client;
use bytes::Bytes;

use quantlab_core::error::{QuantlabError, Result};

use super::ObjectStore;
use crate::config::StoreConfig;

#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
    location: String,
    timeout_ms: u64,
}

impl S3Store {
    /// Client over the default AWS credential chain.
    pub async fn new(cfg: &StoreConfig) -> Self {
        Self::from_loader(cfg, aws_config::defaults(BehaviorVersion::latest())).await
    }

    /// Client over a caller-tuned loader (profile files, credential provider).
    pub async fn from_loader(cfg: &StoreConfig, loader: ConfigLoader) -> Self {
        let shared = loader.region(Region::new(cfg.region.clone())).load().await;
        Self::with_config(cfg, aws_sdk_s3::config::Builder::from(&shared))
    }

    /// Apply region, endpoint, timeout and retry settings from `cfg` on top of
    /// `builder` and build the client.
    pub fn with_config(cfg: &StoreConfig, builder: aws_sdk_s3::config::Builder) -> Self {
        let timeouts = TimeoutConfig::builder()
            .connect_timeout(cfg.timeout())
            .operation_timeout(cfg.timeout())
            .build();

        // the cache retries on the next request
        let mut builder = builder
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .timeout_config(timeouts)
            .retry_config(RetryConfig::disabled());

        let location = match &cfg.endpoint {
            Some(ep) => {
                let ep = ep.trim_end_matches('/');
                builder = builder.endpoint_url(ep).force_path_style(true);
                format!("s3://{} via {ep}", cfg.bucket)
            }
            None => format!("s3://{} in {}", cfg.bucket, cfg.region),
        };

        Self {
            client: Client::from_conf(builder.build()),
            bucket: cfg.bucket.clone(),
            location,
            timeout_ms: cfg.timeout_ms,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn map_error(&self, key: &str, err: SdkError<GetObjectError>) -> QuantlabError {
        let what = format!("s3://{}/{key}", self.bucket);
        match err {
            SdkError::TimeoutError(_) => QuantlabError::Timeout(self.timeout_ms),
            SdkError::DispatchFailure(f) if f.is_timeout() => QuantlabError::Timeout(self.timeout_ms),
            SdkError::ServiceError(se) => {
                let status = se.raw().status().as_u16();
                let e = se.err();
                let detail = format!("{what} ({status}, code={})", e.code().unwrap_or("-"));
                if e.is_no_such_key() || status == 404 {
                    QuantlabError::NotFound(detail)
                } else if status == 401 || status == 403 {
                    QuantlabError::AccessDenied(detail)
                } else {
                    QuantlabError::Unreachable(detail)
                }
            }
            other => QuantlabError::Unreachable(format!("{what}: {}", DisplayErrorContext(&other))),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, key: &str) -> Result<Bytes> {
        let out = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key.trim_start_matches('/'))
            .send()
            .await
            .map_err(|e| self.map_error(key, e))?;

        let body = out.body.collect().await.map_err(|e| {
            QuantlabError::Unreachable(format!("s3://{}/{key}: body read failed: {e}", self.bucket))
        })?;
        Ok(body.into_bytes())
    }

    fn describe(&self) -> String {
        self.location.clone()
    }
}
