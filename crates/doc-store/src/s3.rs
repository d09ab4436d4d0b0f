//! S3-compatible backend built on aws-sdk-s3.

use std::fmt;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use chrono::{DateTime, Utc};

use crate::backend::{BackendError, ObjectBackend, ObjectBody, ObjectHead, ObjectSummary, Result};

/// Connection settings for an S3-compatible endpoint.
#[derive(Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub region: String,
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .finish()
    }
}

pub struct S3Backend {
    client: Client,
    bucket: String,
}

impl S3Backend {
    /// Build a client for `config`.
    ///
    /// Uses path-style addressing (required by most S3-compatible services)
    /// and disables SDK retries so every operation is a single attempt.
    pub async fn connect(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "bucket-docs",
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(config.endpoint.clone())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        Self::from_client(Client::from_conf(s3_config), &config.bucket_name)
    }

    pub fn from_client(client: Client, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }
}

fn to_chrono(dt: Option<&aws_sdk_s3::primitives::DateTime>) -> Option<DateTime<Utc>> {
    dt.and_then(|dt| DateTime::from_timestamp(dt.secs(), dt.subsec_nanos()))
}

fn to_size(len: Option<i64>) -> Option<u64> {
    len.and_then(|n| u64::try_from(n).ok())
}

/// The service's own message when it sent one, else the whole error chain.
fn error_message<E>(err: &SdkError<E>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    err.as_service_error()
        .and_then(ProvideErrorMetadata::message)
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(err).to_string())
}

/// Some S3-compatible services answer a missing key with a bare 404 and no error code.
fn is_http_not_found<E>(err: &SdkError<E>) -> bool {
    err.raw_response()
        .is_some_and(|response| response.status().as_u16() == 404)
}

#[async_trait]
impl ObjectBackend for S3Backend {
    async fn list_objects(&self, prefix: Option<&str>, max_keys: u32) -> Result<Vec<ObjectSummary>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(prefix.map(str::to_string))
            .max_keys(i32::try_from(max_keys).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|err| BackendError::Service(error_message(&err)))?;

        Ok(output
            .contents()
            .iter()
            .map(|object| ObjectSummary {
                key: object.key().unwrap_or_default().to_string(),
                size: to_size(object.size()),
                last_modified: to_chrono(object.last_modified()),
                // ListObjectsV2 does not report content types
                content_type: None,
            })
            .collect())
    }

    async fn get_object(&self, key: &str) -> Result<ObjectBody> {
        let output = match self.client.get_object().bucket(&self.bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) => {
                let message = error_message(&err);
                let missing = err
                    .as_service_error()
                    .is_some_and(|e| e.is_no_such_key())
                    || is_http_not_found(&err);
                return Err(if missing {
                    BackendError::NotFound(message)
                } else {
                    BackendError::Service(message)
                });
            }
        };

        let content_type = output.content_type().map(str::to_string);
        let content_length = to_size(output.content_length());
        let last_modified = to_chrono(output.last_modified());

        let body = output
            .body
            .collect()
            .await
            .map_err(|err| BackendError::Service(format!("failed to collect body: {}", err)))?
            .into_bytes()
            .to_vec();

        Ok(ObjectBody {
            body: Some(body),
            content_type,
            content_length,
            last_modified,
        })
    }

    async fn head_object(&self, key: &str) -> Result<ObjectHead> {
        match self.client.head_object().bucket(&self.bucket).key(key).send().await {
            Ok(output) => Ok(ObjectHead {
                content_type: output.content_type().map(str::to_string),
                content_length: to_size(output.content_length()),
                last_modified: to_chrono(output.last_modified()),
            }),
            Err(err) => {
                let message = error_message(&err);
                let missing = err
                    .as_service_error()
                    .is_some_and(|e| e.is_not_found())
                    || is_http_not_found(&err);
                Err(if missing {
                    BackendError::NotFound(message)
                } else {
                    BackendError::Service(message)
                })
            }
        }
    }
}
