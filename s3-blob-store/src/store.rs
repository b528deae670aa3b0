/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use async_trait::async_trait;
use aws_sdk_s3::operation::head_bucket::HeadBucketInput;
use aws_sdk_s3::operation::put_object::PutObjectInput;
use aws_sdk_s3::primitives::ByteStream;
use tracing::Instrument;

use crate::api::S3Api;
use crate::config::Config;
use crate::error;
use crate::types::Metadata;

/// Blob storage operations offered by a [`Store`].
///
/// Depend on this trait instead of [`Store`] when the storage backend should be swappable.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Check connection health
    async fn ping(&self) -> Result<(), error::Error>;

    /// Upload `body` under `key`. See [`Store::upload`].
    async fn upload(&self, key: &str, body: Option<ByteStream>) -> Result<(), error::Error>;

    /// Upload `body` under `key` with user metadata. See [`Store::upload_with_metadata`].
    async fn upload_with_metadata(
        &self,
        key: &str,
        body: Option<ByteStream>,
        metadata: Option<Metadata>,
    ) -> Result<(), error::Error>;
}

/// A blob store writing objects into a single S3 bucket.
///
/// The store owns its client and never mutates its state after construction, so a single
/// store can be shared across tasks (e.g. behind an `Arc`). Timeouts, retries and
/// cancellation are up to the client and the caller: dropping the returned future cancels
/// the request.
#[derive(Debug, Clone)]
pub struct Store<C = aws_sdk_s3::Client> {
    client: C,
    config: Config,
}

impl<C: S3Api> Store<C> {
    /// Creates a new store targeting `bucket`.
    ///
    /// Fails with [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// when `bucket` is empty. No requests are made.
    pub fn new(client: C, bucket: impl Into<String>) -> Result<Self, error::Error> {
        let config = Config::builder().bucket(bucket).build()?;
        Ok(Self::from_conf(client, config))
    }

    /// Creates a new store from an already validated [`Config`].
    pub fn from_conf(client: C, config: Config) -> Self {
        Self { client, config }
    }

    /// Returns the store's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the bucket this store writes to
    pub fn bucket(&self) -> &str {
        self.config.bucket()
    }

    /// Returns the underlying S3 client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Checks that the bucket exists and is accessible. Useful as a health check.
    ///
    /// Any error from `HeadBucket` is returned as
    /// [`ErrorKind::Backend`](crate::error::ErrorKind::Backend).
    pub async fn ping(&self) -> Result<(), error::Error> {
        let input = HeadBucketInput::builder()
            .bucket(self.config.bucket())
            .build()?;

        self.client
            .head_bucket(input)
            .instrument(tracing::debug_span!(
                "send-head-bucket",
                bucket = self.config.bucket()
            ))
            .await?;
        Ok(())
    }

    /// Uploads `body` under `key`, replacing any existing object.
    ///
    /// Same as [`upload_with_metadata`](Self::upload_with_metadata) with no metadata.
    pub async fn upload(&self, key: &str, body: Option<ByteStream>) -> Result<(), error::Error> {
        self.upload_with_metadata(key, body, None).await
    }

    /// Uploads `body` under `key` with user metadata, replacing any existing object.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// before any request is made when `key` is empty or `body` is `None`. Missing metadata
    /// is sent as an empty map. The store's api options are applied to the request.
    pub async fn upload_with_metadata(
        &self,
        key: &str,
        body: Option<ByteStream>,
        metadata: Option<Metadata>,
    ) -> Result<(), error::Error> {
        if key.is_empty() {
            return Err(error::invalid_argument("key cannot be empty"));
        }
        let body = body.ok_or_else(|| error::invalid_argument("body cannot be empty"))?;

        let input = PutObjectInput::builder()
            .bucket(self.config.bucket())
            .key(key)
            .body(body)
            .set_metadata(Some(metadata.unwrap_or_default()))
            .build()?;

        self.client
            .put_object(input, self.config.api_options())
            .instrument(tracing::debug_span!(
                "send-put-object",
                bucket = self.config.bucket(),
                key = key
            ))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<C: S3Api> BlobStore for Store<C> {
    async fn ping(&self) -> Result<(), error::Error> {
        Store::ping(self).await
    }

    async fn upload(&self, key: &str, body: Option<ByteStream>) -> Result<(), error::Error> {
        Store::upload(self, key, body).await
    }

    async fn upload_with_metadata(
        &self,
        key: &str,
        body: Option<ByteStream>,
        metadata: Option<Metadata>,
    ) -> Result<(), error::Error> {
        Store::upload_with_metadata(self, key, body, metadata).await
    }
}
