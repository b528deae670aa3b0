/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::api::{ApiOption, ApiOptions};
use crate::error;

pub(crate) mod loader;

/// Configuration for a [`Store`](crate::Store)
#[derive(Debug, Clone)]
pub struct Config {
    bucket: String,
    api_options: ApiOptions,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket all operations target
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Options applied to every `PutObject` request
    pub fn api_options(&self) -> &ApiOptions {
        &self.api_options
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    bucket: Option<String>,
    api_options: ApiOptions,
}

impl Builder {
    /// The bucket all operations target. Required and must not be empty.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Append a per-request modifier applied to every `PutObject` request.
    ///
    /// Options are applied in the order they are added.
    pub fn api_option<F>(mut self, option: F) -> Self
    where
        F: Fn(&mut aws_sdk_s3::config::Builder) + Send + Sync + 'static,
    {
        self.api_options.push(option);
        self
    }

    /// Append several per-request modifiers.
    pub fn api_options(mut self, options: impl IntoIterator<Item = ApiOption>) -> Self {
        self.api_options.extend(options);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// Fails with [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// when the bucket is missing or empty.
    pub fn build(self) -> Result<Config, error::Error> {
        let bucket = match self.bucket {
            Some(bucket) if !bucket.is_empty() => bucket,
            _ => return Err(error::invalid_configuration("bucket name cannot be empty")),
        };

        Ok(Config {
            bucket,
            api_options: self.api_options,
        })
    }
}
