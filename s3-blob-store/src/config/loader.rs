/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::api::ApiOption;
use crate::config::Builder;
use crate::error;
use crate::Store;

/// Load a [`Store`] backed by an [`aws_sdk_s3::Client`] configured from the environment.
///
/// Credentials, region and endpoint are resolved by `aws-config`'s default provider chains.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
}

impl ConfigLoader {
    /// The bucket all operations target. Required and must not be empty.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.builder = self.builder.bucket(bucket);
        self
    }

    /// Append a per-request modifier applied to every `PutObject` request.
    pub fn api_option<F>(mut self, option: F) -> Self
    where
        F: Fn(&mut aws_sdk_s3::config::Builder) + Send + Sync + 'static,
    {
        self.builder = self.builder.api_option(option);
        self
    }

    /// Append several per-request modifiers.
    pub fn api_options(mut self, options: impl IntoIterator<Item = ApiOption>) -> Self {
        self.builder = self.builder.api_options(options);
        self
    }

    /// Load the default AWS configuration and construct a [`Store`].
    ///
    /// The store configuration is validated before anything is loaded from the environment.
    pub async fn load(self) -> Result<Store<aws_sdk_s3::Client>, error::Error> {
        let config = self.builder.build()?;
        let shared_config = aws_config::from_env().load().await;
        let s3_client = aws_sdk_s3::Client::new(&shared_config);
        tracing::debug!(bucket = config.bucket(), "loaded store from environment");
        Ok(Store::from_conf(s3_client, config))
    }
}
