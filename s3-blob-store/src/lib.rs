/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! A narrow, health-checkable blob store on top of Amazon S3.
//!
//! The [`Store`] reduces the S3 API to two operations: checking that the configured bucket
//! is reachable ([`Store::ping`]) and writing a single object with optional metadata
//! ([`Store::upload`], [`Store::upload_with_metadata`]). Everything else (credentials,
//! endpoints, retries, timeouts) is left to the underlying [`aws_sdk_s3::Client`].
//!
//! # Crate Features
//!
//! - `test-util`: Enables the [`test_util::MockS3Api`] test double. DO NOT ENABLE IN PRODUCTION.
//!
//! # Examples
//!
//! Load the default AWS configuration and check the bucket:
//!
//! ```no_run
//! # async fn example() -> Result<(), s3_blob_store::error::Error> {
//! let store = s3_blob_store::from_env().bucket("my-bucket").load().await?;
//! store.ping().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Upload an object with metadata:
//!
//! ```no_run
//! use aws_sdk_s3::primitives::ByteStream;
//! use s3_blob_store::types::Metadata;
//!
//! # async fn example(store: s3_blob_store::Store) -> Result<(), s3_blob_store::error::Error> {
//! let mut metadata = Metadata::new();
//! metadata.insert("content-origin".to_owned(), "camera-7".to_owned());
//!
//! store
//!     .upload_with_metadata(
//!         "images/0001.png",
//!         Some(ByteStream::from_static(b"...")),
//!         Some(metadata),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Error types emitted by `s3-blob-store`
pub mod error;

/// Common types used by `s3-blob-store`
pub mod types;

/// The subset of the S3 API the store depends on
pub mod api;

/// Store configuration
pub mod config;

/// The blob store
pub mod store;

/// Test doubles for the S3 API
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use self::api::{ApiOption, ApiOptions, S3Api};
use self::config::loader::ConfigLoader;
pub use self::config::Config;
pub use self::store::{BlobStore, Store};

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
