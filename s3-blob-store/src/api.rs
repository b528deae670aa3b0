/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_bucket::{HeadBucketError, HeadBucketInput, HeadBucketOutput};
use aws_sdk_s3::operation::put_object::builders::PutObjectFluentBuilder;
use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectInput, PutObjectOutput};

/// The subset of the Amazon S3 API needed by a [`Store`](crate::Store).
///
/// Implemented for [`aws_sdk_s3::Client`]. Any other implementation (e.g.
/// [`MockS3Api`](crate::test_util::MockS3Api)) can be substituted for testing.
#[async_trait]
pub trait S3Api: Send + Sync + fmt::Debug {
    /// Check that a bucket exists and the caller has permission to access it.
    async fn head_bucket(
        &self,
        input: HeadBucketInput,
    ) -> Result<HeadBucketOutput, SdkError<HeadBucketError, HttpResponse>>;

    /// Write a single object, creating or replacing it.
    ///
    /// `options` are applied to this request only.
    async fn put_object(
        &self,
        input: PutObjectInput,
        options: &ApiOptions,
    ) -> Result<PutObjectOutput, SdkError<PutObjectError, HttpResponse>>;
}

#[async_trait]
impl S3Api for aws_sdk_s3::Client {
    async fn head_bucket(
        &self,
        input: HeadBucketInput,
    ) -> Result<HeadBucketOutput, SdkError<HeadBucketError, HttpResponse>> {
        self.head_bucket()
            .set_bucket(input.bucket)
            .set_expected_bucket_owner(input.expected_bucket_owner)
            .send()
            .await
    }

    async fn put_object(
        &self,
        input: PutObjectInput,
        options: &ApiOptions,
    ) -> Result<PutObjectOutput, SdkError<PutObjectError, HttpResponse>> {
        let req = copy_fields_to_put_object_request(input, self.put_object());

        match options.config_override() {
            Some(config_override) => {
                req.customize()
                    .config_override(config_override)
                    .send()
                    .await
            }
            None => req.send().await,
        }
    }
}

/// Move every field of `input` onto the `PutObject` fluent builder
fn copy_fields_to_put_object_request(
    input: PutObjectInput,
    put_object_builder: PutObjectFluentBuilder,
) -> PutObjectFluentBuilder {
    put_object_builder
        .set_acl(input.acl)
        .body(input.body)
        .set_bucket(input.bucket)
        .set_cache_control(input.cache_control)
        .set_content_disposition(input.content_disposition)
        .set_content_encoding(input.content_encoding)
        .set_content_language(input.content_language)
        .set_content_length(input.content_length)
        .set_content_md5(input.content_md5)
        .set_content_type(input.content_type)
        .set_checksum_algorithm(input.checksum_algorithm)
        .set_checksum_crc32(input.checksum_crc32)
        .set_checksum_crc32_c(input.checksum_crc32_c)
        .set_checksum_crc64_nvme(input.checksum_crc64_nvme)
        .set_checksum_sha1(input.checksum_sha1)
        .set_checksum_sha256(input.checksum_sha256)
        .set_expires(input.expires)
        .set_if_match(input.if_match)
        .set_if_none_match(input.if_none_match)
        .set_grant_full_control(input.grant_full_control)
        .set_grant_read(input.grant_read)
        .set_grant_read_acp(input.grant_read_acp)
        .set_grant_write_acp(input.grant_write_acp)
        .set_key(input.key)
        .set_write_offset_bytes(input.write_offset_bytes)
        .set_metadata(input.metadata)
        .set_server_side_encryption(input.server_side_encryption)
        .set_storage_class(input.storage_class)
        .set_website_redirect_location(input.website_redirect_location)
        .set_sse_customer_algorithm(input.sse_customer_algorithm)
        .set_sse_customer_key(input.sse_customer_key)
        .set_sse_customer_key_md5(input.sse_customer_key_md5)
        .set_ssekms_key_id(input.ssekms_key_id)
        .set_ssekms_encryption_context(input.ssekms_encryption_context)
        .set_bucket_key_enabled(input.bucket_key_enabled)
        .set_request_payer(input.request_payer)
        .set_tagging(input.tagging)
        .set_object_lock_mode(input.object_lock_mode)
        .set_object_lock_retain_until_date(input.object_lock_retain_until_date)
        .set_object_lock_legal_hold_status(input.object_lock_legal_hold_status)
        .set_expected_bucket_owner(input.expected_bucket_owner)
}

/// A per-request modifier applied to the S3 client configuration.
///
/// Options can register interceptors, override timeouts, etc. The store applies them as given
/// and never looks at what they do.
pub type ApiOption = Arc<dyn Fn(&mut aws_sdk_s3::config::Builder) + Send + Sync>;

/// An ordered list of [`ApiOption`]s.
#[derive(Clone, Default)]
pub struct ApiOptions {
    options: Vec<ApiOption>,
}

impl ApiOptions {
    /// Create an empty set of options
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option. Options are applied in the order they were added.
    pub fn push<F>(&mut self, option: F)
    where
        F: Fn(&mut aws_sdk_s3::config::Builder) + Send + Sync + 'static,
    {
        self.options.push(Arc::new(option));
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if there are no options
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Build a config override by applying every option, in order, to an empty
    /// [`aws_sdk_s3::config::Builder`].
    ///
    /// Returns `None` when there are no options so the request goes out with the client's
    /// configuration as is.
    pub fn config_override(&self) -> Option<aws_sdk_s3::config::Builder> {
        if self.options.is_empty() {
            return None;
        }

        let mut builder = aws_sdk_s3::config::Builder::default();
        for option in &self.options {
            option(&mut builder);
        }
        Some(builder)
    }
}

impl fmt::Debug for ApiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiOptions")
            .field("len", &self.options.len())
            .finish()
    }
}

impl From<Vec<ApiOption>> for ApiOptions {
    fn from(options: Vec<ApiOption>) -> Self {
        Self { options }
    }
}

impl FromIterator<ApiOption> for ApiOptions {
    fn from_iter<I: IntoIterator<Item = ApiOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl Extend<ApiOption> for ApiOptions {
    fn extend<I: IntoIterator<Item = ApiOption>>(&mut self, iter: I) {
        self.options.extend(iter);
    }
}
