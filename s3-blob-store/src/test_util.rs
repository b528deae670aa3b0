/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_bucket::{HeadBucketError, HeadBucketInput, HeadBucketOutput};
use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectInput, PutObjectOutput};
use bytes::Bytes;

use crate::api::{ApiOptions, S3Api};
use crate::types::Metadata;

type HeadBucketResult = Result<HeadBucketOutput, SdkError<HeadBucketError, HttpResponse>>;
type PutObjectResult = Result<PutObjectOutput, SdkError<PutObjectError, HttpResponse>>;

type HeadBucketResponder = Box<dyn Fn(&HeadBucketInput) -> HeadBucketResult + Send + Sync>;
type PutObjectResponder = Box<dyn Fn(&RecordedPutObject) -> PutObjectResult + Send + Sync>;

/// A `PutObject` request as seen by [`MockS3Api`], with the body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPutObject {
    /// Target bucket
    pub bucket: Option<String>,
    /// Object key
    pub key: Option<String>,
    /// Object content
    pub body: Bytes,
    /// User metadata
    pub metadata: Option<Metadata>,
    /// Number of api options the request was sent with
    pub api_options: usize,
}

/// Call recording stand-in for [`S3Api`].
///
/// Every call is recorded and answered by a programmable responder. Unprogrammed operations
/// succeed with an empty output.
#[derive(Default)]
pub struct MockS3Api {
    head_bucket: Option<HeadBucketResponder>,
    put_object: Option<PutObjectResponder>,
    head_bucket_calls: Mutex<Vec<HeadBucketInput>>,
    put_object_calls: Mutex<Vec<RecordedPutObject>>,
}

impl MockS3Api {
    /// Create a mock where every operation succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `HeadBucket` requests with `f`
    pub fn on_head_bucket<F>(mut self, f: F) -> Self
    where
        F: Fn(&HeadBucketInput) -> HeadBucketResult + Send + Sync + 'static,
    {
        self.head_bucket = Some(Box::new(f));
        self
    }

    /// Answer `PutObject` requests with `f`
    pub fn on_put_object<F>(mut self, f: F) -> Self
    where
        F: Fn(&RecordedPutObject) -> PutObjectResult + Send + Sync + 'static,
    {
        self.put_object = Some(Box::new(f));
        self
    }

    /// All `HeadBucket` requests received so far
    pub fn head_bucket_calls(&self) -> Vec<HeadBucketInput> {
        lock(&self.head_bucket_calls).clone()
    }

    /// All `PutObject` requests received so far
    pub fn put_object_calls(&self) -> Vec<RecordedPutObject> {
        lock(&self.put_object_calls).clone()
    }

    /// Number of `HeadBucket` requests received so far
    pub fn head_bucket_call_count(&self) -> usize {
        lock(&self.head_bucket_calls).len()
    }

    /// Number of `PutObject` requests received so far
    pub fn put_object_call_count(&self) -> usize {
        lock(&self.put_object_calls).len()
    }
}

// a panicking responder must not hide the calls recorded before it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl fmt::Debug for MockS3Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockS3Api")
            .field("head_bucket_calls", &self.head_bucket_call_count())
            .field("put_object_calls", &self.put_object_call_count())
            .finish()
    }
}

#[async_trait]
impl S3Api for MockS3Api {
    async fn head_bucket(&self, input: HeadBucketInput) -> HeadBucketResult {
        lock(&self.head_bucket_calls).push(input.clone());
        match &self.head_bucket {
            Some(responder) => responder(&input),
            None => Ok(HeadBucketOutput::builder().build()),
        }
    }

    async fn put_object(&self, input: PutObjectInput, options: &ApiOptions) -> PutObjectResult {
        let body = match input.body.collect().await {
            Ok(data) => data.into_bytes(),
            Err(err) => return Err(SdkError::construction_failure(err)),
        };
        let recorded = RecordedPutObject {
            bucket: input.bucket,
            key: input.key,
            body,
            metadata: input.metadata,
            api_options: options.len(),
        };

        lock(&self.put_object_calls).push(recorded.clone());
        match &self.put_object {
            Some(responder) => responder(&recorded),
            None => Ok(PutObjectOutput::builder().build()),
        }
    }
}
