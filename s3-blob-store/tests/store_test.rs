/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{ErrorMetadata, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::head_bucket::{HeadBucketError, HeadBucketOutput};
use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectInput, PutObjectOutput};
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_mocks::{mock, mock_client, RuleMode};
use aws_smithy_runtime::test_util::capture_test_logs::capture_test_logs;
use s3_blob_store::error::ErrorKind;
use s3_blob_store::types::Metadata;
use s3_blob_store::{ApiOptions, Config, S3Api, Store};

const BUCKET: &str = "test_bucket";

// These tests drive a real `aws_sdk_s3::Client` with mocked responses, so they cover the
// `S3Api` implementation for the SDK client as well as the store itself.

#[tokio::test]
async fn test_ping() {
    let (_guard, _rx) = capture_test_logs();
    let head_bucket = mock!(aws_sdk_s3::Client::head_bucket)
        .match_requests(|r| r.bucket() == Some(BUCKET))
        .then_output(|| HeadBucketOutput::builder().build());
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_bucket]);

    let store = Store::new(client, BUCKET).unwrap();
    store.ping().await.unwrap();

    assert_eq!(1, head_bucket.num_calls());
}

#[tokio::test]
async fn test_ping_not_found() {
    let head_bucket = mock!(aws_sdk_s3::Client::head_bucket).then_error(|| {
        HeadBucketError::generic(ErrorMetadata::builder().code("NotFound").build())
    });
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_bucket]);

    let store = Store::new(client, BUCKET).unwrap();
    let err = store.ping().await.unwrap_err();
    assert_eq!(&ErrorKind::Backend, err.kind());

    let sdk_err = err
        .into_source()
        .downcast::<SdkError<HeadBucketError, HttpResponse>>()
        .expect("backend error is returned unmodified");
    assert_eq!(Some("NotFound"), sdk_err.code());
}

#[tokio::test]
async fn test_upload() {
    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(|r| {
            r.bucket() == Some(BUCKET)
                && r.key() == Some("key_1")
                && r.body().bytes() == Some(&b"my_body"[..])
                && r.metadata() == Some(&Metadata::new())
        })
        .then_output(|| PutObjectOutput::builder().e_tag("test-etag").build());
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);

    let store = Store::new(client, BUCKET).unwrap();
    store
        .upload("key_1", Some(ByteStream::from_static(b"my_body")))
        .await
        .unwrap();

    assert_eq!(1, put_object.num_calls());
}

#[tokio::test]
async fn test_upload_with_metadata() {
    let mut metadata = Metadata::new();
    metadata.insert("origin".to_owned(), "camera-7".to_owned());

    let expected = metadata.clone();
    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(move |r| r.key() == Some("key_1") && r.metadata() == Some(&expected))
        .then_output(|| PutObjectOutput::builder().build());
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);

    let store = Store::new(client, BUCKET).unwrap();
    store
        .upload_with_metadata(
            "key_1",
            Some(ByteStream::from_static(b"my_body")),
            Some(metadata),
        )
        .await
        .unwrap();

    assert_eq!(1, put_object.num_calls());
}

#[tokio::test]
async fn test_upload_failure() {
    let put_object = mock!(aws_sdk_s3::Client::put_object).then_error(|| {
        PutObjectError::generic(ErrorMetadata::builder().code("AccessDenied").build())
    });
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);

    let store = Store::new(client, BUCKET).unwrap();
    let err = store
        .upload("key_1", Some(ByteStream::from_static(b"my_body")))
        .await
        .unwrap_err();
    assert_eq!(&ErrorKind::Backend, err.kind());

    let sdk_err = err
        .into_source()
        .downcast::<SdkError<PutObjectError, HttpResponse>>()
        .expect("backend error is returned unmodified");
    assert_eq!(Some("AccessDenied"), sdk_err.code());
}

#[tokio::test]
async fn test_upload_invalid_arguments_never_reach_s3() {
    let put_object =
        mock!(aws_sdk_s3::Client::put_object).then_output(|| PutObjectOutput::builder().build());
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put_object]);

    let store = Store::new(client, BUCKET).unwrap();

    let err = store
        .upload("", Some(ByteStream::from_static(b"my_body")))
        .await
        .unwrap_err();
    assert_eq!(&ErrorKind::InvalidArgument, err.kind());

    let err = store.upload("key_1", None).await.unwrap_err();
    assert_eq!(&ErrorKind::InvalidArgument, err.kind());

    assert_eq!(0, put_object.num_calls());
}

#[tokio::test]
async fn test_upload_applies_api_options() {
    let applied = Arc::new(AtomicUsize::new(0));
    let config = Config::builder()
        .bucket(BUCKET)
        .api_option({
            let applied = applied.clone();
            move |_| {
                applied.fetch_add(1, Ordering::SeqCst);
            }
        })
        .build()
        .unwrap();

    let put_object =
        mock!(aws_sdk_s3::Client::put_object).then_output(|| PutObjectOutput::builder().build());
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put_object]);

    let store = Store::from_conf(client, config);
    for key in ["key_1", "key_2"] {
        store
            .upload(key, Some(ByteStream::from_static(b"my_body")))
            .await
            .unwrap();
    }

    // once per request
    assert_eq!(2, applied.load(Ordering::SeqCst));
    assert_eq!(2, put_object.num_calls());
}

#[tokio::test]
async fn test_sdk_client_forwards_every_put_object_field() {
    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(|r| {
            r.bucket() == Some(BUCKET)
                && r.key() == Some("key_1")
                && r.body().bytes() == Some(&b"my_body"[..])
                && r.content_type() == Some("image/png")
                && r.cache_control() == Some("no-cache")
                && r.tagging() == Some("origin=camera-7")
                && r.expected_bucket_owner() == Some("123456789012")
        })
        .then_output(|| PutObjectOutput::builder().build());
    let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);

    let input = PutObjectInput::builder()
        .bucket(BUCKET)
        .key("key_1")
        .body(ByteStream::from_static(b"my_body"))
        .content_type("image/png")
        .cache_control("no-cache")
        .tagging("origin=camera-7")
        .expected_bucket_owner("123456789012")
        .build()
        .unwrap();
    S3Api::put_object(&client, input, &ApiOptions::new())
        .await
        .unwrap();

    assert_eq!(1, put_object.num_calls());
}
