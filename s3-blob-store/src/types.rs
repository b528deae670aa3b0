/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;

/// User defined metadata attached to an uploaded object.
///
/// Sent to S3 as `x-amz-meta-*` headers.
pub type Metadata = HashMap<String, String>;
