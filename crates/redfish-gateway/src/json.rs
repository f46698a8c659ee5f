/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::http::standard_headers;

/// Anything that can contribute a JSON fragment to a Redfish payload.
pub trait JsonPatch {
    fn json_patch(&self) -> serde_json::Value;
}

impl JsonPatch for serde_json::Value {
    fn json_patch(&self) -> serde_json::Value {
        self.clone()
    }
}

pub trait JsonExt {
    /// Merge `patch` into `self` following JSON merge-patch rules:
    /// objects merge recursively, `null` removes the key and anything
    /// else replaces the existing value.
    fn patch(self, patch: impl JsonPatch) -> Self;

    fn into_ok_response(self) -> Response;

    fn into_response(self, status: StatusCode) -> Response;
}

impl JsonExt for serde_json::Value {
    fn patch(self, patch: impl JsonPatch) -> Self {
        merge(self, patch.json_patch())
    }

    fn into_ok_response(self) -> Response {
        JsonExt::into_response(self, StatusCode::OK)
    }

    fn into_response(self, status: StatusCode) -> Response {
        let mut response = (status, axum::Json(self)).into_response();
        standard_headers(response.headers_mut());
        response
    }
}

fn merge(target: serde_json::Value, patch: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match (target, patch) {
        (Value::Object(mut target), Value::Object(patch)) => {
            for (key, value) in patch {
                if value.is_null() {
                    target.remove(&key);
                    continue;
                }
                let merged = match target.remove(&key) {
                    Some(existing) => merge(existing, value),
                    None => value,
                };
                target.insert(key, merged);
            }
            Value::Object(target)
        }
        (_, patch) => patch,
    }
}
