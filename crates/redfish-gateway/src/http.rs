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

//! Wire-level conventions shared by every Redfish response.

use axum::extract::OriginalUri;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter};
use http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, HeaderName};
use http::{HeaderMap, HeaderValue, Method, StatusCode};

use crate::redfish::message_registry::RedfishError;

pub const ODATA_VERSION: &str = "4.0";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const XML_CONTENT_TYPE: &str = "application/xml";
pub const DEFAULT_CACHE_CONTROL: &str = "no-cache";
pub const FIRMWARE_CACHE_CONTROL: &str = "max-age=300";
pub const X_FRAME_OPTIONS_VALUE: &str = "DENY";
pub const CSP_VALUE: &str = "default-src 'self'";

pub const ODATA_VERSION_HEADER: HeaderName = HeaderName::from_static("odata-version");
pub const X_FRAME_OPTIONS: HeaderName = HeaderName::from_static("x-frame-options");
pub const CONTENT_SECURITY_POLICY: HeaderName =
    HeaderName::from_static("content-security-policy");

/// Applies the header set every Redfish response carries.
pub fn standard_headers(headers: &mut HeaderMap) {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ODATA_VERSION_HEADER, HeaderValue::from_static(ODATA_VERSION));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(DEFAULT_CACHE_CONTROL));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static(X_FRAME_OPTIONS_VALUE));
    headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP_VALUE));
}

pub trait ResponseHeadersExt {
    fn with_etag(self, etag: &str) -> Self;
    fn with_cache_control(self, value: &'static str) -> Self;
    fn with_content_type(self, value: &'static str) -> Self;
}

impl ResponseHeadersExt for Response {
    fn with_etag(mut self, etag: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(etag) {
            self.headers_mut().insert(ETAG, value);
        }
        self
    }

    fn with_cache_control(mut self, value: &'static str) -> Self {
        self.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static(value));
        self
    }

    fn with_content_type(mut self, value: &'static str) -> Self {
        self.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(value));
        self
    }
}

/// Wraps a bare entity tag in quotes unless it is already quoted or weak.
pub fn quoted_etag(tag: &str) -> String {
    if tag.starts_with('"') || tag.starts_with("W/") {
        tag.to_string()
    } else {
        format!("\"{tag}\"")
    }
}

/// Empty 304 that still carries the current entity tag.
pub fn not_modified(etag: &str) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    standard_headers(response.headers_mut());
    response.with_etag(etag)
}

fn method_filter(method: &Method) -> Option<MethodFilter> {
    match *method {
        Method::GET => Some(MethodFilter::GET),
        Method::POST => Some(MethodFilter::POST),
        Method::PUT => Some(MethodFilter::PUT),
        Method::PATCH => Some(MethodFilter::PATCH),
        Method::DELETE => Some(MethodFilter::DELETE),
        _ => None,
    }
}

const REJECTABLE_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

pub fn allow_header(allowed: &[Method]) -> String {
    allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Registers a Redfish 405 body for every standard method the route does
/// not serve. `resource_type` names the resource in the error message.
pub fn reject_other_methods<S>(
    route: MethodRouter<S>,
    resource_type: &'static str,
    allowed: &'static [Method],
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    REJECTABLE_METHODS
        .iter()
        .filter(|method| !allowed.contains(*method))
        .filter_map(method_filter)
        .fold(route, |route, filter| {
            route.on(filter, move |method: Method| async move {
                RedfishError::method_not_allowed(&method, resource_type, &allow_header(allowed))
            })
        })
}

/// Same as [`reject_other_methods`] but for action targets, which answer
/// with `ActionNotSupported`.
pub fn reject_other_action_methods<S>(
    route: MethodRouter<S>,
    action: &'static str,
    allowed: &'static [Method],
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    REJECTABLE_METHODS
        .iter()
        .filter(|method| !allowed.contains(*method))
        .filter_map(method_filter)
        .fold(route, |route, filter| {
            route.on(filter, move || async move {
                RedfishError::action_not_supported(action, &allow_header(allowed))
            })
        })
}

/// Router fallback for paths nothing else claims.
pub async fn resource_not_found(OriginalUri(uri): OriginalUri) -> RedfishError {
    RedfishError::resource_not_found("Resource", uri.path())
}
