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

//! Request checks shared by every Redfish route.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, IF_MATCH, IF_NONE_MATCH};
use http::{HeaderMap, Method};

use crate::etag::header_matches;
use crate::redfish::metadata::METADATA_PATH;
use crate::redfish::message_registry::RedfishError;

pub const MAX_REQUEST_BODY: usize = 1024 * 1024;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Properties a client may never set on a Chassis.
pub const CHASSIS_READ_ONLY_PROPERTIES: &[&str] = &[
    "Id",
    "Name",
    "@odata.context",
    "@odata.id",
    "@odata.type",
    "@odata.etag",
    "ChassisType",
    "Manufacturer",
    "Model",
    "SKU",
    "SerialNumber",
    "PartNumber",
    "Status",
    "Links",
    "PowerState",
];

fn header_str<'a>(headers: &'a HeaderMap, name: http::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn check_accept(headers: &HeaderMap) -> Result<(), RedfishError> {
    let Some(accept) = headers.get(ACCEPT) else {
        return Ok(());
    };
    let accept = String::from_utf8_lossy(accept.as_bytes());
    if accept.is_empty() || accept.contains("*/*") || accept.contains(JSON_MEDIA_TYPE) {
        return Ok(());
    }
    Err(RedfishError::not_acceptable(&accept))
}

pub fn check_content_type(headers: &HeaderMap) -> Result<(), RedfishError> {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return Ok(());
    };
    let content_type = String::from_utf8_lossy(content_type.as_bytes());
    if content_type.starts_with(JSON_MEDIA_TYPE) {
        return Ok(());
    }
    Err(RedfishError::unsupported_media_type(&content_type))
}

pub fn check_content_length(headers: &HeaderMap) -> Result<(), RedfishError> {
    let declared = header_str(headers, CONTENT_LENGTH).and_then(|v| v.parse::<u64>().ok());
    match declared {
        Some(len) if len > MAX_REQUEST_BODY as u64 => {
            Err(RedfishError::payload_too_large(MAX_REQUEST_BODY))
        }
        _ => Ok(()),
    }
}

/// Middleware: content negotiation and body size checks. `$metadata` is
/// XML and skips the Accept check.
pub async fn request_guard(request: Request, next: Next) -> Result<Response, RedfishError> {
    let headers = request.headers();
    if request.uri().path() != METADATA_PATH {
        check_accept(headers)?;
    }
    if request.method() != Method::GET && request.method() != Method::HEAD {
        check_content_type(headers)?;
        check_content_length(headers)?;
    }
    Ok(next.run(request).await)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Precondition {
    Proceed,
    NotModified,
}

/// Evaluates `If-Match` and, for reads, `If-None-Match` against the
/// resource's current entity tag.
pub fn evaluate_preconditions(
    method: &Method,
    headers: &HeaderMap,
    current_etag: &str,
) -> Result<Precondition, RedfishError> {
    if let Some(if_match) = header_str(headers, IF_MATCH)
        && !header_matches(if_match, current_etag)
    {
        return Err(RedfishError::precondition_failed());
    }
    if *method == Method::GET || *method == Method::HEAD {
        if let Some(if_none_match) = header_str(headers, IF_NONE_MATCH)
            && header_matches(if_none_match, current_etag)
        {
            return Ok(Precondition::NotModified);
        }
    }
    Ok(Precondition::Proceed)
}

/// First read-only property present in a PATCH body, in list order.
pub fn reject_read_only_properties(
    body: &serde_json::Map<String, serde_json::Value>,
    read_only: &[&str],
) -> Result<(), RedfishError> {
    for property in read_only {
        if let Some(value) = body.get(*property) {
            let shown = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(RedfishError::property_value_not_in_list(&shown, property));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use http::{HeaderValue, StatusCode};
    use serde_json::json;

    use super::*;

    fn headers(pairs: &[(http::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn accept_rules() {
        assert!(check_accept(&HeaderMap::new()).is_ok());
        assert!(check_accept(&headers(&[(ACCEPT, "*/*")])).is_ok());
        assert!(check_accept(&headers(&[(ACCEPT, "application/json;q=0.9")])).is_ok());
        assert!(check_accept(&headers(&[(ACCEPT, "text/html, */*;q=0.1")])).is_ok());
        let err = check_accept(&headers(&[(ACCEPT, "text/html")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            err.to_json()["error"]["@Message.ExtendedInfo"][0]["MessageArgs"],
            json!(["text/html"])
        );
    }

    #[test]
    fn content_type_rules() {
        assert!(check_content_type(&HeaderMap::new()).is_ok());
        assert!(check_content_type(&headers(&[(CONTENT_TYPE, "application/json; charset=utf-8")])).is_ok());
        let err = check_content_type(&headers(&[(CONTENT_TYPE, "text/plain")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn content_length_limit() {
        assert!(check_content_length(&headers(&[(CONTENT_LENGTH, "1048576")])).is_ok());
        let err = check_content_length(&headers(&[(CONTENT_LENGTH, "1048577")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn if_match_mismatch_fails() {
        let h = headers(&[(IF_MATCH, "\"other\"")]);
        let err = evaluate_preconditions(&Method::PATCH, &h, "\"abc\"").unwrap_err();
        assert_eq!(err.status(), StatusCode::PRECONDITION_FAILED);

        let h = headers(&[(IF_MATCH, "*")]);
        assert_eq!(
            evaluate_preconditions(&Method::PATCH, &h, "\"abc\"").unwrap(),
            Precondition::Proceed
        );
    }

    #[test]
    fn if_none_match_only_applies_to_reads() {
        let h = headers(&[(IF_NONE_MATCH, "\"abc\"")]);
        assert_eq!(
            evaluate_preconditions(&Method::GET, &h, "\"abc\"").unwrap(),
            Precondition::NotModified
        );
        assert_eq!(
            evaluate_preconditions(&Method::PATCH, &h, "\"abc\"").unwrap(),
            Precondition::Proceed
        );
        assert_eq!(
            evaluate_preconditions(&Method::GET, &h, "\"abd\"").unwrap(),
            Precondition::Proceed
        );
    }

    #[test]
    fn read_only_properties_rejected_in_list_order() {
        let body = json!({"AssetTag": "x", "SerialNumber": "abc", "Id": "new"});
        let err = reject_read_only_properties(
            body.as_object().unwrap(),
            CHASSIS_READ_ONLY_PROPERTIES,
        )
        .unwrap_err();
        assert_eq!(
            err.to_json()["error"]["@Message.ExtendedInfo"][0]["MessageArgs"],
            json!(["new", "Id"])
        );

        let body = json!({"AssetTag": "x"});
        assert!(
            reject_read_only_properties(body.as_object().unwrap(), CHASSIS_READ_ONLY_PROPERTIES)
                .is_ok()
        );
    }
}
