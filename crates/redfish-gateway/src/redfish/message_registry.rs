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

//! Redfish Base message registry and the error envelope built from it.

use std::fmt;

use axum::response::{IntoResponse, Response};
use http::header::{ALLOW, RETRY_AFTER};
use http::{HeaderValue, Method, StatusCode};
use serde_json::json;

use crate::devices::{DeviceError, DeviceErrorKind};
use crate::json::JsonExt;

pub const REGISTRY_PREFIX: &str = "Base.1.11.0";

/// Seconds clients are told to wait after a 503.
pub const RETRY_AFTER_SECS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseMessage {
    Success,
    GeneralError,
    MalformedJson,
    PropertyMissing,
    PropertyValueNotInList,
    ResourceNotFound,
    OperationNotAllowed,
    MethodNotAllowed,
    ActionNotSupported,
    NotAcceptable,
    PreconditionFailed,
    PayloadTooLarge,
    UnsupportedMediaType,
    NotImplemented,
    UpstreamFailure,
    ServiceTemporarilyUnavailable,
}

pub struct MessageDefinition {
    pub message: BaseMessage,
    /// Registry key without the `Base.1.11.0.` prefix.
    pub key: &'static str,
    /// `%1`, `%2`, ... are replaced by message arguments in order.
    pub template: &'static str,
    pub severity: Severity,
    pub resolution: &'static str,
}

/// Indexed by `BaseMessage as usize`.
static REGISTRY: [MessageDefinition; 16] = [
    MessageDefinition {
        message: BaseMessage::Success,
        key: "Success",
        template: "The request completed successfully.",
        severity: Severity::Ok,
        resolution: "None.",
    },
    MessageDefinition {
        message: BaseMessage::GeneralError,
        key: "GeneralError",
        template: "A general error has occurred. See ExtendedInfo for more information.",
        severity: Severity::Critical,
        resolution: "None.",
    },
    MessageDefinition {
        message: BaseMessage::MalformedJson,
        key: "MalformedJSON",
        template: "The request body submitted was malformed JSON and could not be parsed by the receiving service.",
        severity: Severity::Critical,
        resolution: "Ensure that the request body is valid JSON and resubmit the request.",
    },
    MessageDefinition {
        message: BaseMessage::PropertyMissing,
        key: "PropertyMissing",
        template: "The property %1 is a required property and must be included in the request.",
        severity: Severity::Warning,
        resolution: "Ensure that the property is in the request body and has a valid value and resubmit the request if the operation failed.",
    },
    MessageDefinition {
        message: BaseMessage::PropertyValueNotInList,
        key: "PropertyValueNotInList",
        template: "The value '%1' for the property %2 is not in the list of acceptable values.",
        severity: Severity::Warning,
        resolution: "Choose a value from the enumeration list that the implementation can support and resubmit the request if the operation failed.",
    },
    MessageDefinition {
        message: BaseMessage::ResourceNotFound,
        key: "ResourceNotFound",
        template: "The requested resource of type %1 named '%2' was not found.",
        severity: Severity::Critical,
        resolution: "Provide a valid resource identifier and resubmit the request.",
    },
    MessageDefinition {
        message: BaseMessage::OperationNotAllowed,
        key: "OperationNotAllowed",
        template: "The operation was not successful because the resource is in a state that does not allow this operation.",
        severity: Severity::Critical,
        resolution: "The operation was not successful because the resource is in a state that does not allow this operation.",
    },
    MessageDefinition {
        message: BaseMessage::MethodNotAllowed,
        key: "OperationNotAllowed",
        template: "The HTTP method %1 is not allowed on the %2 resource.",
        severity: Severity::Critical,
        resolution: "Use one of the methods listed in the Allow response header and resubmit the request.",
    },
    MessageDefinition {
        message: BaseMessage::ActionNotSupported,
        key: "ActionNotSupported",
        template: "The action %1 is not supported by the resource.",
        severity: Severity::Critical,
        resolution: "The action supplied cannot be resubmitted to the implementation. Perhaps the action was invalid, the wrong resource was the target or the implementation documentation may be of assistance.",
    },
    MessageDefinition {
        message: BaseMessage::NotAcceptable,
        key: "NotAcceptable",
        template: "The requested media type %1 is not acceptable. This service only produces application/json.",
        severity: Severity::Critical,
        resolution: "Resubmit the request with an Accept header that allows application/json.",
    },
    MessageDefinition {
        message: BaseMessage::PreconditionFailed,
        key: "PreconditionFailed",
        template: "The ETag supplied did not match the ETag required to change this resource.",
        severity: Severity::Critical,
        resolution: "Try the operation again using the appropriate ETag.",
    },
    MessageDefinition {
        message: BaseMessage::PayloadTooLarge,
        key: "PayloadTooLarge",
        template: "The request body exceeds the maximum size of %1 bytes.",
        severity: Severity::Critical,
        resolution: "Reduce the size of the request body and resubmit the request.",
    },
    MessageDefinition {
        message: BaseMessage::UnsupportedMediaType,
        key: "UnsupportedMediaType",
        template: "The request specified a media type of %1 which is not supported. Only application/json is accepted.",
        severity: Severity::Critical,
        resolution: "Resubmit the request with a Content-Type of application/json.",
    },
    MessageDefinition {
        message: BaseMessage::NotImplemented,
        key: "NotImplemented",
        template: "The operation %1 is not implemented by this service.",
        severity: Severity::Warning,
        resolution: "None.",
    },
    MessageDefinition {
        message: BaseMessage::UpstreamFailure,
        key: "GeneralError",
        template: "The service was unable to communicate with the managed device.",
        severity: Severity::Critical,
        resolution: "Verify that the managed device is reachable and resubmit the request.",
    },
    MessageDefinition {
        message: BaseMessage::ServiceTemporarilyUnavailable,
        key: "ServiceTemporarilyUnavailable",
        template: "The service is temporarily unavailable. Retry in %1 seconds.",
        severity: Severity::Critical,
        resolution: "Wait for the indicated retry duration and retry the operation.",
    },
];

impl BaseMessage {
    pub fn definition(self) -> &'static MessageDefinition {
        &REGISTRY[self as usize]
    }

    /// Fully qualified id, e.g. `Base.1.11.0.ResourceNotFound`.
    pub fn message_id(self) -> String {
        format!("{REGISTRY_PREFIX}.{}", self.definition().key)
    }

    pub fn render(self, args: &[String]) -> String {
        // Substitute from the highest index down so %1 never eats %10.
        args.iter()
            .enumerate()
            .rev()
            .fold(self.definition().template.to_string(), |text, (i, arg)| {
                text.replace(&format!("%{}", i + 1), arg)
            })
    }

    pub fn severity(self) -> Severity {
        self.definition().severity
    }
}

/// A Redfish error response: status, Base registry message and any
/// headers the status requires (`Allow`, `Retry-After`).
#[derive(Clone, Debug)]
pub struct RedfishError {
    status: StatusCode,
    message: BaseMessage,
    args: Vec<String>,
    allow: Option<String>,
    retry_after: Option<u64>,
}

impl RedfishError {
    pub fn new(status: StatusCode, message: BaseMessage, args: Vec<String>) -> Self {
        Self {
            status,
            message,
            args,
            allow: None,
            retry_after: None,
        }
    }

    pub fn general_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, BaseMessage::GeneralError, vec![])
    }

    pub fn malformed_json() -> Self {
        Self::new(StatusCode::BAD_REQUEST, BaseMessage::MalformedJson, vec![])
    }

    pub fn property_missing(property: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            BaseMessage::PropertyMissing,
            vec![property.to_string()],
        )
    }

    pub fn property_value_not_in_list(value: &str, property: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            BaseMessage::PropertyValueNotInList,
            vec![value.to_string(), property.to_string()],
        )
    }

    pub fn resource_not_found(resource_type: &str, id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            BaseMessage::ResourceNotFound,
            vec![resource_type.to_string(), id.to_string()],
        )
    }

    pub fn operation_not_allowed() -> Self {
        Self::new(StatusCode::CONFLICT, BaseMessage::OperationNotAllowed, vec![])
    }

    pub fn method_not_allowed(method: &Method, resource_type: &str, allow: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            BaseMessage::MethodNotAllowed,
            vec![method.to_string(), resource_type.to_string()],
        )
        .with_allow(allow)
    }

    pub fn action_not_supported(action: &str, allow: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            BaseMessage::ActionNotSupported,
            vec![action.to_string()],
        )
        .with_allow(allow)
    }

    pub fn not_acceptable(requested: &str) -> Self {
        Self::new(
            StatusCode::NOT_ACCEPTABLE,
            BaseMessage::NotAcceptable,
            vec![requested.to_string()],
        )
    }

    pub fn precondition_failed() -> Self {
        Self::new(StatusCode::PRECONDITION_FAILED, BaseMessage::PreconditionFailed, vec![])
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            BaseMessage::PayloadTooLarge,
            vec![limit.to_string()],
        )
    }

    pub fn unsupported_media_type(content_type: &str) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            BaseMessage::UnsupportedMediaType,
            vec![content_type.to_string()],
        )
    }

    pub fn not_implemented(operation: &str) -> Self {
        Self::new(
            StatusCode::NOT_IMPLEMENTED,
            BaseMessage::NotImplemented,
            vec![operation.to_string()],
        )
    }

    pub fn upstream_failure() -> Self {
        Self::new(StatusCode::BAD_GATEWAY, BaseMessage::UpstreamFailure, vec![])
    }

    pub fn service_temporarily_unavailable() -> Self {
        let mut err = Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            BaseMessage::ServiceTemporarilyUnavailable,
            vec![RETRY_AFTER_SECS.to_string()],
        );
        err.retry_after = Some(RETRY_AFTER_SECS);
        err
    }

    pub fn with_allow(mut self, allow: &str) -> Self {
        self.allow = Some(allow.to_string());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> BaseMessage {
        self.message
    }

    pub fn to_json(&self) -> serde_json::Value {
        let id = self.message.message_id();
        let text = self.message.render(&self.args);
        let definition = self.message.definition();
        let mut info = json!({
            "@odata.type": "#Message.v1_1_1.Message",
            "MessageId": id,
            "Message": text,
            "Severity": definition.severity.as_str(),
            "Resolution": definition.resolution,
        });
        if !self.args.is_empty() {
            info = info.patch(json!({ "MessageArgs": self.args }));
        }
        json!({
            "error": {
                "code": id,
                "message": text,
                "@Message.ExtendedInfo": [info],
            }
        })
    }
}

impl RedfishError {
    /// Maps a backend failure while acting on one resource.
    pub fn from_device_error(err: &DeviceError, resource_type: &str, id: &str) -> Self {
        match err.kind {
            DeviceErrorKind::NotFound => Self::resource_not_found(resource_type, id),
            DeviceErrorKind::Transport => Self::upstream_failure(),
            DeviceErrorKind::Unavailable => Self::service_temporarily_unavailable(),
            DeviceErrorKind::Internal => Self::general_error(),
        }
    }

    /// Maps a backend failure while listing a collection.
    pub fn from_listing_error(err: &DeviceError) -> Self {
        match err.kind {
            DeviceErrorKind::Transport => Self::upstream_failure(),
            DeviceErrorKind::Unavailable => Self::service_temporarily_unavailable(),
            DeviceErrorKind::NotFound | DeviceErrorKind::Internal => Self::general_error(),
        }
    }
}

impl fmt::Display for RedfishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.status.as_u16(),
            self.message.render(&self.args)
        )
    }
}

impl std::error::Error for RedfishError {}

impl IntoResponse for RedfishError {
    fn into_response(self) -> Response {
        let mut response = JsonExt::into_response(self.to_json(), self.status);
        let headers = response.headers_mut();
        if let Some(allow) = self.allow.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
            headers.insert(ALLOW, allow);
        }
        if let Some(secs) = self.retry_after {
            headers.insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
