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

mod common;

use std::sync::Arc;

use common::*;
use http::{Method, StatusCode};
use redfish_gateway::devices::{DeviceError, PowerAction};

fn reset_uri() -> String {
    format!("/redfish/v1/Systems/{SYSTEM_ID}/Actions/ComputerSystem.Reset")
}

#[tokio::test]
async fn malformed_body_is_rejected_before_backend() {
    let devices = Arc::new(FakeDevices::default());
    let response = send(
        app(devices.clone()),
        json_request(Method::POST, &reset_uri(), "{ResetType: On"),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_id(), "Base.1.11.0.MalformedJSON");
    assert_eq!(devices.power_queries(), 0);
    assert_eq!(devices.power_actions(), 0);
}

#[tokio::test]
async fn missing_and_invalid_reset_types() {
    let devices = Arc::new(FakeDevices::default());
    for (body, message_id) in [
        ("{}", "Base.1.11.0.PropertyMissing"),
        (r#"{"ResetType": ""}"#, "Base.1.11.0.PropertyMissing"),
        (r#"{"ResetType": "Nmi"}"#, "Base.1.11.0.PropertyValueNotInList"),
    ] {
        let response = send(app(devices.clone()), json_request(Method::POST, &reset_uri(), body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.message_id(), message_id, "{body}");
    }
    assert_eq!(devices.power_queries(), 0);
    assert_eq!(devices.power_actions(), 0);
}

#[tokio::test]
async fn power_on_while_on_conflicts() {
    let devices = Arc::new(FakeDevices::default());
    let response = send(
        app(devices.clone()),
        json_request(Method::POST, &reset_uri(), r#"{"ResetType": "On"}"#),
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message_id(), "Base.1.11.0.OperationNotAllowed");
    assert_eq!(devices.power_queries(), 1);
    assert_eq!(devices.power_actions(), 0);
}

#[tokio::test]
async fn force_off_returns_completed_task() {
    let devices = Arc::new(FakeDevices::default());
    let response = send(
        app(devices.clone()),
        json_request(Method::POST, &reset_uri(), r#"{"ResetType": "ForceOff"}"#),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(devices.power_actions(), 1);
    assert_eq!(
        *devices.last_action.lock().unwrap(),
        Some((SYSTEM_ID.to_string(), PowerAction::PowerDown))
    );

    let task = response.json();
    assert_eq!(task["@odata.type"], "#Task.v1_6_0.Task");
    assert_eq!(task["TaskState"], "Completed");
    assert_eq!(task["TaskStatus"], "OK");
    assert!(
        task["@odata.id"]
            .as_str()
            .unwrap()
            .starts_with("/redfish/v1/TaskService/Tasks/")
    );
    let start = chrono::DateTime::parse_from_rfc3339(task["StartTime"].as_str().unwrap()).unwrap();
    let end = chrono::DateTime::parse_from_rfc3339(task["EndTime"].as_str().unwrap()).unwrap();
    assert!(start <= end);
}

#[tokio::test]
async fn non_zero_return_value_is_exception() {
    let devices = Arc::new(FakeDevices {
        action_result: Ok(1),
        ..FakeDevices::default()
    });
    let response = send(
        app(devices),
        json_request(Method::POST, &reset_uri(), r#"{"ResetType": "PowerCycle"}"#),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let task = response.json();
    assert_eq!(task["TaskState"], "Exception");
    assert_eq!(task["TaskStatus"], "Critical");
}

#[tokio::test]
async fn dispatch_failures_map_to_status() {
    for (error, status) in [
        (DeviceError::from_message("device not found"), StatusCode::NOT_FOUND),
        (DeviceError::from_message("AMT device not found"), StatusCode::NOT_FOUND),
        (DeviceError::from_message("DevicesUseCase - GetByID - failed"), StatusCode::NOT_FOUND),
        (DeviceError::from_message("wsman: connection reset"), StatusCode::BAD_GATEWAY),
        (DeviceError::from_message("rate limit exceeded"), StatusCode::SERVICE_UNAVAILABLE),
        (DeviceError::from_message("unexpected"), StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let devices = Arc::new(FakeDevices {
            action_result: Err(error),
            ..FakeDevices::default()
        });
        let response = send(
            app(devices),
            json_request(Method::POST, &reset_uri(), r#"{"ResetType": "ForceRestart"}"#),
        )
        .await;
        assert_eq!(response.status, status);
    }
}

#[tokio::test]
async fn reset_target_only_accepts_post() {
    let response = send(app(Arc::default()), get(&reset_uri())).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.header("allow"), "POST");
    assert_eq!(response.message_id(), "Base.1.11.0.ActionNotSupported");
    let message = response.json()["error"]["message"].as_str().unwrap().to_string();
    assert!(message.contains("ComputerSystem.Reset"), "{message}");
    assert!(message.contains("not supported by the resource"), "{message}");
}

#[tokio::test]
async fn wrong_content_type_is_unsupported() {
    let devices = Arc::new(FakeDevices::default());
    let request = http::Request::builder()
        .method(Method::POST)
        .uri(reset_uri())
        .header("content-type", "text/plain")
        .body(axum::body::Body::from(r#"{"ResetType": "On"}"#))
        .unwrap();
    let response = send(app(devices.clone()), request).await;
    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(devices.power_actions(), 0);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let devices = Arc::new(FakeDevices::default());
    let request = http::Request::builder()
        .method(Method::POST)
        .uri(reset_uri())
        .header("content-type", "application/json")
        .header("content-length", "2097152")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(app(devices.clone()), request).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.message_id(), "Base.1.11.0.PayloadTooLarge");
    assert_eq!(devices.power_actions(), 0);
}
