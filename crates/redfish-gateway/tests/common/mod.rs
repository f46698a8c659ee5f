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

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use redfish_gateway::devices::{
    AmtVersion, Device, DeviceError, DeviceManagement, PowerAction, PowerActionResult,
    PowerStateReport,
};
use redfish_gateway::{Config, GatewayState, redfish_router};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SYSTEM_ID: &str = "4c4c4544-0042-3610-8050-b4c04f4e4b32";

/// Backend double with canned answers and call counters.
pub struct FakeDevices {
    pub devices: Result<Vec<Device>, DeviceError>,
    pub power_state: Result<i32, DeviceError>,
    pub action_result: Result<i32, DeviceError>,
    pub hardware_info: Result<Value, DeviceError>,
    pub version: Result<AmtVersion, DeviceError>,

    pub power_state_calls: AtomicUsize,
    pub power_action_calls: AtomicUsize,
    pub last_action: Mutex<Option<(String, PowerAction)>>,
}

impl Default for FakeDevices {
    fn default() -> Self {
        Self {
            devices: Ok(vec![Device {
                guid: SYSTEM_ID.to_string(),
                hostname: "amt-01".to_string(),
            }]),
            power_state: Ok(2),
            action_result: Ok(0),
            hardware_info: Ok(hardware_info()),
            version: Ok(AmtVersion {
                amt: "15.0.25".to_string(),
                build_number: "3000".to_string(),
                ..AmtVersion::default()
            }),
            power_state_calls: AtomicUsize::new(0),
            power_action_calls: AtomicUsize::new(0),
            last_action: Mutex::new(None),
        }
    }
}

impl FakeDevices {
    pub fn power_actions(&self) -> usize {
        self.power_action_calls.load(Ordering::SeqCst)
    }

    pub fn power_queries(&self) -> usize {
        self.power_state_calls.load(Ordering::SeqCst)
    }
}

pub fn hardware_info() -> Value {
    json!({
        "CIM_BIOSElement": {
            "response": {
                "Version": "BIOS-1.0.0",
                "Manufacturer": "Intel Corp.",
                "ReleaseDate": {"DateTime": "2024-02-13T00:00:00Z"}
            }
        },
        "CIM_Chassis": {
            "response": {
                "Manufacturer": "Intel Corporation",
                "Model": "NUC 12",
                "SerialNumber": "SN-0001",
                "PackageType": "desktop"
            }
        }
    })
}

#[async_trait]
impl DeviceManagement for FakeDevices {
    async fn list_devices(&self, limit: usize, offset: usize) -> Result<Vec<Device>, DeviceError> {
        self.devices
            .clone()
            .map(|devices| devices.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_power_state(&self, _guid: &str) -> Result<PowerStateReport, DeviceError> {
        self.power_state_calls.fetch_add(1, Ordering::SeqCst);
        self.power_state
            .clone()
            .map(|power_state| PowerStateReport { power_state })
    }

    async fn send_power_action(
        &self,
        guid: &str,
        action: PowerAction,
    ) -> Result<PowerActionResult, DeviceError> {
        self.power_action_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_action.lock().unwrap() = Some((guid.to_string(), action));
        self.action_result
            .clone()
            .map(|return_value| PowerActionResult { return_value })
    }

    async fn get_hardware_info(&self, _guid: &str) -> Result<Value, DeviceError> {
        self.hardware_info.clone()
    }

    async fn get_version(&self, _guid: &str) -> Result<AmtVersion, DeviceError> {
        self.version.clone()
    }
}

pub fn test_config() -> Config {
    Config {
        etag_hour_bucket: false,
        ..Config::default()
    }
}

pub fn app(devices: Arc<FakeDevices>) -> Router {
    redfish_router(GatewayState::new(devices, &test_config()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .unwrap()
    }

    /// `MessageId` of the first extended info entry of an error body.
    pub fn message_id(&self) -> String {
        self.json()["error"]["@Message.ExtendedInfo"][0]["MessageId"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn request_with_headers(method: Method, uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}
