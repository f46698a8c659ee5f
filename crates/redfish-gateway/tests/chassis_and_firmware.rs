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
use redfish_gateway::devices::DeviceError;

fn chassis_uri() -> String {
    format!("/redfish/v1/Chassis/{SYSTEM_ID}")
}

fn firmware_uri() -> String {
    format!("/redfish/v1/Systems/{SYSTEM_ID}/FirmwareInventory")
}

#[tokio::test]
async fn chassis_collection_supports_if_none_match() {
    let devices = Arc::new(FakeDevices::default());
    let response = send(app(devices.clone()), get("/redfish/v1/Chassis")).await;
    assert_eq!(response.status, StatusCode::OK);
    let etag = response.header("etag").to_string();
    assert!(etag.starts_with('"') && etag.ends_with('"'), "{etag}");

    let body = response.json();
    assert_eq!(body["Members@odata.count"], 1);
    assert_eq!(
        body["Members"][0]["@odata.id"],
        format!("/redfish/v1/Chassis/{SYSTEM_ID}")
    );
    assert_eq!(body["@odata.etag"], etag.as_str());

    let cached = send(
        app(devices),
        request_with_headers(Method::GET, "/redfish/v1/Chassis", &[("if-none-match", etag.as_str())]),
    )
    .await;
    assert_eq!(cached.status, StatusCode::NOT_MODIFIED);
    assert!(cached.body.is_empty());
    assert_eq!(cached.header("etag"), etag);
}

#[tokio::test]
async fn empty_chassis_collection() {
    let devices = Arc::new(FakeDevices {
        devices: Ok(Vec::new()),
        ..FakeDevices::default()
    });
    let response = send(app(devices), get("/redfish/v1/Chassis")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("etag"), "\"empty-collection\"");
    assert_eq!(response.json()["Members@odata.count"], 0);
}

#[tokio::test]
async fn chassis_instance() {
    let devices = Arc::new(FakeDevices::default());
    let response = send(app(devices.clone()), get(&chassis_uri())).await;
    assert_eq!(response.status, StatusCode::OK);
    let etag = response.header("etag").to_string();

    let body = response.json();
    assert_eq!(body["@odata.type"], "#Chassis.v1_21_0.Chassis");
    assert_eq!(body["Id"], SYSTEM_ID);
    assert_eq!(body["Name"], "NUC 12 Chassis");
    assert_eq!(body["Manufacturer"], "Intel Corporation");
    assert_eq!(body["SerialNumber"], "SN-0001");
    assert_eq!(body["Links"]["ComputerSystems@odata.count"], 1);
    assert_eq!(
        body["Links"]["ComputerSystems"][0]["@odata.id"],
        format!("/redfish/v1/Systems/{SYSTEM_ID}")
    );
    assert_eq!(body["Oem"]["Intel"]["SystemGUID"], SYSTEM_ID);

    let cached = send(
        app(devices.clone()),
        request_with_headers(Method::GET, &chassis_uri(), &[("if-none-match", etag.as_str())]),
    )
    .await;
    assert_eq!(cached.status, StatusCode::NOT_MODIFIED);

    let stale = send(
        app(devices),
        request_with_headers(Method::GET, &chassis_uri(), &[("if-match", "\"stale\"")]),
    )
    .await;
    assert_eq!(stale.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(stale.message_id(), "Base.1.11.0.PreconditionFailed");
}

#[tokio::test]
async fn chassis_lookup_failures() {
    for (error, status) in [
        (DeviceError::transport("dial tcp: i/o timeout"), StatusCode::BAD_GATEWAY),
        (DeviceError::unavailable("rate limit"), StatusCode::SERVICE_UNAVAILABLE),
        (DeviceError::internal("boom"), StatusCode::NOT_FOUND),
        (DeviceError::not_found("no device"), StatusCode::NOT_FOUND),
    ] {
        let devices = Arc::new(FakeDevices {
            hardware_info: Err(error),
            ..FakeDevices::default()
        });
        let response = send(app(devices), get(&chassis_uri())).await;
        assert_eq!(response.status, status);
    }
}

#[tokio::test]
async fn chassis_patch() {
    let devices = Arc::new(FakeDevices::default());

    let read_only = send(
        app(devices.clone()),
        json_request(Method::PATCH, &chassis_uri(), r#"{"Id": "other"}"#),
    )
    .await;
    assert_eq!(read_only.status, StatusCode::BAD_REQUEST);
    assert_eq!(read_only.message_id(), "Base.1.11.0.PropertyValueNotInList");

    let malformed = send(
        app(devices.clone()),
        json_request(Method::PATCH, &chassis_uri(), "[1, 2]"),
    )
    .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.message_id(), "Base.1.11.0.MalformedJSON");

    let writable = send(
        app(devices),
        json_request(Method::PATCH, &chassis_uri(), r#"{"AssetTag": "rack-7"}"#),
    )
    .await;
    assert_eq!(writable.status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn chassis_rejects_post() {
    let response = send(
        app(Arc::default()),
        json_request(Method::POST, &chassis_uri(), "{}"),
    )
    .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.header("allow"), "GET, PATCH");
}

#[tokio::test]
async fn firmware_inventory_collection() {
    let response = send(app(Arc::default()), get(&firmware_uri())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("cache-control"), "max-age=300");
    assert!(response.header("etag").starts_with("W/\""));

    let body = response.json();
    assert_eq!(body["Members@odata.count"], 2);
    let members = body["Members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["@odata.id"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        members,
        vec![format!("{}/AMT", firmware_uri()), format!("{}/BIOS", firmware_uri())]
    );
    assert_eq!(body["Oem"]["Intel"]["SystemGUID"], SYSTEM_ID);
    assert_eq!(body["Oem"]["Intel"]["AMTCapabilities"]["SupportsPowerAction"], true);
}

#[tokio::test]
async fn firmware_inventory_without_hardware_info() {
    let devices = Arc::new(FakeDevices {
        hardware_info: Err(DeviceError::transport("connection refused")),
        ..FakeDevices::default()
    });
    let response = send(app(devices), get(&firmware_uri())).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["Members@odata.count"], 1);
    assert_eq!(body["Members"][0]["@odata.id"], format!("{}/AMT", firmware_uri()));
}

#[tokio::test]
async fn firmware_inventory_with_empty_hardware_info() {
    let devices = Arc::new(FakeDevices {
        hardware_info: Ok(serde_json::Value::Null),
        ..FakeDevices::default()
    });
    let body = send(app(devices), get(&firmware_uri())).await.json();
    assert_eq!(body["Members@odata.count"], 1);
    assert_eq!(body["Members"][0]["@odata.id"], format!("{}/AMT", firmware_uri()));
}

#[tokio::test]
async fn firmware_inventory_unknown_system() {
    let devices = Arc::new(FakeDevices {
        version: Err(DeviceError::not_found("device not found")),
        ..FakeDevices::default()
    });
    let response = send(app(devices), get(&firmware_uri())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_id(), "Base.1.11.0.ResourceNotFound");
    let message = response.json()["error"]["message"].as_str().unwrap().to_string();
    assert!(message.contains("ComputerSystem"), "{message}");
}

#[tokio::test]
async fn firmware_items() {
    let devices = Arc::new(FakeDevices::default());

    let amt = send(app(devices.clone()), get(&format!("{}/AMT", firmware_uri()))).await;
    assert_eq!(amt.status, StatusCode::OK);
    let body = amt.json();
    assert_eq!(body["Version"], "15.0.25");
    assert_eq!(body["Updateable"], false);
    assert_eq!(body["Oem"]["Intel"]["BuildNumber"], "3000");
    assert_eq!(body["@odata.etag"], amt.header("etag"));

    let bios = send(app(devices.clone()), get(&format!("{}/BIOS", firmware_uri()))).await;
    assert_eq!(bios.status, StatusCode::OK);
    let body = bios.json();
    assert_eq!(body["Version"], "BIOS-1.0.0");
    assert_eq!(body["Manufacturer"], "Intel Corp.");
    assert!(
        body["VersionString"]
            .as_str()
            .unwrap()
            .starts_with("BIOS-1.0.0 (Released: ")
    );

    let etag = bios.header("etag").to_string();
    let cached = send(
        app(devices.clone()),
        request_with_headers(
            Method::GET,
            &format!("{}/BIOS", firmware_uri()),
            &[("if-none-match", etag.as_str())],
        ),
    )
    .await;
    assert_eq!(cached.status, StatusCode::NOT_MODIFIED);

    for item in ["Flash", "Unknown"] {
        let missing = send(app(devices.clone()), get(&format!("{}/{item}", firmware_uri()))).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND, "{item}");
        assert_eq!(missing.message_id(), "Base.1.11.0.ResourceNotFound");
    }
}

#[tokio::test]
async fn bios_item_requires_hardware_info() {
    let devices = Arc::new(FakeDevices {
        hardware_info: Err(DeviceError::transport("wsman: timeout")),
        ..FakeDevices::default()
    });
    let response = send(app(devices), get(&format!("{}/BIOS", firmware_uri()))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
