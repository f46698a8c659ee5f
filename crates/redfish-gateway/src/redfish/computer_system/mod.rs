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

use std::borrow::Cow;

use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use http::Method;
use serde_json::json;

use crate::http::{reject_other_action_methods, reject_other_methods};
use crate::json::{JsonExt, JsonPatch};
use crate::redfish::message_registry::RedfishError;
use crate::redfish::schema::ResourceKind;
use crate::redfish::{self, Builder, oem};
use crate::state::GatewayState;
use crate::validation::MAX_REQUEST_BODY;

pub mod reset;

pub use reset::{ResetOutcome, ResetRequest, ResetType};

pub const RESET_ACTION: &str = "ComputerSystem.Reset";

/// Redfish view of a CIM power state code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
    Unknown,
}

impl PowerState {
    pub fn from_code(code: i32) -> Self {
        match code {
            2..=4 => PowerState::On,
            7 | 8 => PowerState::Off,
            _ => PowerState::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerState::On => "On",
            PowerState::Off => "Off",
            PowerState::Unknown => "Unknown",
        }
    }
}

pub fn collection() -> redfish::Collection<'static> {
    redfish::Collection {
        odata_id: Cow::Borrowed("/redfish/v1/Systems"),
        odata_type: Cow::Borrowed(ResourceKind::ComputerSystemCollection.odata_type()),
        name: Cow::Borrowed("Computer System Collection"),
    }
}

pub fn resource<'a>(system_id: &'a str) -> redfish::Resource<'a> {
    let odata_id = format!("{}/{system_id}", collection().odata_id);
    redfish::Resource {
        odata_id: Cow::Owned(odata_id),
        odata_type: Cow::Borrowed(ResourceKind::ComputerSystem.odata_type()),
        id: Cow::Borrowed(system_id),
        name: Cow::Owned(format!("Computer System {system_id}")),
    }
}

pub fn reset_target(system_id: &str) -> String {
    format!("{}/Actions/{RESET_ACTION}", resource(system_id).odata_id)
}

pub fn add_routes(r: Router<GatewayState>) -> Router<GatewayState> {
    const SYSTEM_ID: &str = "{system_id}";
    r.route(
        &collection().odata_id,
        reject_other_methods(
            get(get_system_collection),
            ResourceKind::ComputerSystemCollection.type_name(),
            &[Method::GET],
        ),
    )
    .route(
        &resource(SYSTEM_ID).odata_id,
        reject_other_methods(
            get(get_system),
            ResourceKind::ComputerSystem.type_name(),
            &[Method::GET],
        ),
    )
    .route(
        &reset_target(SYSTEM_ID),
        reject_other_action_methods(post(post_reset_system), RESET_ACTION, &[Method::POST]),
    )
}

pub fn builder(resource: &redfish::Resource) -> ComputerSystemBuilder {
    ComputerSystemBuilder {
        value: resource.json_patch(),
    }
}

pub struct ComputerSystemBuilder {
    value: serde_json::Value,
}

impl Builder for ComputerSystemBuilder {
    fn apply_patch(self, patch: serde_json::Value) -> Self {
        Self {
            value: self.value.patch(patch),
        }
    }
}

impl ComputerSystemBuilder {
    pub fn power_state(self, state: PowerState) -> Self {
        self.add_str_field("PowerState", state.as_str())
    }

    pub fn reset_action(self, system_id: &str) -> Self {
        let allowable: Vec<&str> = ResetType::ALL.iter().map(|t| t.as_str()).collect();
        let action = format!("#{RESET_ACTION}");
        self.apply_patch(json!({
            "Actions": {
                action: {
                    "target": reset_target(system_id),
                    "ResetType@Redfish.AllowableValues": allowable,
                }
            }
        }))
    }

    pub fn firmware_inventory(self, v: &redfish::Collection<'_>) -> Self {
        self.apply_patch(json!({
            "Oem": { "Intel": v.nav_property("FirmwareInventory") }
        }))
    }

    pub fn chassis(self, v: &redfish::Resource<'_>) -> Self {
        self.apply_patch(json!({ "Links": { "Chassis": [v.entity_ref()] } }))
    }

    pub fn oem_system_guid(self, system_id: &str) -> Self {
        self.apply_patch(oem::intel_for_system(system_id))
    }

    pub fn build(self) -> serde_json::Value {
        self.value
    }
}

async fn get_system_collection(State(state): State<GatewayState>) -> Result<Response, RedfishError> {
    let devices = state
        .devices
        .list_devices(state.settings.max_devices, 0)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to list devices for Systems collection");
            RedfishError::from_listing_error(&err)
        })?;
    let members = devices
        .iter()
        .filter(|device| !device.guid.is_empty())
        .map(|device| resource(&device.guid).entity_ref())
        .collect::<Vec<_>>();
    Ok(collection().with_members(&members).into_ok_response())
}

async fn get_system(
    State(state): State<GatewayState>,
    Path(system_id): Path<String>,
) -> Response {
    let power_state = match state.devices.get_power_state(&system_id).await {
        Ok(report) => PowerState::from_code(report.power_state),
        Err(err) => {
            tracing::warn!(system_id = %system_id, error = %err, "Power state lookup failed");
            PowerState::Unknown
        }
    };
    builder(&resource(&system_id))
        .power_state(power_state)
        .reset_action(&system_id)
        .chassis(&redfish::chassis::resource(&system_id))
        .oem_system_guid(&system_id)
        .firmware_inventory(&redfish::software_inventory::firmware_inventory_collection(
            &system_id,
        ))
        .build()
        .into_ok_response()
}

async fn post_reset_system(
    State(state): State<GatewayState>,
    Path(system_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, RedfishError> {
    let body = body.map_err(|_| RedfishError::payload_too_large(MAX_REQUEST_BODY))?;
    let request = ResetRequest::parse(&body)?;
    let outcome = reset::execute(&state.devices, &system_id, request).await?;
    Ok(outcome.into_task().into_ok_response())
}
