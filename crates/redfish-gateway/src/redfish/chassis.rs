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
use axum::routing::get;
use http::{HeaderMap, Method};
use serde_json::json;

use crate::device_info::{ChassisInfo, parse_chassis_info};
use crate::devices::{DeviceError, DeviceErrorKind};
use crate::etag;
use crate::http::{ResponseHeadersExt, not_modified, quoted_etag, reject_other_methods};
use crate::json::{JsonExt, JsonPatch};
use crate::redfish::message_registry::RedfishError;
use crate::redfish::schema::ResourceKind;
use crate::redfish::{self, Builder, oem};
use crate::state::GatewayState;
use crate::validation::{
    CHASSIS_READ_ONLY_PROPERTIES, MAX_REQUEST_BODY, Precondition, evaluate_preconditions,
    reject_read_only_properties,
};

pub fn collection() -> redfish::Collection<'static> {
    redfish::Collection {
        odata_id: Cow::Borrowed("/redfish/v1/Chassis"),
        odata_type: Cow::Borrowed(ResourceKind::ChassisCollection.odata_type()),
        name: Cow::Borrowed("Chassis Collection"),
    }
}

pub fn resource<'a>(chassis_id: &'a str) -> redfish::Resource<'a> {
    let odata_id = format!("{}/{chassis_id}", collection().odata_id);
    redfish::Resource {
        odata_id: Cow::Owned(odata_id),
        odata_type: Cow::Borrowed(ResourceKind::Chassis.odata_type()),
        id: Cow::Borrowed(chassis_id),
        name: Cow::Borrowed("System Chassis"),
    }
}

pub fn add_routes(r: Router<GatewayState>) -> Router<GatewayState> {
    const CHASSIS_ID: &str = "{chassis_id}";
    r.route(
        &collection().odata_id,
        reject_other_methods(
            get(get_chassis_collection),
            ResourceKind::ChassisCollection.type_name(),
            &[Method::GET],
        ),
    )
    .route(
        &resource(CHASSIS_ID).odata_id,
        reject_other_methods(
            get(get_chassis).patch(patch_chassis),
            ResourceKind::Chassis.type_name(),
            &[Method::GET, Method::PATCH],
        ),
    )
}

pub fn builder(resource: &redfish::Resource) -> ChassisBuilder {
    ChassisBuilder {
        value: resource.json_patch(),
    }
}

pub struct ChassisBuilder {
    value: serde_json::Value,
}

impl Builder for ChassisBuilder {
    fn apply_patch(self, patch: serde_json::Value) -> Self {
        Self {
            value: self.value.patch(patch),
        }
    }
}

impl ChassisBuilder {
    pub fn info(self, info: &ChassisInfo) -> Self {
        self.apply_patch(json!({
            "Description": info.description,
            "ChassisType": info.chassis_type.as_str(),
            "Manufacturer": info.manufacturer,
            "Model": info.model,
            "SerialNumber": info.serial_number,
            "PartNumber": info.part_number,
            "SKU": info.sku,
            "AssetTag": info.asset_tag,
            "PowerState": info.power_state,
            "IndicatorLED": info.indicator_led,
            "Status": {
                "State": info.state,
                "Health": info.health,
            },
        }))
    }

    pub fn computer_system(self, v: &redfish::Resource<'_>) -> Self {
        self.apply_patch(json!({
            "Links": {
                "ComputerSystems": [v.entity_ref()],
                "ComputerSystems@odata.count": 1,
            }
        }))
    }

    pub fn etag(self, etag: &str) -> Self {
        self.add_str_field("@odata.etag", etag)
    }

    pub fn oem_system_guid(self, system_id: &str) -> Self {
        self.apply_patch(oem::intel_for_system(system_id))
    }

    pub fn build(self) -> serde_json::Value {
        self.value
    }
}

/// Chassis share their id with the ComputerSystem of the same device.
fn lookup_error(err: &DeviceError, chassis_id: &str) -> RedfishError {
    match err.kind {
        DeviceErrorKind::Transport | DeviceErrorKind::Unavailable => {
            RedfishError::from_device_error(err, ResourceKind::Chassis.type_name(), chassis_id)
        }
        DeviceErrorKind::NotFound | DeviceErrorKind::Internal => {
            RedfishError::resource_not_found(ResourceKind::Chassis.type_name(), chassis_id)
        }
    }
}

async fn chassis_info(state: &GatewayState, chassis_id: &str) -> Result<ChassisInfo, RedfishError> {
    let hardware = state
        .devices
        .get_hardware_info(chassis_id)
        .await
        .map_err(|err| {
            tracing::warn!(chassis_id, error = %err, "Hardware info lookup failed");
            lookup_error(&err, chassis_id)
        })?;
    Ok(parse_chassis_info(&hardware))
}

async fn get_chassis_collection(
    State(state): State<GatewayState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, RedfishError> {
    let devices = state
        .devices
        .list_devices(state.settings.max_devices, 0)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to list devices for Chassis collection");
            RedfishError::from_listing_error(&err)
        })?;
    let member_ids = devices
        .into_iter()
        .map(|device| device.guid)
        .filter(|guid| !guid.is_empty())
        .collect::<Vec<_>>();

    let bucket = state.settings.etag_bucket();
    let etag = quoted_etag(&etag::chassis_collection_etag(&member_ids, bucket.as_deref()));
    if evaluate_preconditions(&method, &headers, &etag)? == Precondition::NotModified {
        return Ok(not_modified(&etag));
    }

    let members = member_ids
        .iter()
        .map(|id| resource(id).entity_ref())
        .collect::<Vec<_>>();
    Ok(collection()
        .with_members(&members)
        .patch(json!({
            "Id": "ChassisCollection",
            "Description": "Collection of Chassis instances",
            "@odata.etag": etag,
        }))
        .into_ok_response()
        .with_etag(&etag))
}

async fn get_chassis(
    State(state): State<GatewayState>,
    Path(chassis_id): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, RedfishError> {
    let info = chassis_info(&state, &chassis_id).await?;
    let bucket = state.settings.etag_bucket();
    let etag = quoted_etag(&etag::chassis_etag(&info, bucket.as_deref()));
    if evaluate_preconditions(&method, &headers, &etag)? == Precondition::NotModified {
        return Ok(not_modified(&etag));
    }

    Ok(builder(&resource(&chassis_id).with_name(info.name.clone()))
        .info(&info)
        .computer_system(&redfish::computer_system::resource(&chassis_id))
        .oem_system_guid(&chassis_id)
        .etag(&etag)
        .build()
        .into_ok_response()
        .with_etag(&etag))
}

async fn patch_chassis(
    State(state): State<GatewayState>,
    Path(chassis_id): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, RedfishError> {
    let body = body.map_err(|_| RedfishError::payload_too_large(MAX_REQUEST_BODY))?;
    let info = chassis_info(&state, &chassis_id).await?;

    let Ok(serde_json::Value::Object(update)) = serde_json::from_slice(&body) else {
        return Err(RedfishError::malformed_json());
    };
    let bucket = state.settings.etag_bucket();
    let etag = quoted_etag(&etag::chassis_etag(&info, bucket.as_deref()));
    evaluate_preconditions(&method, &headers, &etag)?;
    reject_read_only_properties(&update, CHASSIS_READ_ONLY_PROPERTIES)?;

    tracing::debug!(
        chassis_id = %chassis_id,
        properties = ?update.keys().collect::<Vec<_>>(),
        "Chassis update requested"
    );
    Err(RedfishError::not_implemented("Chassis PATCH"))
}
