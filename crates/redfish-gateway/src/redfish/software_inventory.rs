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
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use chrono::{SecondsFormat, Utc};
use http::{HeaderMap, Method};
use serde_json::json;

use crate::device_info::{BiosInfo, parse_bios_info};
use crate::devices::AmtVersion;
use crate::etag::weak_etag;
use crate::http::{FIRMWARE_CACHE_CONTROL, ResponseHeadersExt, not_modified, reject_other_methods};
use crate::json::{JsonExt, JsonPatch};
use crate::redfish::message_registry::RedfishError;
use crate::redfish::resource::Status;
use crate::redfish::schema::ResourceKind;
use crate::redfish::service_root::VENDOR;
use crate::redfish::{self, Builder, oem};
use crate::state::GatewayState;
use crate::validation::{Precondition, evaluate_preconditions};

/// Firmware components reported for an AMT device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirmwareComponent {
    Amt,
    Flash,
    Netstack,
    AmtApps,
    Bios,
}

impl FirmwareComponent {
    pub const ALL: [FirmwareComponent; 5] = [
        FirmwareComponent::Amt,
        FirmwareComponent::Flash,
        FirmwareComponent::Netstack,
        FirmwareComponent::AmtApps,
        FirmwareComponent::Bios,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FirmwareComponent::Amt => "AMT",
            FirmwareComponent::Flash => "Flash",
            FirmwareComponent::Netstack => "Netstack",
            FirmwareComponent::AmtApps => "AMTApps",
            FirmwareComponent::Bios => "BIOS",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            FirmwareComponent::Amt => "Intel Active Management Technology",
            FirmwareComponent::Flash => "AMT Flash Firmware",
            FirmwareComponent::Netstack => "AMT Network Stack",
            FirmwareComponent::AmtApps => "AMT Applications",
            FirmwareComponent::Bios => "System BIOS/UEFI",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FirmwareComponent::Amt => "Intel AMT Firmware",
            FirmwareComponent::Flash => "AMT Flash Memory Firmware",
            FirmwareComponent::Netstack => "AMT Network Stack Firmware",
            FirmwareComponent::AmtApps => "AMT Applications Firmware",
            FirmwareComponent::Bios => "System BIOS/UEFI Firmware",
        }
    }

    fn oem_component(self) -> Option<&'static str> {
        match self {
            FirmwareComponent::Amt => None,
            FirmwareComponent::Flash => Some("AMT Flash Memory"),
            FirmwareComponent::Netstack => Some("AMT Network Stack"),
            FirmwareComponent::AmtApps => Some("AMT Applications"),
            FirmwareComponent::Bios => Some("System BIOS/UEFI"),
        }
    }

    /// Version reported in the AMT version record. `None` for BIOS, which
    /// comes from hardware info instead, and for unreported components.
    pub fn amt_version(self, version: &AmtVersion) -> Option<&str> {
        let value = match self {
            FirmwareComponent::Amt => &version.amt,
            FirmwareComponent::Flash => &version.flash,
            FirmwareComponent::Netstack => &version.netstack,
            FirmwareComponent::AmtApps => &version.amt_apps,
            FirmwareComponent::Bios => return None,
        };
        Some(value.as_str()).filter(|v| !v.is_empty())
    }
}

pub fn firmware_inventory_collection(system_id: &str) -> redfish::Collection<'static> {
    let odata_id = format!(
        "{}/FirmwareInventory",
        redfish::computer_system::resource(system_id).odata_id
    );
    redfish::Collection {
        odata_id: Cow::Owned(odata_id),
        odata_type: Cow::Borrowed(ResourceKind::SoftwareInventoryCollection.odata_type()),
        name: Cow::Borrowed("Firmware Inventory Collection"),
    }
}

pub fn firmware_inventory_resource<'a>(system_id: &str, id: &'a str) -> redfish::Resource<'a> {
    let odata_id = format!("{}/{id}", firmware_inventory_collection(system_id).odata_id);
    redfish::Resource {
        odata_id: Cow::Owned(odata_id),
        odata_type: Cow::Borrowed(ResourceKind::SoftwareInventory.odata_type()),
        name: Cow::Borrowed("Firmware Inventory Item"),
        id: Cow::Borrowed(id),
    }
}

pub fn add_routes(r: Router<GatewayState>) -> Router<GatewayState> {
    const SYSTEM_ID: &str = "{system_id}";
    const ITEM_ID: &str = "{item_id}";
    r.route(
        &firmware_inventory_collection(SYSTEM_ID).odata_id,
        reject_other_methods(
            get(get_firmware_inventory_collection),
            ResourceKind::SoftwareInventoryCollection.type_name(),
            &[Method::GET],
        ),
    )
    .route(
        &firmware_inventory_resource(SYSTEM_ID, ITEM_ID).odata_id,
        reject_other_methods(
            get(get_firmware_inventory),
            ResourceKind::SoftwareInventory.type_name(),
            &[Method::GET],
        ),
    )
}

/// Generate resource bound to a system.
pub fn builder(resource: &redfish::Resource) -> SoftwareInventoryBuilder {
    SoftwareInventoryBuilder {
        value: resource.json_patch(),
    }
}

pub struct SoftwareInventoryBuilder {
    value: serde_json::Value,
}

impl Builder for SoftwareInventoryBuilder {
    fn apply_patch(self, patch: serde_json::Value) -> Self {
        Self {
            value: self.value.patch(patch),
        }
    }
}

impl SoftwareInventoryBuilder {
    pub fn description(self, value: &str) -> Self {
        self.add_str_field("Description", value)
    }

    pub fn version(self, value: &str) -> Self {
        self.add_str_field("Version", value)
    }

    pub fn version_string(self, value: &str) -> Self {
        self.add_str_field("VersionString", value)
    }

    pub fn manufacturer(self, value: &str) -> Self {
        self.add_str_field("Manufacturer", value)
    }

    pub fn release_date(self, value: &str) -> Self {
        self.add_str_field("ReleaseDate", value)
    }

    pub fn software_id(self, value: &str) -> Self {
        self.add_str_field("SoftwareId", value)
    }

    pub fn updateable(self, value: bool) -> Self {
        self.apply_patch(json!({ "Updateable": value }))
    }

    pub fn status(self, value: Status) -> Self {
        self.apply_patch(json!({ "Status": value.into_json() }))
    }

    pub fn etag(self, value: &str) -> Self {
        self.add_str_field("@odata.etag", value)
    }

    pub fn oem(self, fields: serde_json::Value) -> Self {
        self.apply_patch(oem::intel(fields))
    }

    pub fn build(self) -> serde_json::Value {
        self.value
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Inventory item for one of the AMT-reported components.
pub fn amt_component(
    system_id: &str,
    component: FirmwareComponent,
    version: &AmtVersion,
) -> Option<serde_json::Value> {
    let reported = component.amt_version(version)?;
    let mut oem = json!({
        "FirmwareType": component.id(),
        "SystemGUID": system_id,
    });
    if let Some(label) = component.oem_component() {
        oem = oem.patch(json!({ "Component": label }));
    }
    if component == FirmwareComponent::Amt {
        oem = oem.patch(json!({
            "BuildNumber": version.build_number,
            "AMTFWCore": version.amt_fw_core_version,
            "LegacyMode": version.legacy_mode,
            "SKU": version.sku,
            "VendorID": version.vendor_id,
        }));
    }
    Some(
        builder(&firmware_inventory_resource(system_id, component.id()).with_name(component.name()))
            .description(component.description())
            .version(reported)
            .version_string(reported)
            .manufacturer(VENDOR)
            .release_date(&today())
            .software_id(&format!("{}-{system_id}", component.id()))
            .updateable(false)
            .status(Status::Ok)
            .etag(&weak_etag(&format!("{}-{system_id}-{reported}", component.id())))
            .oem(oem)
            .build(),
    )
}

pub fn bios_component(system_id: &str, bios: &BiosInfo) -> serde_json::Value {
    let component = FirmwareComponent::Bios;
    builder(&firmware_inventory_resource(system_id, component.id()).with_name(component.name()))
        .description(component.description())
        .version(&bios.version)
        .version_string(&bios.version_string)
        .manufacturer(&bios.manufacturer)
        .release_date(&bios.release_date)
        .software_id(&format!("{}-{system_id}", component.id()))
        .updateable(false)
        .status(Status::Ok)
        .etag(&weak_etag(&format!("{}-{system_id}-{}", component.id(), bios.version)))
        .oem(json!({
            "FirmwareType": component.id(),
            "Component": component.oem_component(),
            "SystemGUID": system_id,
        }))
        .build()
}

async fn amt_version(state: &GatewayState, system_id: &str) -> Result<AmtVersion, RedfishError> {
    state.devices.get_version(system_id).await.map_err(|err| {
        tracing::error!(system_id, error = %err, "Failed to get firmware version");
        RedfishError::resource_not_found(ResourceKind::ComputerSystem.type_name(), system_id)
    })
}

async fn get_firmware_inventory_collection(
    State(state): State<GatewayState>,
    Path(system_id): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, RedfishError> {
    let version = amt_version(&state, &system_id).await?;
    let has_hardware_info = match state.devices.get_hardware_info(&system_id).await {
        Ok(hardware) => !hardware.is_null(),
        Err(err) => {
            tracing::warn!(
                system_id = %system_id,
                error = %err,
                "Hardware info unavailable, omitting BIOS from firmware inventory"
            );
            false
        }
    };

    let members = FirmwareComponent::ALL
        .into_iter()
        .filter(|component| match component {
            FirmwareComponent::Bios => has_hardware_info,
            other => other.amt_version(&version).is_some(),
        })
        .map(|component| firmware_inventory_resource(&system_id, component.id()).entity_ref())
        .collect::<Vec<_>>();

    let etag = weak_etag(&format!("FirmwareInventory-{system_id}-{}", members.len()));
    if evaluate_preconditions(&method, &headers, &etag)? == Precondition::NotModified {
        return Ok(not_modified(&etag).with_cache_control(FIRMWARE_CACHE_CONTROL));
    }

    Ok(firmware_inventory_collection(&system_id)
        .with_members(&members)
        .patch(json!({
            "Id": "FirmwareInventory",
            "Description": "Collection of firmware inventory for this system",
            "@odata.etag": etag,
        }))
        .patch(oem::intel(json!({
            "SystemGUID": system_id,
            "LastUpdated": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "AMTCapabilities": {
                "SupportsSOL": true,
                "SupportsIDER": true,
                "SupportsKVM": true,
                "SupportsPowerAction": true,
            },
        })))
        .into_ok_response()
        .with_etag(&etag)
        .with_cache_control(FIRMWARE_CACHE_CONTROL))
}

async fn get_firmware_inventory(
    State(state): State<GatewayState>,
    Path((system_id, item_id)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, RedfishError> {
    let version = amt_version(&state, &system_id).await?;
    let not_found =
        || RedfishError::resource_not_found(ResourceKind::SoftwareInventory.type_name(), &item_id);
    let component = FirmwareComponent::from_id(&item_id).ok_or_else(not_found)?;

    let item = match component {
        FirmwareComponent::Bios => {
            let hardware = state
                .devices
                .get_hardware_info(&system_id)
                .await
                .map_err(|err| {
                    tracing::error!(
                        system_id = %system_id,
                        error = %err,
                        "Failed to get hardware info for BIOS firmware"
                    );
                    not_found()
                })?;
            bios_component(&system_id, &parse_bios_info(&hardware, Utc::now().date_naive()))
        }
        amt => amt_component(&system_id, amt, &version).ok_or_else(not_found)?,
    };

    let etag = item["@odata.etag"].as_str().unwrap_or_default().to_string();
    if evaluate_preconditions(&method, &headers, &etag)? == Precondition::NotModified {
        return Ok(not_modified(&etag).with_cache_control(FIRMWARE_CACHE_CONTROL));
    }
    Ok(item
        .into_ok_response()
        .with_etag(&etag)
        .with_cache_control(FIRMWARE_CACHE_CONTROL))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn version() -> AmtVersion {
        AmtVersion {
            amt: "15.0.25".to_string(),
            build_number: "3000".to_string(),
            sku: "16392".to_string(),
            ..AmtVersion::default()
        }
    }

    #[test]
    fn component_ids_round_trip() {
        for component in FirmwareComponent::ALL {
            assert_eq!(FirmwareComponent::from_id(component.id()), Some(component));
        }
        assert_eq!(FirmwareComponent::from_id("amt"), None);
    }

    #[test]
    fn unreported_components_have_no_item() {
        assert!(amt_component("sys", FirmwareComponent::Flash, &version()).is_none());
        assert!(FirmwareComponent::Bios.amt_version(&version()).is_none());
    }

    #[test]
    fn amt_item() {
        let item = amt_component("sys", FirmwareComponent::Amt, &version()).unwrap();
        assert_eq!(item["@odata.id"], "/redfish/v1/Systems/sys/FirmwareInventory/AMT");
        assert_eq!(item["@odata.type"], "#SoftwareInventory.v1_3_0.SoftwareInventory");
        assert_eq!(item["Name"], "Intel Active Management Technology");
        assert_eq!(item["Version"], "15.0.25");
        assert_eq!(item["Manufacturer"], "Intel Corporation");
        assert_eq!(item["SoftwareId"], "AMT-sys");
        assert_eq!(item["Updateable"], false);
        assert_eq!(item["Status"]["Health"], "OK");
        let intel = &item["Oem"]["Intel"];
        assert_eq!(intel["BuildNumber"], "3000");
        assert_eq!(intel["SKU"], "16392");
        assert_eq!(intel["SystemGUID"], "sys");
        assert!(item["@odata.etag"].as_str().unwrap().starts_with("W/\""));
    }

    #[test]
    fn bios_item() {
        let bios = BiosInfo {
            version: "BIOS-1.0.0".to_string(),
            version_string: "BIOS-1.0.0 (Released: 2024-02-13)".to_string(),
            manufacturer: "Contoso".to_string(),
            release_date: "2024-02-13".to_string(),
        };
        let item = bios_component("sys", &bios);
        assert_eq!(item["Name"], "System BIOS/UEFI");
        assert_eq!(item["VersionString"], "BIOS-1.0.0 (Released: 2024-02-13)");
        assert_eq!(item["Manufacturer"], "Contoso");
        assert_eq!(item["Oem"]["Intel"]["Component"], "System BIOS/UEFI");

        let defaults = BiosInfo::with_defaults(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(bios_component("sys", &defaults)["ReleaseDate"], "2026-01-02");
    }
}
