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

//! Projections of the dynamic hardware-info payload onto the fields the
//! Chassis and BIOS resources need. Anything missing, empty or of the wrong
//! type falls back to a sentinel.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

pub const UNKNOWN: &str = "Unknown";
pub const SYSTEM_MANUFACTURER: &str = "System Manufacturer";

const BIOS_CLASS: &str = "CIM_BIOSElement";
const CHASSIS_CLASS: &str = "CIM_Chassis";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiosInfo {
    pub version: String,
    pub version_string: String,
    pub manufacturer: String,
    /// `YYYY-MM-DD`
    pub release_date: String,
}

impl BiosInfo {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            version: UNKNOWN.to_string(),
            version_string: UNKNOWN.to_string(),
            manufacturer: SYSTEM_MANUFACTURER.to_string(),
            release_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChassisType {
    RackMount,
    Desktop,
    Unknown,
}

impl ChassisType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChassisType::RackMount => "RackMount",
            ChassisType::Desktop => "Desktop",
            ChassisType::Unknown => "Unknown",
        }
    }

    /// Maps a CIM `PackageType`, given either as text or as a numeric code.
    pub fn from_package_type(value: &Value) -> Self {
        let text = match value {
            Value::String(s) => s.to_lowercase(),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                (None, Some(f)) => format!("{f:.0}"),
                _ => return ChassisType::Unknown,
            },
            _ => return ChassisType::Unknown,
        };
        match text.as_str() {
            "rack" | "rackmount" | "1u" | "2u" | "4u" | "3" | "4" => ChassisType::RackMount,
            "desktop" | "tower" | "minitower" | "2" => ChassisType::Desktop,
            _ => ChassisType::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChassisInfo {
    pub name: String,
    pub description: String,
    pub chassis_type: ChassisType,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub part_number: String,
    pub sku: String,
    pub asset_tag: String,
    pub state: String,
    pub health: String,
    pub power_state: String,
    pub indicator_led: String,
}

impl Default for ChassisInfo {
    fn default() -> Self {
        Self {
            name: "System Chassis".to_string(),
            description: "Computer System Chassis".to_string(),
            chassis_type: ChassisType::Unknown,
            manufacturer: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            serial_number: String::new(),
            part_number: String::new(),
            sku: String::new(),
            asset_tag: String::new(),
            state: "Enabled".to_string(),
            health: "OK".to_string(),
            power_state: "On".to_string(),
            indicator_led: "Off".to_string(),
        }
    }
}

/// `payload[class]["response"]`, taking the first element when the
/// response is a list.
fn cim_response<'a>(payload: &'a Value, class: &str) -> Option<&'a Map<String, Value>> {
    match payload.get(class)?.get("response")? {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first()?.as_object(),
        _ => None,
    }
}

fn non_empty<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn release_date(value: &Value) -> Option<String> {
    let raw = value.get("DateTime")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

pub fn parse_bios_info(payload: &Value, today: NaiveDate) -> BiosInfo {
    let mut info = BiosInfo::with_defaults(today);
    let Some(bios) = cim_response(payload, BIOS_CLASS) else {
        return info;
    };

    if let Some(version) = non_empty(bios, "Version") {
        info.version = version.to_string();
        info.version_string = version.to_string();
    }
    if let Some(manufacturer) = non_empty(bios, "Manufacturer") {
        info.manufacturer = manufacturer.to_string();
    }
    if let Some(raw) = bios.get("ReleaseDate") {
        if let Some(date) = release_date(raw) {
            info.release_date = date;
        }
        if info.version != UNKNOWN {
            info.version_string = format!("{} (Released: {})", info.version, info.release_date);
        }
    }
    info
}

pub fn parse_chassis_info(payload: &Value) -> ChassisInfo {
    let mut info = ChassisInfo::default();
    let Some(chassis) = cim_response(payload, CHASSIS_CLASS) else {
        return info;
    };

    if let Some(manufacturer) = non_empty(chassis, "Manufacturer") {
        info.manufacturer = manufacturer.to_string();
    }
    if let Some(model) = non_empty(chassis, "Model") {
        info.model = model.to_string();
        info.name = format!("{model} Chassis");
    }
    if info.manufacturer != UNKNOWN && info.model != UNKNOWN {
        info.description = format!("{} {} Chassis", info.manufacturer, info.model);
    }
    if let Some(serial) = non_empty(chassis, "SerialNumber") {
        info.serial_number = serial.to_string();
    }
    if let Some(part) = non_empty(chassis, "PartNumber") {
        info.part_number = part.to_string();
    }
    if let Some(sku) = non_empty(chassis, "SKU") {
        info.sku = sku.to_string();
    }
    if let Some(tag) = non_empty(chassis, "Tag") {
        info.asset_tag = tag.to_string();
    }
    if let Some(package_type) = chassis.get("PackageType") {
        info.chassis_type = ChassisType::from_package_type(package_type);
    }
    info
}
