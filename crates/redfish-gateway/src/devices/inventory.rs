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

//! File-backed device inventory so the gateway can run without a live
//! device-management service.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{
    AmtVersion, Device, DeviceError, DeviceManagement, PowerAction, PowerActionResult,
    PowerStateReport,
};
use crate::error::GatewayError;

const POWER_ON: i32 = 2;
const POWER_OFF_HARD: i32 = 8;

fn default_power_state() -> i32 {
    POWER_ON
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryDevice {
    pub guid: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default = "default_power_state")]
    pub power_state: i32,
    #[serde(default)]
    pub version: AmtVersion,
    /// Same shape the hardware-info call returns, e.g.
    /// `{"CIM_BIOSElement": {"response": {...}}}`.
    #[serde(default)]
    pub hardware_info: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    devices: Vec<InventoryDevice>,
}

#[derive(Debug, Default)]
pub struct StaticInventory {
    devices: RwLock<Vec<InventoryDevice>>,
}

impl StaticInventory {
    pub fn new(devices: Vec<InventoryDevice>) -> Self {
        Self {
            devices: RwLock::new(devices),
        }
    }

    /// Loads `.json` files as JSON and everything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, GatewayError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| GatewayError::InventoryRead {
                path: path.to_path_buf(),
                source,
            })?;
        let file: InventoryFile = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|source| GatewayError::InventoryJson {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            toml::from_str(&contents).map_err(|source| GatewayError::InventoryToml {
                path: path.to_path_buf(),
                source,
            })?
        };
        tracing::info!(
            path = %path.display(),
            devices = file.devices.len(),
            "Loaded static device inventory"
        );
        Ok(Self::new(file.devices))
    }

    async fn with_device<T>(
        &self,
        guid: &str,
        f: impl FnOnce(&InventoryDevice) -> Result<T, DeviceError>,
    ) -> Result<T, DeviceError> {
        let devices = self.devices.read().await;
        let device = devices
            .iter()
            .find(|d| d.guid == guid)
            .ok_or_else(|| DeviceError::not_found(format!("device {guid} not found")))?;
        f(device)
    }
}

#[async_trait]
impl DeviceManagement for StaticInventory {
    async fn list_devices(&self, limit: usize, offset: usize) -> Result<Vec<Device>, DeviceError> {
        let devices = self.devices.read().await;
        Ok(devices
            .iter()
            .skip(offset)
            .take(limit)
            .map(|d| Device {
                guid: d.guid.clone(),
                hostname: d.hostname.clone(),
            })
            .collect())
    }

    async fn get_power_state(&self, guid: &str) -> Result<PowerStateReport, DeviceError> {
        self.with_device(guid, |d| {
            Ok(PowerStateReport {
                power_state: d.power_state,
            })
        })
        .await
    }

    async fn send_power_action(
        &self,
        guid: &str,
        action: PowerAction,
    ) -> Result<PowerActionResult, DeviceError> {
        let mut devices = self.devices.write().await;
        let device = devices
            .iter_mut()
            .find(|d| d.guid == guid)
            .ok_or_else(|| DeviceError::not_found(format!("device {guid} not found")))?;
        device.power_state = match action {
            PowerAction::PowerDown => POWER_OFF_HARD,
            PowerAction::PowerUp | PowerAction::PowerCycle | PowerAction::Reset => POWER_ON,
        };
        tracing::debug!(guid, action = action.code(), "Applied power action to inventory device");
        Ok(PowerActionResult { return_value: 0 })
    }

    async fn get_hardware_info(&self, guid: &str) -> Result<serde_json::Value, DeviceError> {
        self.with_device(guid, |d| {
            if d.hardware_info.is_null() {
                Err(DeviceError::not_found(format!(
                    "hardware info for device {guid} not found"
                )))
            } else {
                Ok(d.hardware_info.clone())
            }
        })
        .await
    }

    async fn get_version(&self, guid: &str) -> Result<AmtVersion, DeviceError> {
        self.with_device(guid, |d| Ok(d.version.clone())).await
    }
}
