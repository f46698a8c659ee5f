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

//! Contract between the Redfish layer and the device-management backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod inventory;

/// Coarse failure classes the HTTP layer maps onto status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceErrorKind {
    /// The device or one of its records does not exist.
    NotFound,
    /// The device could not be reached (WS-MAN, TLS, network).
    Transport,
    /// The backend itself is overloaded or in maintenance.
    Unavailable,
    Internal,
}

const UNAVAILABLE_PATTERNS: &[&str] = &[
    "too many connections",
    "connection pool exhausted",
    "database pool full",
    "service overloaded",
    "maintenance mode",
    "rate limit exceeded",
    "rate limit",
    "too many requests",
    "resource exhausted",
    "service unavailable",
    "temporarily unavailable",
    "max connections reached",
    "server overloaded",
    "capacity exceeded",
    "throttled",
    "circuit breaker",
    "overloaded",
];

const TRANSPORT_PATTERNS: &[&str] = &[
    "connection refused",
    "connection timeout",
    "timeout",
    "network unreachable",
    "no route to host",
    "connection reset",
    "wsman",
    "amt",
    "unauthorized",
    "certificate",
    "ssl",
    "tls",
    "dial tcp",
    "i/o timeout",
    "connection aborted",
    "host unreachable",
    "unreachable",
];

const NOT_FOUND_PATTERNS: &[&str] = &["not found", "does not exist", "devicesusecase"];

impl DeviceErrorKind {
    /// Best-effort classification for adapters that only have error text.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        let matches = |patterns: &[&str]| patterns.iter().any(|p| text.contains(p));
        if matches(NOT_FOUND_PATTERNS) {
            DeviceErrorKind::NotFound
        } else if matches(UNAVAILABLE_PATTERNS) {
            DeviceErrorKind::Unavailable
        } else if matches(TRANSPORT_PATTERNS) {
            DeviceErrorKind::Transport
        } else {
            DeviceErrorKind::Internal
        }
    }
}

impl fmt::Display for DeviceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceErrorKind::NotFound => "not found",
            DeviceErrorKind::Transport => "transport error",
            DeviceErrorKind::Unavailable => "backend unavailable",
            DeviceErrorKind::Internal => "internal error",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DeviceError {
    pub kind: DeviceErrorKind,
    pub message: String,
}

impl DeviceError {
    pub fn new(kind: DeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(DeviceErrorKind::NotFound, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(DeviceErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(DeviceErrorKind::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(DeviceErrorKind::Internal, message)
    }

    /// Wraps a plain error message, deriving the kind from its text.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(DeviceErrorKind::classify(&message), message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub guid: String,
    #[serde(default)]
    pub hostname: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStateReport {
    /// CIM power state code as reported by AMT.
    pub power_state: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerActionResult {
    /// Zero on success.
    pub return_value: i32,
}

/// AMT power actions and their CIM request codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerAction {
    PowerUp,
    PowerCycle,
    PowerDown,
    Reset,
}

impl PowerAction {
    pub fn code(self) -> i32 {
        match self {
            PowerAction::PowerUp => 2,
            PowerAction::PowerCycle => 5,
            PowerAction::PowerDown => 8,
            PowerAction::Reset => 10,
        }
    }
}

/// Firmware version record of an AMT device. Empty strings mean the
/// component was not reported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmtVersion {
    #[serde(rename = "AMT")]
    pub amt: String,
    #[serde(rename = "Flash")]
    pub flash: String,
    #[serde(rename = "Netstack")]
    pub netstack: String,
    #[serde(rename = "AMTApps")]
    pub amt_apps: String,
    #[serde(rename = "BuildNumber")]
    pub build_number: String,
    #[serde(rename = "AMTFWCoreVersion")]
    pub amt_fw_core_version: String,
    #[serde(rename = "LegacyMode")]
    pub legacy_mode: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "VendorID")]
    pub vendor_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceManagement: Send + Sync + 'static {
    async fn list_devices(&self, limit: usize, offset: usize) -> Result<Vec<Device>, DeviceError>;

    async fn get_power_state(&self, guid: &str) -> Result<PowerStateReport, DeviceError>;

    async fn send_power_action(
        &self,
        guid: &str,
        action: PowerAction,
    ) -> Result<PowerActionResult, DeviceError>;

    /// Raw hardware inventory: a map of CIM class name to `{"response": ...}`.
    async fn get_hardware_info(&self, guid: &str) -> Result<serde_json::Value, DeviceError>;

    async fn get_version(&self, guid: &str) -> Result<AmtVersion, DeviceError>;
}

/// Shared handle to the backend that bounds every call by a timeout.
#[derive(Clone)]
pub struct Devices {
    inner: Arc<dyn DeviceManagement>,
    timeout: Duration,
}

impl Devices {
    pub fn new(inner: Arc<dyn DeviceManagement>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, DeviceError>>,
    ) -> Result<T, DeviceError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DeviceError::transport(format!(
                "{operation} timed out after {:?}",
                self.timeout
            ))),
        }
    }

    pub async fn list_devices(&self, limit: usize, offset: usize) -> Result<Vec<Device>, DeviceError> {
        self.bounded("list_devices", self.inner.list_devices(limit, offset))
            .await
    }

    pub async fn get_power_state(&self, guid: &str) -> Result<PowerStateReport, DeviceError> {
        self.bounded("get_power_state", self.inner.get_power_state(guid))
            .await
    }

    pub async fn send_power_action(
        &self,
        guid: &str,
        action: PowerAction,
    ) -> Result<PowerActionResult, DeviceError> {
        self.bounded("send_power_action", self.inner.send_power_action(guid, action))
            .await
    }

    pub async fn get_hardware_info(&self, guid: &str) -> Result<serde_json::Value, DeviceError> {
        self.bounded("get_hardware_info", self.inner.get_hardware_info(guid))
            .await
    }

    pub async fn get_version(&self, guid: &str) -> Result<AmtVersion, DeviceError> {
        self.bounded("get_version", self.inner.get_version(guid))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_checks_overload_before_transport() {
        // "service unavailable: connection timeout" mentions both lists.
        assert_eq!(
            DeviceErrorKind::classify("Service Unavailable: connection timeout"),
            DeviceErrorKind::Unavailable
        );
        assert_eq!(
            DeviceErrorKind::classify("dial tcp 10.0.0.1:16993: connection refused"),
            DeviceErrorKind::Transport
        );
        assert_eq!(
            DeviceErrorKind::classify("device does not exist"),
            DeviceErrorKind::NotFound
        );
        assert_eq!(
            DeviceErrorKind::classify("unexpected nil pointer"),
            DeviceErrorKind::Internal
        );
    }

    #[test]
    fn classify_prefers_not_found() {
        assert_eq!(
            DeviceErrorKind::classify("AMT device not found"),
            DeviceErrorKind::NotFound
        );
        assert_eq!(
            DeviceErrorKind::classify("device lookup timeout: does not exist"),
            DeviceErrorKind::NotFound
        );
        assert_eq!(
            DeviceErrorKind::classify("DevicesUseCase - GetByID - failed"),
            DeviceErrorKind::NotFound
        );
    }

    #[test]
    fn power_action_codes() {
        assert_eq!(PowerAction::PowerUp.code(), 2);
        assert_eq!(PowerAction::PowerCycle.code(), 5);
        assert_eq!(PowerAction::PowerDown.code(), 8);
        assert_eq!(PowerAction::Reset.code(), 10);
    }

    struct Stalled;

    #[async_trait]
    impl DeviceManagement for Stalled {
        async fn list_devices(&self, _: usize, _: usize) -> Result<Vec<Device>, DeviceError> {
            Ok(vec![])
        }

        async fn get_power_state(&self, _: &str) -> Result<PowerStateReport, DeviceError> {
            Ok(PowerStateReport { power_state: 2 })
        }

        async fn send_power_action(
            &self,
            _: &str,
            _: PowerAction,
        ) -> Result<PowerActionResult, DeviceError> {
            Ok(PowerActionResult { return_value: 0 })
        }

        async fn get_hardware_info(&self, _: &str) -> Result<serde_json::Value, DeviceError> {
            Ok(serde_json::Value::Null)
        }

        async fn get_version(&self, _: &str) -> Result<AmtVersion, DeviceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(AmtVersion::default())
        }
    }

    #[tokio::test]
    async fn slow_backend_surfaces_as_transport_error() {
        let devices = Devices::new(Arc::new(Stalled), Duration::from_millis(10));
        let err = devices.get_version("guid").await.unwrap_err();
        assert_eq!(err.kind, DeviceErrorKind::Transport);
        assert!(devices.get_power_state("guid").await.is_ok());
    }
}
