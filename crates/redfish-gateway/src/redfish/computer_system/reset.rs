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

//! `ComputerSystem.Reset`: validate the request, refuse no-op transitions,
//! dispatch the power action and describe the result as a Task.

use chrono::Utc;
use serde_json::Value;

use super::PowerState;
use crate::devices::{Devices, PowerAction};
use crate::redfish::message_registry::RedfishError;
use crate::redfish::schema::ResourceKind;
use crate::redfish::task::{self, TaskState};

pub const RESET_TYPE_PROPERTY: &str = "ResetType";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetType {
    On,
    ForceOff,
    ForceRestart,
    PowerCycle,
}

impl ResetType {
    pub const ALL: [ResetType; 4] = [
        ResetType::On,
        ResetType::ForceOff,
        ResetType::ForceRestart,
        ResetType::PowerCycle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResetType::On => "On",
            ResetType::ForceOff => "ForceOff",
            ResetType::ForceRestart => "ForceRestart",
            ResetType::PowerCycle => "PowerCycle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn power_action(self) -> PowerAction {
        match self {
            ResetType::On => PowerAction::PowerUp,
            ResetType::ForceOff => PowerAction::PowerDown,
            ResetType::ForceRestart => PowerAction::Reset,
            ResetType::PowerCycle => PowerAction::PowerCycle,
        }
    }

    /// Powering on a running system or forcing off a stopped one.
    pub fn is_noop_for(self, current: PowerState) -> bool {
        matches!(
            (self, current),
            (ResetType::On, PowerState::On) | (ResetType::ForceOff, PowerState::Off)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetRequest {
    pub reset_type: ResetType,
}

impl ResetRequest {
    pub fn parse(body: &[u8]) -> Result<Self, RedfishError> {
        let Ok(Value::Object(body)) = serde_json::from_slice::<Value>(body) else {
            return Err(RedfishError::malformed_json());
        };
        let name = match body.get(RESET_TYPE_PROPERTY) {
            None | Some(Value::Null) => return Err(RedfishError::property_missing(RESET_TYPE_PROPERTY)),
            Some(Value::String(name)) if name.is_empty() => {
                return Err(RedfishError::property_missing(RESET_TYPE_PROPERTY));
            }
            Some(Value::String(name)) => name,
            Some(_) => return Err(RedfishError::malformed_json()),
        };
        let reset_type = ResetType::from_name(name)
            .ok_or_else(|| RedfishError::property_value_not_in_list(name, RESET_TYPE_PROPERTY))?;
        Ok(Self { reset_type })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResetOutcome {
    /// The backend accepted the action.
    Completed(Value),
    /// The backend answered with a non-zero return value.
    Exception(Value),
}

impl ResetOutcome {
    pub fn into_task(self) -> Value {
        match self {
            ResetOutcome::Completed(task) | ResetOutcome::Exception(task) => task,
        }
    }
}

pub async fn execute(
    devices: &Devices,
    system_id: &str,
    request: ResetRequest,
) -> Result<ResetOutcome, RedfishError> {
    let reset_type = request.reset_type;

    match devices.get_power_state(system_id).await {
        Ok(report) => {
            let current = PowerState::from_code(report.power_state);
            if reset_type.is_noop_for(current) {
                tracing::info!(
                    system_id,
                    reset_type = reset_type.as_str(),
                    power_state = current.as_str(),
                    "Rejecting reset that would not change power state"
                );
                return Err(RedfishError::operation_not_allowed());
            }
        }
        Err(err) => {
            tracing::warn!(
                system_id,
                error = %err,
                "Power state lookup failed, dispatching reset anyway"
            );
        }
    }

    let start_time = Utc::now();
    let action = reset_type.power_action();
    let result = devices
        .send_power_action(system_id, action)
        .await
        .map_err(|err| {
            tracing::error!(
                system_id,
                action = action.code(),
                error = %err,
                "Power action failed"
            );
            RedfishError::from_device_error(&err, ResourceKind::ComputerSystem.type_name(), system_id)
        })?;
    let end_time = Utc::now();

    let state = if result.return_value == 0 {
        TaskState::Completed
    } else {
        tracing::warn!(
            system_id,
            return_value = result.return_value,
            "Power action returned non-zero"
        );
        TaskState::Exception
    };
    let task = task::builder(&task::resource(&task::new_task_id()))
        .state(state)
        .start_time(start_time)
        .end_time(end_time)
        .reset(system_id, reset_type, result.return_value)
        .build();

    Ok(match state {
        TaskState::Completed => ResetOutcome::Completed(task),
        TaskState::Exception => ResetOutcome::Exception(task),
    })
}
