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

//! Versioned schema strings for every resource kind the service serves.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    ServiceRoot,
    SessionService,
    SessionCollection,
    EventService,
    EventDestinationCollection,
    ComputerSystemCollection,
    ComputerSystem,
    ChassisCollection,
    Chassis,
    SoftwareInventoryCollection,
    SoftwareInventory,
    Task,
}

struct SchemaEntry {
    kind: ResourceKind,
    type_name: &'static str,
    odata_type: &'static str,
}

/// Indexed by `ResourceKind as usize`.
static SCHEMAS: [SchemaEntry; 12] = [
    SchemaEntry {
        kind: ResourceKind::ServiceRoot,
        type_name: "ServiceRoot",
        odata_type: "#ServiceRoot.v1_11_0.ServiceRoot",
    },
    SchemaEntry {
        kind: ResourceKind::SessionService,
        type_name: "SessionService",
        odata_type: "#SessionService.v1_0_0.SessionService",
    },
    SchemaEntry {
        kind: ResourceKind::SessionCollection,
        type_name: "SessionCollection",
        odata_type: "#SessionCollection.SessionCollection",
    },
    SchemaEntry {
        kind: ResourceKind::EventService,
        type_name: "EventService",
        odata_type: "#EventService.v1_0_0.EventService",
    },
    SchemaEntry {
        kind: ResourceKind::EventDestinationCollection,
        type_name: "EventDestinationCollection",
        odata_type: "#EventDestinationCollection.EventDestinationCollection",
    },
    SchemaEntry {
        kind: ResourceKind::ComputerSystemCollection,
        type_name: "ComputerSystemCollection",
        odata_type: "#ComputerSystemCollection.ComputerSystemCollection",
    },
    SchemaEntry {
        kind: ResourceKind::ComputerSystem,
        type_name: "ComputerSystem",
        odata_type: "#ComputerSystem.v1_0_0.ComputerSystem",
    },
    SchemaEntry {
        kind: ResourceKind::ChassisCollection,
        type_name: "ChassisCollection",
        odata_type: "#ChassisCollection.ChassisCollection",
    },
    SchemaEntry {
        kind: ResourceKind::Chassis,
        type_name: "Chassis",
        odata_type: "#Chassis.v1_21_0.Chassis",
    },
    SchemaEntry {
        kind: ResourceKind::SoftwareInventoryCollection,
        type_name: "SoftwareInventoryCollection",
        odata_type: "#SoftwareInventoryCollection.SoftwareInventoryCollection",
    },
    SchemaEntry {
        kind: ResourceKind::SoftwareInventory,
        type_name: "SoftwareInventory",
        odata_type: "#SoftwareInventory.v1_3_0.SoftwareInventory",
    },
    SchemaEntry {
        kind: ResourceKind::Task,
        type_name: "Task",
        odata_type: "#Task.v1_6_0.Task",
    },
];

impl ResourceKind {
    fn entry(self) -> &'static SchemaEntry {
        &SCHEMAS[self as usize]
    }

    /// Bare schema type, used in error messages.
    pub fn type_name(self) -> &'static str {
        self.entry().type_name
    }

    pub fn odata_type(self) -> &'static str {
        self.entry().odata_type
    }
}

/// `#Chassis.v1_21_0.Chassis` becomes `/redfish/v1/$metadata#Chassis.Chassis`.
pub fn odata_context(odata_type: &str) -> String {
    let trimmed = odata_type.trim_start_matches('#');
    let namespace = trimmed.split('.').next().unwrap_or(trimmed);
    let type_name = trimmed.rsplit('.').next().unwrap_or(trimmed);
    format!("/redfish/v1/$metadata#{namespace}.{type_name}")
}
