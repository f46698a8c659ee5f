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

use serde_json::json;

use crate::json::JsonExt;

pub const INTEL_ODATA_TYPE: &str = "#Intel.v1_0_0.Intel";

/// `{"Oem": {"Intel": {...}}}` with the Intel schema type filled in.
pub fn intel(fields: serde_json::Value) -> serde_json::Value {
    json!({
        "Oem": {
            "Intel": json!({ "@odata.type": INTEL_ODATA_TYPE }).patch(fields)
        }
    })
}

/// OEM block for anything bound to a single managed device.
pub fn intel_for_system(system_id: &str) -> serde_json::Value {
    intel(json!({ "SystemGUID": system_id }))
}
