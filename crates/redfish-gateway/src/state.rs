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

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::devices::{DeviceManagement, Devices};
use crate::etag;

/// Service-wide values resolved once at startup.
#[derive(Clone, Debug)]
pub struct ServiceSettings {
    pub uuid: Uuid,
    pub product: String,
    pub max_devices: usize,
    pub etag_hour_bucket: bool,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            uuid: config.service_uuid.unwrap_or_else(Uuid::new_v4),
            product: config.product.clone(),
            max_devices: config.max_devices,
            etag_hour_bucket: config.etag_hour_bucket,
        }
    }

    /// Current hour bucket for Chassis ETags, if enabled.
    pub fn etag_bucket(&self) -> Option<String> {
        self.etag_hour_bucket.then(|| etag::hour_bucket(Utc::now()))
    }
}

#[derive(Clone)]
pub struct GatewayState {
    pub devices: Devices,
    pub settings: Arc<ServiceSettings>,
}

impl GatewayState {
    pub fn new(devices: Arc<dyn DeviceManagement>, config: &Config) -> Self {
        Self {
            devices: Devices::new(devices, config.backend_timeout),
            settings: Arc::new(ServiceSettings::from_config(config)),
        }
    }
}
