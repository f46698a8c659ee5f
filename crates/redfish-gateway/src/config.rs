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

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GatewayError;

pub const ENV_PREFIX: &str = "REDFISH_GATEWAY_";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_address: SocketAddr,
    /// ServiceRoot UUID. A random one is generated at startup when unset.
    pub service_uuid: Option<Uuid>,
    pub product: String,
    /// Upper bound on devices listed by the Systems and Chassis collections.
    pub max_devices: usize,
    #[serde(with = "humantime_serde")]
    pub backend_timeout: Duration,
    /// Mix the current hour into Chassis ETags.
    pub etag_hour_bucket: bool,
    /// Device inventory file served by the static backend.
    pub inventory_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from(([0, 0, 0, 0], 8181)),
            service_uuid: None,
            product: "Device Management Toolkit Console".to_string(),
            max_devices: 100,
            backend_timeout: Duration::from_secs(30),
            etag_hour_bucket: true,
            inventory_path: None,
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then `REDFISH_GATEWAY_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, GatewayError> {
        Self::figment(path).extract().map_err(Box::new).map_err(Into::into)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
