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
use std::path::PathBuf;

/// Errors that stop the gateway process from starting or serving.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("failed to read device inventory {}: {source}", path.display())]
    InventoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse device inventory {}: {source}", path.display())]
    InventoryToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse device inventory {}: {source}", path.display())]
    InventoryJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}
