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

use tokio::net::TcpListener;

use crate::config::Config;
use crate::devices::DeviceManagement;
use crate::devices::inventory::StaticInventory;
use crate::error::GatewayError;
use crate::router::redfish_router;
use crate::state::GatewayState;

/// Backend selected by the configuration.
pub fn devices_from_config(config: &Config) -> Result<Arc<dyn DeviceManagement>, GatewayError> {
    match &config.inventory_path {
        Some(path) => Ok(Arc::new(StaticInventory::from_file(path)?)),
        None => {
            tracing::warn!("No inventory_path configured, serving an empty device inventory");
            Ok(Arc::new(StaticInventory::default()))
        }
    }
}

pub async fn run(config: Config) -> Result<(), GatewayError> {
    let devices = devices_from_config(&config)?;
    let state = GatewayState::new(devices, &config);
    tracing::info!(
        service_uuid = %state.settings.uuid,
        max_devices = state.settings.max_devices,
        backend_timeout = ?config.backend_timeout,
        "Gateway state initialized"
    );

    let address = config.listen_address;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| GatewayError::Bind { address, source })?;
    tracing::info!(%address, "Redfish gateway listening");

    axum::serve(listener, redfish_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(GatewayError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
