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

use clap::Parser;
use eyre::WrapErr;
use redfish_gateway::{Config, logging, server};

#[derive(Parser, Debug)]
#[clap(name = "redfish-gateway", about = "Redfish gateway for Intel AMT devices")]
struct Options {
    #[clap(long, env = "REDFISH_GATEWAY_CONFIG", help = "Path to the TOML configuration file")]
    config: Option<PathBuf>,

    #[clap(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-d debug, -dd trace)")]
    debug: u8,

    #[clap(long, help = "Override the configured listen address")]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let options = Options::parse();
    logging::setup_logging(options.debug)?;

    let mut config = Config::load(options.config.as_deref()).wrap_err("loading configuration")?;
    if let Some(listen) = options.listen {
        config.listen_address = listen;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?config,
        "Started redfish-gateway"
    );

    server::run(config).await.wrap_err("running gateway")?;

    tracing::info!("Stopped redfish-gateway");
    Ok(())
}
