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

use eyre::WrapErr;
use tracing_subscriber::filter::{Directive, EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

const DEPENDENCY_DIRECTIVES: &[&str] = &["hyper=error", "h2=warn", "tower_http=info", "tokio_util::codec=warn"];

/// Quiets chatty dependencies regardless of the global level.
pub fn dep_log_filter(env_filter: EnvFilter) -> eyre::Result<EnvFilter> {
    DEPENDENCY_DIRECTIVES
        .iter()
        .try_fold(env_filter, |filter, directive| {
            let directive = directive
                .parse::<Directive>()
                .wrap_err_with(|| format!("invalid log directive {directive}"))?;
            Ok(filter.add_directive(directive))
        })
}

/// `-d` selects DEBUG, `-dd` and beyond TRACE. `RUST_LOG` still applies on top.
pub fn level_for(debug: u8) -> LevelFilter {
    match debug {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn setup_logging(debug: u8) -> eyre::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(debug).into())
        .from_env_lossy();
    let env_filter = dep_log_filter(env_filter)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .wrap_err("logging subscriber init")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_directives_parse() {
        assert!(dep_log_filter(EnvFilter::new("info")).is_ok());
    }

    #[test]
    fn debug_count_maps_to_level() {
        assert_eq!(level_for(0), LevelFilter::INFO);
        assert_eq!(level_for(1), LevelFilter::DEBUG);
        assert_eq!(level_for(4), LevelFilter::TRACE);
    }
}
