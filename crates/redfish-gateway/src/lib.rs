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

//! Redfish REST gateway for Intel AMT devices reached through a
//! device-management backend.

pub mod config;
pub mod device_info;
pub mod devices;
pub mod error;
pub mod etag;
pub mod http;
pub mod json;
pub mod logging;
pub mod redfish;
pub mod router;
pub mod server;
pub mod state;
pub mod validation;

pub use config::Config;
pub use error::GatewayError;
pub use router::redfish_router;
pub use state::GatewayState;
