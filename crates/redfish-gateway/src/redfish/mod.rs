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

pub mod chassis;
pub mod collection;
pub mod computer_system;
pub mod event_service;
pub mod message_registry;
pub mod metadata;
pub mod oem;
pub mod resource;
pub mod schema;
pub mod service_root;
pub mod session_service;
pub mod software_inventory;
pub mod task;

pub use collection::Collection;
pub use resource::Resource;

/// Common shape of the resource builders: an accumulated JSON value that
/// fields are merged into.
pub trait Builder: Sized {
    fn apply_patch(self, patch: serde_json::Value) -> Self;

    fn add_str_field(self, name: &str, value: &str) -> Self {
        self.apply_patch(json!({ name: value }))
    }
}
