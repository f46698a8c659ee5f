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

use std::borrow::Cow;

use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use http::Method;
use serde_json::json;

use crate::http::reject_other_methods;
use crate::json::{JsonExt, JsonPatch};
use crate::redfish::schema::ResourceKind;
use crate::redfish::{self, Builder};
use crate::state::GatewayState;

pub const REDFISH_VERSION: &str = "1.11.0";
pub const VENDOR: &str = "Intel Corporation";

pub fn resource<'a>() -> redfish::Resource<'a> {
    redfish::Resource {
        odata_id: Cow::Borrowed("/redfish/v1/"),
        odata_type: Cow::Borrowed(ResourceKind::ServiceRoot.odata_type()),
        id: Cow::Borrowed("RootService"),
        name: Cow::Borrowed("Redfish Root Service"),
    }
}

pub fn add_routes(r: Router<GatewayState>) -> Router<GatewayState> {
    let route = || {
        reject_other_methods(
            get(get_service_root),
            ResourceKind::ServiceRoot.type_name(),
            &[Method::GET],
        )
    };
    r.route("/redfish/v1/", route()).route("/redfish/v1", route())
}

pub fn builder(resource: &redfish::Resource) -> ServiceRootBuilder {
    ServiceRootBuilder {
        value: resource.json_patch(),
    }
}

async fn get_service_root(State(state): State<GatewayState>) -> Response {
    builder(&resource())
        .redfish_version(REDFISH_VERSION)
        .uuid(&state.settings.uuid.to_string())
        .product(&state.settings.product)
        .vendor(VENDOR)
        .system_collection(&redfish::computer_system::collection())
        .chassis_collection(&redfish::chassis::collection())
        .session_service(&redfish::session_service::resource())
        .event_service(&redfish::event_service::resource())
        .build()
        .into_ok_response()
}

pub struct ServiceRootBuilder {
    value: serde_json::Value,
}

impl Builder for ServiceRootBuilder {
    fn apply_patch(self, patch: serde_json::Value) -> Self {
        Self {
            value: self.value.patch(patch),
        }
    }
}

impl ServiceRootBuilder {
    pub fn build(self) -> serde_json::Value {
        self.apply_patch(json!({ "Links": {} })).value
    }

    pub fn redfish_version(self, v: &str) -> Self {
        self.add_str_field("RedfishVersion", v)
    }

    pub fn uuid(self, v: &str) -> Self {
        self.add_str_field("UUID", v)
    }

    pub fn product(self, v: &str) -> Self {
        self.add_str_field("Product", v)
    }

    pub fn vendor(self, v: &str) -> Self {
        self.add_str_field("Vendor", v)
    }

    pub fn system_collection(self, v: &redfish::Collection<'_>) -> Self {
        self.apply_patch(v.nav_property("Systems"))
    }

    pub fn chassis_collection(self, v: &redfish::Collection<'_>) -> Self {
        self.apply_patch(v.nav_property("Chassis"))
    }

    pub fn session_service(self, v: &redfish::Resource<'_>) -> Self {
        self.apply_patch(v.nav_property("SessionService"))
    }

    pub fn event_service(self, v: &redfish::Resource<'_>) -> Self {
        self.apply_patch(v.nav_property("EventService"))
    }
}
