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
use axum::response::Response;
use axum::routing::{get, post};
use http::Method;
use serde_json::json;

use crate::http::{reject_other_action_methods, reject_other_methods};
use crate::json::{JsonExt, JsonPatch};
use crate::redfish;
use crate::redfish::message_registry::RedfishError;
use crate::redfish::schema::ResourceKind;

pub const SESSION_TIMEOUT_SECS: u32 = 30;

pub fn resource<'a>() -> redfish::Resource<'a> {
    redfish::Resource {
        odata_id: Cow::Borrowed("/redfish/v1/SessionService"),
        odata_type: Cow::Borrowed(ResourceKind::SessionService.odata_type()),
        id: Cow::Borrowed("SessionService"),
        name: Cow::Borrowed("Redfish Session Service"),
    }
}

pub fn sessions_collection() -> redfish::Collection<'static> {
    redfish::Collection {
        odata_id: Cow::Borrowed("/redfish/v1/SessionService/Sessions"),
        odata_type: Cow::Borrowed(ResourceKind::SessionCollection.odata_type()),
        name: Cow::Borrowed("Session Collection"),
    }
}

pub fn add_routes<S>(r: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    r.route(
        &resource().odata_id,
        reject_other_methods(
            get(get_session_service),
            ResourceKind::SessionService.type_name(),
            &[Method::GET],
        ),
    )
    .route(
        &sessions_collection().odata_id,
        reject_other_action_methods(
            get(get_sessions).post(create_session),
            "retrieve sessions collection",
            &[Method::GET, Method::POST],
        ),
    )
}

async fn get_session_service() -> Response {
    resource()
        .json_patch()
        .patch(json!({
            "ServiceEnabled": true,
            "SessionTimeout": SESSION_TIMEOUT_SECS,
            "Status": redfish::resource::Status::Ok.into_json(),
        }))
        .patch(sessions_collection().nav_property("Sessions"))
        .into_ok_response()
}

async fn get_sessions() -> Response {
    sessions_collection()
        .with_members(&[] as &[serde_json::Value])
        .into_ok_response()
}

async fn create_session() -> RedfishError {
    RedfishError::not_implemented("session creation")
}
