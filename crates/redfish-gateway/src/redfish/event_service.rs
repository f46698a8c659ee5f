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
use axum::routing::get;
use http::Method;
use serde_json::json;

use crate::http::reject_other_methods;
use crate::json::{JsonExt, JsonPatch};
use crate::redfish;
use crate::redfish::message_registry::RedfishError;
use crate::redfish::schema::ResourceKind;

pub fn resource<'a>() -> redfish::Resource<'a> {
    redfish::Resource {
        odata_id: Cow::Borrowed("/redfish/v1/EventService"),
        odata_type: Cow::Borrowed(ResourceKind::EventService.odata_type()),
        id: Cow::Borrowed("EventService"),
        name: Cow::Borrowed("Event Service"),
    }
}

pub fn subscriptions_collection() -> redfish::Collection<'static> {
    redfish::Collection {
        odata_id: Cow::Borrowed("/redfish/v1/EventService/Subscriptions"),
        odata_type: Cow::Borrowed(ResourceKind::EventDestinationCollection.odata_type()),
        name: Cow::Borrowed("Event Subscriptions Collection"),
    }
}

pub fn add_routes<S>(r: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    r.route(
        &resource().odata_id,
        reject_other_methods(
            get(get_event_service),
            ResourceKind::EventService.type_name(),
            &[Method::GET],
        ),
    )
    .route(
        &subscriptions_collection().odata_id,
        reject_other_methods(
            get(get_subscriptions).post(create_subscription),
            ResourceKind::EventDestinationCollection.type_name(),
            &[Method::GET, Method::POST],
        ),
    )
}

async fn get_event_service() -> Response {
    resource()
        .json_patch()
        .patch(json!({
            "ServiceEnabled": false,
            "DeliveryRetryAttempts": 0,
            "EventTypesForSubscription": [],
            "Status": redfish::resource::Status::Disabled.into_json(),
        }))
        .patch(subscriptions_collection().nav_property("Subscriptions"))
        .into_ok_response()
}

async fn get_subscriptions() -> Response {
    subscriptions_collection()
        .with_members(&[] as &[serde_json::Value])
        .into_ok_response()
}

async fn create_subscription() -> RedfishError {
    RedfishError::not_implemented("event subscription")
}
