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

use std::any::Any;

use axum::Router;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::redfish;
use crate::redfish::message_registry::RedfishError;
use crate::state::GatewayState;
use crate::validation::{MAX_REQUEST_BODY, request_guard};

/// Full Redfish surface with its middleware stack.
pub fn redfish_router(state: GatewayState) -> Router {
    let router = Router::new();
    let router = redfish::service_root::add_routes(router);
    let router = redfish::metadata::add_routes(router);
    let router = redfish::session_service::add_routes(router);
    let router = redfish::event_service::add_routes(router);
    let router = redfish::computer_system::add_routes(router);
    let router = redfish::software_inventory::add_routes(router);
    let router = redfish::chassis::add_routes(router);
    with_middleware(router).with_state(state)
}

fn with_middleware(router: Router<GatewayState>) -> Router<GatewayState> {
    router
        .fallback(crate::http::resource_not_found)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY))
        .layer(middleware::from_fn(request_guard))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Handler panics still answer with a Redfish 500 envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Request handler panicked");
    RedfishError::general_error().into_response()
}
