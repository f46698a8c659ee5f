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

//! Entity tags for Chassis and FirmwareInventory resources.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::device_info::ChassisInfo;

pub const EMPTY_COLLECTION: &str = "empty-collection";
const SHORT_HASH_LEN: usize = 16;

/// `YYYY-MM-DDTHH` of `now`, mixed into Chassis ETags so they roll over
/// hourly.
pub fn hour_bucket(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H").to_string()
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn short_hash(data: &[u8]) -> String {
    let mut digest = sha256_hex(data);
    digest.truncate(SHORT_HASH_LEN);
    digest
}

pub fn chassis_collection_etag(member_ids: &[String], bucket: Option<&str>) -> String {
    if member_ids.is_empty() {
        return EMPTY_COLLECTION.to_string();
    }
    let mut content = bucket.unwrap_or_default().to_string();
    for id in member_ids {
        content.push_str(id);
    }
    short_hash(content.as_bytes())
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ChassisFingerprint<'a> {
    manufacturer: &'a str,
    model: &'a str,
    serial_number: &'a str,
    part_number: &'a str,
    #[serde(rename = "SKU")]
    sku: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
}

pub fn chassis_etag(info: &ChassisInfo, bucket: Option<&str>) -> String {
    let fingerprint = ChassisFingerprint {
        manufacturer: &info.manufacturer,
        model: &info.model,
        serial_number: &info.serial_number,
        part_number: &info.part_number,
        sku: &info.sku,
        timestamp: bucket,
    };
    match serde_json::to_vec(&fingerprint) {
        Ok(bytes) => short_hash(&bytes),
        // Serializing borrowed strings cannot fail in practice.
        Err(_) => short_hash(info.serial_number.as_bytes()),
    }
}

/// Weak entity tag over `content`, e.g. `W/"9f86d0..."`.
pub fn weak_etag(content: &str) -> String {
    format!("W/\"{}\"", sha256_hex(content.as_bytes()))
}

fn opaque_tag(tag: &str) -> &str {
    let tag = tag.trim();
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    tag.trim_matches('"')
}

/// Whether an `If-Match` / `If-None-Match` header value selects `current`.
/// Handles `*`, comma separated lists, quotes and weak prefixes.
pub fn header_matches(header: &str, current: &str) -> bool {
    let current = opaque_tag(current);
    header
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || opaque_tag(candidate) == current)
}
