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

//! Synthesized Task describing a completed reset. Tasks are not stored, so
//! their `@odata.id` does not resolve.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde_json::json;

use crate::json::{JsonExt, JsonPatch};
use crate::redfish::computer_system::ResetType;
use crate::redfish::message_registry::BaseMessage;
use crate::redfish::schema::ResourceKind;
use crate::redfish::{self, Builder, oem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Completed,
    Exception,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Completed => "Completed",
            TaskState::Exception => "Exception",
        }
    }

    fn message(self) -> BaseMessage {
        match self {
            TaskState::Completed => BaseMessage::Success,
            TaskState::Exception => BaseMessage::GeneralError,
        }
    }

    /// `OK` or `Critical`, matching the severity of the task message.
    pub fn status(self) -> &'static str {
        self.message().severity().as_str()
    }
}

pub fn new_task_id() -> String {
    rand::rng().random_range(100_000..1_100_000).to_string()
}

pub fn resource<'a>(task_id: &'a str) -> redfish::Resource<'a> {
    redfish::Resource {
        odata_id: Cow::Owned(format!("/redfish/v1/TaskService/Tasks/{task_id}")),
        odata_type: Cow::Borrowed(ResourceKind::Task.odata_type()),
        id: Cow::Borrowed(task_id),
        name: Cow::Borrowed("System Reset Task"),
    }
}

pub fn builder(resource: &redfish::Resource) -> TaskBuilder {
    TaskBuilder {
        value: resource.json_patch(),
    }
}

pub struct TaskBuilder {
    value: serde_json::Value,
}

impl Builder for TaskBuilder {
    fn apply_patch(self, patch: serde_json::Value) -> Self {
        Self {
            value: self.value.patch(patch),
        }
    }
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl TaskBuilder {
    pub fn state(self, state: TaskState) -> Self {
        let message = state.message();
        self.apply_patch(json!({
            "TaskState": state.as_str(),
            "TaskStatus": state.status(),
            "Messages": [{
                "MessageId": message.message_id(),
                "Message": message.render(&[]),
                "Severity": state.status(),
            }],
        }))
    }

    pub fn start_time(self, t: DateTime<Utc>) -> Self {
        self.add_str_field("StartTime", &timestamp(t))
    }

    pub fn end_time(self, t: DateTime<Utc>) -> Self {
        self.add_str_field("EndTime", &timestamp(t))
    }

    pub fn reset(self, system_id: &str, reset_type: ResetType, return_value: i32) -> Self {
        self.apply_patch(oem::intel(json!({
            "SystemGUID": system_id,
            "ResetType": reset_type.as_str(),
            "ReturnValue": return_value,
        })))
    }

    pub fn build(self) -> serde_json::Value {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn task_ids_are_six_or_seven_digits() {
        for _ in 0..100 {
            let id: u32 = new_task_id().parse().unwrap();
            assert!((100_000..1_100_000).contains(&id));
        }
    }

    #[test]
    fn task_payload() {
        let start = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 2).unwrap();
        let task = builder(&resource("123456"))
            .state(TaskState::Completed)
            .start_time(start)
            .end_time(end)
            .reset("sys", ResetType::PowerCycle, 0)
            .build();

        assert_eq!(task["@odata.context"], "/redfish/v1/$metadata#Task.Task");
        assert_eq!(task["@odata.id"], "/redfish/v1/TaskService/Tasks/123456");
        assert_eq!(task["@odata.type"], "#Task.v1_6_0.Task");
        assert_eq!(task["StartTime"], "2026-10-18T12:00:00Z");
        assert_eq!(task["EndTime"], "2026-10-18T12:00:02Z");
        assert_eq!(task["Messages"][0]["Message"], "The request completed successfully.");
        assert_eq!(task["Messages"][0]["Severity"], "OK");
        assert_eq!(task["Oem"]["Intel"]["ResetType"], "PowerCycle");
    }

    #[test]
    fn exception_status_is_critical() {
        assert_eq!(TaskState::Exception.status(), "Critical");
        assert_eq!(TaskState::Completed.status(), "OK");
    }
}
