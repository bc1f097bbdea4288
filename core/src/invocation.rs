use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One inbound trigger, kept as an opaque JSON record.
///
/// The handler only ever serializes it. Key order is preserved so the logged
/// form matches what the platform delivered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct InvocationEvent(Value);

impl InvocationEvent {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for InvocationEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Execution metadata for a single invocation.
///
/// Serialized with the field names the Lambda console and the Node.js runtime
/// use. The remaining-time accessor is derived from `deadline_ms` and is not
/// part of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    pub function_name: String,
    pub function_version: String,
    pub invoked_function_arn: String,
    #[serde(rename = "memoryLimitInMB")]
    pub memory_limit_in_mb: i32,
    pub aws_request_id: String,
    pub log_group_name: String,
    pub log_stream_name: String,
    /// Wall-clock deadline as milliseconds since the Unix epoch.
    pub deadline_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xray_trace_id: Option<String>,
}

impl InvocationContext {
    /// Time left before `deadline_ms`, measured from `now_ms`. Zero once past.
    pub fn remaining_time_at(&self, now_ms: i64) -> Duration {
        let now_ms = u64::try_from(now_ms).unwrap_or(0);
        Duration::from_millis(self.deadline_ms.saturating_sub(now_ms))
    }

    pub fn remaining_time(&self) -> Duration {
        self.remaining_time_at(Utc::now().timestamp_millis())
    }

    pub fn remaining_time_in_millis(&self) -> u64 {
        u64::try_from(self.remaining_time().as_millis()).unwrap_or(u64::MAX)
    }
}
