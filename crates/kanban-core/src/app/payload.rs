//! Payload - push 通知のデコード
//!
//! ホストは盤面の状態を構造化された値か JSON 文字列で送ってきます。
//! デコードは失敗しません。使えないものは空のペイロードになります。

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::HostTask;
use crate::normalize::{normalize_validation_values, sanitize_task_list};
use crate::validation::Validations;

/// ホストから届いたままの push 通知
#[derive(Debug, Clone, PartialEq)]
pub enum PushPayload {
    Structured(Value),
    Text(String),
}

impl From<Value> for PushPayload {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<String> for PushPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for PushPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// デコード済みの push 通知（常にオブジェクト、空のこともある）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePayload(Map<String, Value>);

impl StatePayload {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// サニタイズ済みのタスク一覧
    pub fn tasks(&self) -> Vec<HostTask> {
        self.get("tasks").map(sanitize_task_list).unwrap_or_default()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.get("statuses")
            .map(normalize_validation_values)
            .unwrap_or_default()
    }

    pub fn validations(&self) -> Validations {
        self.get("validations")
            .map(Validations::from_value)
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for StatePayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub fn decode_state_payload(payload: PushPayload) -> StatePayload {
    match payload {
        PushPayload::Structured(Value::Object(map)) => StatePayload(map),
        PushPayload::Structured(_) => StatePayload::default(),
        PushPayload::Text(text) if text.is_empty() => StatePayload::default(),
        PushPayload::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => StatePayload(map),
            Ok(_) => StatePayload::default(),
            Err(err) => {
                warn!(error = %err, "failed to parse pushed payload string");
                StatePayload::default()
            }
        },
    }
}
