//! Task - カンバンのカード（タスクレコード）と部分更新
//!
//! - `TaskRecord`: 正規化済みのレコード（ストアに保存される形）
//! - `TaskPatch`: フィールドごとに Option を持つ部分更新
//! - `NumberedTask`: 読み出し時に位置 ID を付けたスナップショット
//! - `HostTask`: ホストから届いた生のレコード（サニタイズ済み）

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{Field, NO_KEY};
use super::task_no::TaskNo;
use super::value::{lenient_text, text_of};

/// TaskRecord は 1 枚のカード
///
/// # 不変条件
/// - `title` と `status` は空にならない
/// - それ以外は正規化済みの文字列（空文字は可）
/// - `due_date` は `YYYY-MM-DD` か空文字
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "ステータス", default)]
    pub status: String,
    #[serde(rename = "大分類", default)]
    pub major_category: String,
    #[serde(rename = "中分類", default)]
    pub minor_category: String,
    #[serde(rename = "タスク", default)]
    pub title: String,
    #[serde(rename = "担当者", default)]
    pub assignee: String,
    #[serde(rename = "優先度", default)]
    pub priority: String,
    #[serde(rename = "期限", default)]
    pub due_date: String,
    #[serde(rename = "備考", default)]
    pub note: String,
}

/// TaskPatch は add/update の入力
///
/// `None` は「未指定」（マージ時に既存値を残す）、
/// `Some("")` は null を含む「空で指定」を表す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(rename = "ステータス", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "大分類", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub major_category: Option<String>,
    #[serde(rename = "中分類", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub minor_category: Option<String>,
    #[serde(rename = "タスク", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "担当者", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(rename = "優先度", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "期限", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(rename = "備考", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TaskPatch {
    /// タイトルだけを指定した入力
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// ステータスだけを指定した入力（move 用）
    pub fn status_only(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// 既存レコードの上にこの入力を重ねる
    ///
    /// 指定されたフィールドが優先され、未指定のフィールドは既存値が残る。
    /// 結果はすべてのフィールドが `Some` になる。
    pub fn merged_over(&self, base: &TaskRecord) -> TaskPatch {
        let pick = |patch: &Option<String>, current: &String| {
            Some(patch.clone().unwrap_or_else(|| current.clone()))
        };
        TaskPatch {
            status: pick(&self.status, &base.status),
            major_category: pick(&self.major_category, &base.major_category),
            minor_category: pick(&self.minor_category, &base.minor_category),
            title: pick(&self.title, &base.title),
            assignee: pick(&self.assignee, &base.assignee),
            priority: pick(&self.priority, &base.priority),
            due_date: pick(&self.due_date, &base.due_date),
            note: pick(&self.note, &base.note),
        }
    }
}

impl From<TaskRecord> for TaskPatch {
    fn from(record: TaskRecord) -> Self {
        Self {
            status: Some(record.status),
            major_category: Some(record.major_category),
            minor_category: Some(record.minor_category),
            title: Some(record.title),
            assignee: Some(record.assignee),
            priority: Some(record.priority),
            due_date: Some(record.due_date),
            note: Some(record.note),
        }
    }
}

/// NumberedTask は位置 ID 付きのレコード（防御的コピー）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedTask {
    #[serde(flatten)]
    pub record: TaskRecord,
    #[serde(rename = "No")]
    pub no: TaskNo,
}

impl NumberedTask {
    pub fn new(record: TaskRecord, no: TaskNo) -> Self {
        Self { record, no }
    }
}

/// HostTask はホストから届いたレコードをそのまま保持する
///
/// 未知のキーも捨てない。`No` もホストが送った値のまま（整数とは限らない）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostTask(Map<String, Value>);

impl HostTask {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn text(&self, field: Field) -> String {
        self.get(field.wire_name()).map(text_of).unwrap_or_default()
    }

    /// ホストが送った `No`（無ければ null）
    pub fn raw_no(&self) -> &Value {
        self.get(NO_KEY).unwrap_or(&Value::Null)
    }

    /// `No` が位置 ID として解釈できるときだけ Some
    pub fn no(&self) -> Option<TaskNo> {
        TaskNo::from_value(self.raw_no())
    }

    /// 既知フィールドの型付きビュー
    pub fn record(&self) -> TaskRecord {
        TaskRecord {
            status: self.text(Field::Status),
            major_category: self.text(Field::MajorCategory),
            minor_category: self.text(Field::MinorCategory),
            title: self.text(Field::Title),
            assignee: self.text(Field::Assignee),
            priority: self.text(Field::Priority),
            due_date: self.text(Field::DueDate),
            note: self.text(Field::Note),
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for HostTask {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
