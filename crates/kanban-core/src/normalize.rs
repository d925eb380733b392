//! Normalize - 入力値を正規のフィールド値へ変換する純粋関数群
//!
//! ストア側（レコード正規化）とクライアント側（ホスト由来リストのサニタイズ）の
//! 両方がここを通ります。状態を持つのは `normalize_task` が受け取る
//! `StatusSet` だけです。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::domain::{
    Field, HostTask, KanbanError, NO_KEY, TaskNo, TaskPatch, TaskRecord, UNSET_STATUS_LABEL,
    text_of,
};
use crate::validation::StatusSet;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// トリム済みテキスト（未指定は空文字）
pub fn normalize_text(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}

/// ステータスを整える。空なら `fallback`
pub fn sanitize_status(value: Option<&str>, fallback: &str) -> String {
    let text = normalize_text(value);
    if text.is_empty() {
        return fallback.to_string();
    }
    text
}

/// 日付を `YYYY-MM-DD` に揃える。空・解釈不能なら空文字
pub fn to_iso_date(value: Option<&str>) -> String {
    let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return String::new();
    };
    parse_date(text)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.with_timezone(&Local).date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|stamp| stamp.date())
        })
}

/// 優先度。語彙は強制しない
pub fn normalize_priority(value: Option<&str>) -> String {
    normalize_text(value)
}

/// 入力から完全なレコードを組み立てる
///
/// ステータスはタイトル検査より前に `statuses` へ登録される
/// （タイトル不足で失敗しても新しいステータスは残る）。
///
/// # Errors
/// タイトルがトリム後に空なら `KanbanError::Validation`。
pub fn normalize_task(
    payload: &TaskPatch,
    statuses: &mut StatusSet,
) -> Result<TaskRecord, KanbanError> {
    let status = sanitize_status(payload.status.as_deref(), statuses.fallback());
    statuses.insert(&status);

    let title = normalize_text(payload.title.as_deref());
    if title.is_empty() {
        return Err(KanbanError::title_required());
    }

    Ok(TaskRecord {
        status,
        major_category: normalize_text(payload.major_category.as_deref()),
        minor_category: normalize_text(payload.minor_category.as_deref()),
        title,
        assignee: normalize_text(payload.assignee.as_deref()),
        priority: normalize_priority(payload.priority.as_deref()),
        due_date: to_iso_date(payload.due_date.as_deref()),
        note: payload.note.clone().unwrap_or_default(),
    })
}

/// 表示用ステータス。空なら未設定ラベル
pub fn normalize_status_label(value: Option<&str>) -> String {
    let text = normalize_text(value);
    if text.is_empty() {
        return UNSET_STATUS_LABEL.to_string();
    }
    text
}

/// 表示用ラベルを保存値に戻す。未設定ラベルは空文字
pub fn denormalize_status_label(value: Option<&str>) -> String {
    let text = normalize_text(value);
    if text == UNSET_STATUS_LABEL {
        return String::new();
    }
    text
}

/// トリム・空除去・重複除去（挿入順を保つ）
pub fn dedupe_values<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for value in values {
        let text = value.as_ref().trim();
        if text.is_empty() || cleaned.iter().any(|seen| seen == text) {
            continue;
        }
        cleaned.push(text.to_string());
    }
    cleaned
}

/// 任意の JSON を選択肢リストに整える。配列以外は空
pub fn normalize_validation_values(raw: &Value) -> Vec<String> {
    match raw.as_array() {
        Some(items) => dedupe_values(items.iter().map(text_of)),
        None => Vec::new(),
    }
}

/// ホスト由来の 1 レコードを整える
///
/// オブジェクトでない、またはタイトルが空なら `None`。
/// タイトルだけ trim し、他のキーは届いたまま残す。
/// `No` が空（無い・null・空白）のときだけ `fallback_index + 1` を振る。
pub fn sanitize_task_record(value: &Value, fallback_index: usize) -> Option<HostTask> {
    let object = value.as_object()?;
    let title = object
        .get(Field::Title.wire_name())
        .map(text_of)
        .unwrap_or_default()
        .trim()
        .to_string();
    if title.is_empty() {
        return None;
    }

    let mut sanitized = object.clone();
    sanitized.insert(Field::Title.wire_name().to_string(), Value::String(title));
    let no_text = sanitized.get(NO_KEY).map(text_of).unwrap_or_default();
    if no_text.trim().is_empty() {
        let no = TaskNo::from_index(fallback_index);
        sanitized.insert(NO_KEY.to_string(), Value::from(no.get()));
    }
    Some(HostTask::from(sanitized))
}

/// ホスト由来のリストを整える。配列以外は空
pub fn sanitize_task_list(raw: &Value) -> Vec<HostTask> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    let mut tasks: Vec<HostTask> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(task) = sanitize_task_record(item, tasks.len()) {
            tasks.push(task);
        }
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::blank(Some("   "), "未着手")]
    #[case::missing(None, "未着手")]
    #[case::trimmed(Some(" 完了 "), "完了")]
    fn sanitize_status_falls_back_when_blank(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(sanitize_status(raw, "未着手"), expected);
    }

    #[rstest]
    #[case::iso(Some("2024-03-05"), "2024-03-05")]
    #[case::slashes(Some("2024/03/05"), "2024-03-05")]
    #[case::with_time(Some("2024-03-05 10:30"), "2024-03-05")]
    #[case::t_separator(Some("2024-03-05T10:30:00"), "2024-03-05")]
    #[case::padded(Some("  2024-12-31  "), "2024-12-31")]
    #[case::empty(Some(""), "")]
    #[case::missing(None, "")]
    #[case::garbage(Some("next week"), "")]
    #[case::impossible(Some("2024-02-30"), "")]
    fn to_iso_date_canonicalizes(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(to_iso_date(raw), expected);
    }

    #[test]
    fn to_iso_date_converts_offsets_to_local_day() {
        let raw = "2024-03-05T12:00:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .expect("rfc3339")
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(to_iso_date(Some(raw)), expected);
    }

    #[test]
    fn normalize_priority_has_no_forced_default() {
        assert_eq!(normalize_priority(None), "");
        assert_eq!(normalize_priority(Some(" 最優先 ")), "最優先");
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tabs("\t\n")]
    fn normalize_task_requires_title(#[case] title: &str) {
        let mut statuses = StatusSet::default();
        let err = normalize_task(&TaskPatch::titled(title), &mut statuses).unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
    }

    #[test]
    fn normalize_task_fills_defaults_and_trims() {
        let mut statuses = StatusSet::default();
        let patch = TaskPatch::titled("  Write report ")
            .with_assignee(" 佐藤 ")
            .with_due_date("2024/01/09")
            .with_note("  raw note ");
        let record = normalize_task(&patch, &mut statuses).expect("valid");
        assert_eq!(record.title, "Write report");
        assert_eq!(record.status, "未着手");
        assert_eq!(record.assignee, "佐藤");
        assert_eq!(record.major_category, "");
        assert_eq!(record.due_date, "2024-01-09");
        assert_eq!(record.note, "  raw note ");
    }

    #[test]
    fn normalize_task_records_new_status_even_on_failure() {
        let mut statuses = StatusSet::default();
        let patch = TaskPatch::titled(" ").with_status("レビュー");
        assert!(normalize_task(&patch, &mut statuses).is_err());
        assert!(statuses.contains("レビュー"));
    }

    #[test]
    fn status_labels_round_trip() {
        assert_eq!(normalize_status_label(Some("  ")), UNSET_STATUS_LABEL);
        assert_eq!(denormalize_status_label(Some(UNSET_STATUS_LABEL)), "");
        assert_eq!(denormalize_status_label(Some(" 完了 ")), "完了");
    }

    #[test]
    fn validation_values_are_cleaned() {
        let raw = json!([" A", "A", null, "", 3, "B"]);
        assert_eq!(normalize_validation_values(&raw), ["A", "3", "B"]);
        assert!(normalize_validation_values(&json!({ "x": 1 })).is_empty());
    }

    #[test]
    fn sanitize_task_list_drops_untitled_and_numbers_blank_ids() {
        let raw = json!([
            { "タスク": " 一 ", "No": 7 },
            { "タスク": "" },
            "not a record",
            { "タスク": "二", "No": "" },
            { "タスク": "三", "No": null, "優先度": null },
        ]);
        let tasks = sanitize_task_list(&raw);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].record().title, "一");
        assert_eq!(tasks[0].no(), Some(TaskNo::new(7)));
        assert_eq!(tasks[1].no(), Some(TaskNo::new(2)));
        assert_eq!(tasks[2].no(), Some(TaskNo::new(3)));
        assert_eq!(tasks[2].record().priority, "");
    }

    #[rstest]
    #[case::fraction(json!(1.5))]
    #[case::word(json!("x"))]
    #[case::padded_text(json!(" 12 "))]
    fn sanitize_task_record_keeps_non_blank_ids_as_sent(#[case] no: Value) {
        let raw = json!({ "タスク": "A", "No": no.clone() });
        let task = sanitize_task_record(&raw, 4).unwrap();
        assert_eq!(task.raw_no(), &no);
    }

    #[test]
    fn sanitize_task_record_keeps_unknown_keys() {
        let raw = json!({ "タスク": "  A ", "No": 2, "行番号": 14, "色": "red" });
        let task = sanitize_task_record(&raw, 0).unwrap();
        assert_eq!(task.get("タスク"), Some(&json!("A")));
        assert_eq!(task.get("行番号"), Some(&json!(14)));
        assert_eq!(task.get("色"), Some(&json!("red")));
        assert_eq!(task.into_map().len(), 4);
    }

    #[test]
    fn sanitize_task_list_rejects_non_lists() {
        assert!(sanitize_task_list(&json!({ "タスク": "x" })).is_empty());
    }
}
