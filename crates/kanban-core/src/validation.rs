//! Validation - フィールドごとの選択肢リストとステータス集合
//!
//! # 構成
//! - **Validations**: フィールド名 → 選択肢（挿入順・重複なし・空なし）
//! - **StatusSet**: これまでに現れたステータスの集合（縮まない）
//! - **ValidationRegistry**: Validations を保持し、更新時にフォールバックを適用
//!
//! レジストリの status は StatusSet に流れ込むが、逆方向には流れない。

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DEFAULT_STATUSES, Field, PRIORITY_DEFAULT_OPTIONS};
use crate::normalize::{dedupe_values, normalize_validation_values};

/// Validations はフィールド名から選択肢リストへの対応
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Validations(IndexMap<String, Vec<String>>);

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドの選択肢（無ければ空スライス）
    pub fn get(&self, field: Field) -> &[String] {
        self.get_key(field.wire_name()).unwrap_or_default()
    }

    pub fn get_key(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn set(&mut self, field: Field, values: Vec<String>) {
        self.0.insert(field.wire_name().to_string(), values);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 任意の JSON をクレンジングして取り込む
    ///
    /// オブジェクト以外は空。各キーは重複・空白を除去し、空になったキーは落とす。
    pub fn from_value(payload: &Value) -> Self {
        let mut cleaned = Self::new();
        if let Some(object) = payload.as_object() {
            for (key, raw) in object {
                let values = normalize_validation_values(raw);
                if !values.is_empty() {
                    cleaned.0.insert(key.clone(), values);
                }
            }
        }
        cleaned
    }
}

/// StatusSet はこれまでに現れたステータスの集合
///
/// 先頭要素（組み込み既定の先頭）が空ステータスのフォールバックになる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    values: IndexSet<String>,
}

impl StatusSet {
    /// 基本ステータスで初期化（空なら組み込み既定）
    pub fn new<I, S>(base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: IndexSet<String> = dedupe_values(base).into_iter().collect();
        if values.is_empty() {
            values.extend(DEFAULT_STATUSES.iter().map(|s| s.to_string()));
        }
        Self { values }
    }

    pub fn fallback(&self) -> &str {
        self.values.first().map_or(DEFAULT_STATUSES[0], String::as_str)
    }

    /// 追加（既存なら何もしない）。新規なら true
    pub fn insert(&mut self, status: &str) -> bool {
        if self.values.contains(status) {
            return false;
        }
        self.values.insert(status.to_string())
    }

    pub fn contains(&self, status: &str) -> bool {
        self.values.contains(status)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for StatusSet {
    fn default() -> Self {
        Self::new(DEFAULT_STATUSES)
    }
}

/// ValidationRegistry は現在の Validations を保持
///
/// # 不変条件
/// - status と priority は空にならない（更新時にフォールバック）
#[derive(Debug, Clone)]
pub struct ValidationRegistry {
    current: Validations,
    priority_defaults: Vec<String>,
}

impl ValidationRegistry {
    pub fn new(initial: Validations, priority_defaults: Vec<String>) -> Self {
        let priority_defaults = if priority_defaults.is_empty() {
            PRIORITY_DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            priority_defaults
        };
        Self {
            current: initial,
            priority_defaults,
        }
    }

    /// 現在の Validations の防御的コピー
    pub fn snapshot(&self) -> Validations {
        self.current.clone()
    }

    /// 入力で置き換える
    ///
    /// # フロー
    /// 1. キーごとに重複・空白を除去（空になったキーは保存しない）
    /// 2. status が無ければ StatusSet 全体、priority が無ければ組み込み既定で補う
    /// 3. 結果の status を StatusSet に合流させる
    pub fn update(&mut self, payload: &Value, statuses: &mut StatusSet) -> Validations {
        let mut cleaned = Validations::from_value(payload);
        if cleaned.get(Field::Status).is_empty() {
            cleaned.set(Field::Status, statuses.to_vec());
        }
        if cleaned.get(Field::Priority).is_empty() {
            cleaned.set(Field::Priority, self.priority_defaults.clone());
        }
        for status in cleaned.get(Field::Status) {
            statuses.insert(status);
        }
        self.current = cleaned;
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ValidationRegistry {
        ValidationRegistry::new(
            Validations::new(),
            PRIORITY_DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn priority_is_deduped_and_blanks_dropped() {
        let mut statuses = StatusSet::default();
        let updated = registry().update(&json!({ "優先度": ["A", "A", "B", ""] }), &mut statuses);
        assert_eq!(updated.get(Field::Priority), ["A", "B"]);
    }

    #[test]
    fn empty_status_falls_back_to_status_set() {
        let mut statuses = StatusSet::new(["未着手", "完了"]);
        let updated = registry().update(&json!({ "ステータス": [] }), &mut statuses);
        assert_eq!(updated.get(Field::Status), ["未着手", "完了"]);
    }

    #[test]
    fn missing_priority_falls_back_to_defaults() {
        let mut statuses = StatusSet::default();
        let updated = registry().update(&json!({ "大分類": ["X"] }), &mut statuses);
        assert_eq!(updated.get(Field::Priority), ["高", "中", "低"]);
        assert_eq!(updated.get(Field::MajorCategory), ["X"]);
    }

    #[test]
    fn non_object_payload_is_treated_as_empty() {
        let mut statuses = StatusSet::default();
        let updated = registry().update(&json!("nope"), &mut statuses);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.get(Field::Status), statuses.to_vec().as_slice());
    }

    #[test]
    fn keys_that_clean_to_empty_are_dropped() {
        let mut statuses = StatusSet::default();
        let updated = registry().update(&json!({ "中分類": ["  ", null] }), &mut statuses);
        assert!(!updated.contains_key("中分類"));
    }

    #[test]
    fn registry_statuses_flow_into_status_set() {
        let mut statuses = StatusSet::default();
        registry().update(&json!({ "ステータス": ["レビュー", " 完了 "] }), &mut statuses);
        assert!(statuses.contains("レビュー"));
        assert_eq!(statuses.len(), DEFAULT_STATUSES.len() + 1);
    }

    #[test]
    fn status_set_never_duplicates() {
        let mut statuses = StatusSet::default();
        assert!(!statuses.insert("未着手"));
        assert!(statuses.insert("差し戻し"));
        assert_eq!(statuses.fallback(), "未着手");
    }

    #[test]
    fn empty_base_uses_builtin_statuses() {
        let statuses = StatusSet::new(Vec::<String>::new());
        assert_eq!(statuses.to_vec(), DEFAULT_STATUSES);
    }
}
