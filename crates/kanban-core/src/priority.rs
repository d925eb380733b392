//! Priority - 優先度セレクタの選択肢と既定選択
//!
//! 描画層（DOM）は対象外です。ここでは描画層が消費する
//! 「選択肢リスト + 選択値」を計算して返します。

use crate::domain::{Field, MEDIUM_PRIORITY, PRIORITY_DEFAULT_OPTIONS, UNSET_PRIORITY_LABEL};
use crate::normalize::{dedupe_values, normalize_text};
use crate::validation::Validations;

/// セレクタの 1 項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn plain(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
        }
    }
}

/// 描画層に渡す選択肢と選択値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityChoices {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

impl PriorityChoices {
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.value.as_str())
    }
}

/// PriorityHelper は Validations から優先度の選択肢を導出
///
/// `source` はクライアントが保持している最新の Validations を返す。
///
/// # 使用例
/// ```ignore
/// let helper = PriorityHelper::new(|| cached.clone());
/// let choices = helper.choices(Some(&task.priority), false);
/// ```
pub struct PriorityHelper<F> {
    source: F,
    default_options: Vec<String>,
}

impl<F> PriorityHelper<F>
where
    F: Fn() -> Validations,
{
    pub fn new(source: F) -> Self {
        Self {
            source,
            default_options: PRIORITY_DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_default_options(mut self, default_options: Vec<String>) -> Self {
        self.default_options = default_options;
        self
    }

    /// 有効な選択肢（重複なし・空でない）
    ///
    /// レジストリの priority が空なら既定値を使い、
    /// クレンジング後も空なら既定値を強制的に入れる。
    pub fn options(&self) -> Vec<String> {
        let validations = (self.source)();
        let registered = validations.get(Field::Priority);
        let mut options = if registered.is_empty() {
            dedupe_values(&self.default_options)
        } else {
            dedupe_values(registered)
        };
        if options.is_empty() {
            for value in &self.default_options {
                if !options.contains(value) {
                    options.push(value.clone());
                }
            }
        }
        options
    }

    /// 「中」があればそれ、無ければ先頭、それも無ければ空文字
    pub fn default_value(&self) -> String {
        let options = self.options();
        if options.iter().any(|option| option == MEDIUM_PRIORITY) {
            return MEDIUM_PRIORITY.to_string();
        }
        options.into_iter().next().unwrap_or_default()
    }

    /// セレクタに流し込む選択肢と選択値を決める
    ///
    /// # 優先順位
    /// 1. 現在値が空で既定を強制しないときだけ「未設定」疑似選択肢を先頭に置く
    /// 2. 現在値が選択肢に無ければ末尾に追加する（値を失わない）
    /// 3. 選択値は 現在値 → 未設定（あれば）→ 既定値 の順
    pub fn choices(&self, current: Option<&str>, prefer_default: bool) -> PriorityChoices {
        let current = normalize_text(current);
        let options = self.options();

        let mut entries: Vec<SelectOption> = Vec::with_capacity(options.len() + 1);
        if current.is_empty() && !prefer_default {
            entries.push(SelectOption {
                value: String::new(),
                label: UNSET_PRIORITY_LABEL.to_string(),
            });
        }
        entries.extend(options.iter().map(|value| SelectOption::plain(value)));
        if !current.is_empty() && !options.contains(&current) {
            entries.push(SelectOption::plain(&current));
        }

        let has = |value: &str| entries.iter().any(|entry| entry.value == value);
        let mut selected = current.clone();
        if selected.is_empty() || !has(&selected) {
            selected = if prefer_default || !has("") {
                self.default_value()
            } else {
                String::new()
            };
        }
        if !has(&selected) {
            selected = entries.first().map(|entry| entry.value.clone()).unwrap_or_default();
        }

        PriorityChoices {
            options: entries,
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_priorities(values: serde_json::Value) -> Validations {
        Validations::from_value(&json!({ "優先度": values }))
    }

    #[test]
    fn empty_registry_uses_defaults_and_medium() {
        let helper = PriorityHelper::new(|| with_priorities(json!([])));
        assert_eq!(helper.options(), ["高", "中", "低"]);
        assert_eq!(helper.default_value(), "中");
    }

    #[test]
    fn registry_priorities_win_and_are_deduped() {
        let helper = PriorityHelper::new(|| with_priorities(json!(["A", " A", "B"])));
        assert_eq!(helper.options(), ["A", "B"]);
        assert_eq!(helper.default_value(), "A");
    }

    #[test]
    fn blank_defaults_leave_no_default_value() {
        let helper = PriorityHelper::new(Validations::new).with_default_options(vec![]);
        assert!(helper.options().is_empty());
        assert_eq!(helper.default_value(), "");
    }

    #[test]
    fn unset_option_only_when_no_current_value() {
        let helper = PriorityHelper::new(Validations::new);
        let choices = helper.choices(None, false);
        assert_eq!(choices.options[0].value, "");
        assert_eq!(choices.options[0].label, UNSET_PRIORITY_LABEL);
        assert_eq!(choices.selected, "");
    }

    #[test]
    fn prefer_default_skips_unset_and_selects_medium() {
        let helper = PriorityHelper::new(Validations::new);
        let choices = helper.choices(Some("  "), true);
        assert!(choices.values().all(|value| !value.is_empty()));
        assert_eq!(choices.selected, "中");
    }

    #[test]
    fn unknown_current_value_is_appended_and_kept() {
        let helper = PriorityHelper::new(Validations::new);
        let choices = helper.choices(Some(" 緊急 "), false);
        assert_eq!(choices.values().collect::<Vec<_>>(), ["高", "中", "低", "緊急"]);
        assert_eq!(choices.selected, "緊急");
    }

    #[test]
    fn known_current_value_is_selected() {
        let helper = PriorityHelper::new(Validations::new);
        let choices = helper.choices(Some("低"), true);
        assert_eq!(choices.options.len(), 3);
        assert_eq!(choices.selected, "低");
    }
}
