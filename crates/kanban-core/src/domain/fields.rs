//! Field - タスクレコードのフィールド名と組み込み既定値
//!
//! ホスト境界では日本語のフィールド名（wire 名）でやり取りします。
//! Rust 側では `Field` enum で扱い、typo を型で排除します。

use std::fmt;

/// 組み込みのステータス一覧（先頭がフォールバック値）
pub const DEFAULT_STATUSES: [&str; 4] = ["未着手", "進行中", "完了", "保留"];

/// 組み込みの優先度一覧
pub const PRIORITY_DEFAULT_OPTIONS: [&str; 3] = ["高", "中", "低"];

/// 優先度の既定選択（"Medium" 相当）
pub const MEDIUM_PRIORITY: &str = "中";

/// ステータス未設定を表す表示ラベル
pub const UNSET_STATUS_LABEL: &str = "ステータス未設定";

/// 優先度セレクタの「未設定」疑似選択肢のラベル
pub const UNSET_PRIORITY_LABEL: &str = "（未設定）";

/// モックが返すスナップショットの保存先
pub const MOCK_SNAPSHOT_LOCATION: &str = "mock://task.xlsx";

/// 位置 ID の wire 名
pub const NO_KEY: &str = "No";

/// Field はタスクレコードの各フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Status,
    MajorCategory,
    MinorCategory,
    Title,
    Assignee,
    Priority,
    DueDate,
    Note,
}

impl Field {
    /// ホスト境界で使うフィールド名
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::Status => "ステータス",
            Field::MajorCategory => "大分類",
            Field::MinorCategory => "中分類",
            Field::Title => "タスク",
            Field::Assignee => "担当者",
            Field::Priority => "優先度",
            Field::DueDate => "期限",
            Field::Note => "備考",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        [
            Field::Status,
            Field::MajorCategory,
            Field::MinorCategory,
            Field::Title,
            Field::Assignee,
            Field::Priority,
            Field::DueDate,
            Field::Note,
        ]
        .into_iter()
        .find(|field| field.wire_name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
