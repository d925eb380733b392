//! Config - ボード設定（JSON）
//!
//! ファイル内の各フィールドは省略可能です。
//! 省略されたフィールドは組み込みの既定値になります。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DEFAULT_STATUSES, MOCK_SNAPSHOT_LOCATION, PRIORITY_DEFAULT_OPTIONS};
use crate::normalize::dedupe_values;

const SAMPLE_MAJOR_CATEGORIES: [&str; 3] = ["プロジェクトA", "プロジェクトB", "プロジェクトC"];
const SAMPLE_MINOR_CATEGORIES: [&str; 4] = ["企画", "設計", "実装", "検証"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// 初期ステータス（先頭が空ステータスのフォールバック）
    pub default_statuses: Vec<String>,

    pub priority_defaults: Vec<String>,

    pub major_categories: Vec<String>,

    pub minor_categories: Vec<String>,

    /// 構築時にサンプルタスクを投入するか
    pub seed_sample_data: bool,

    pub snapshot_location: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_statuses: owned(&DEFAULT_STATUSES),
            priority_defaults: owned(&PRIORITY_DEFAULT_OPTIONS),
            major_categories: owned(&SAMPLE_MAJOR_CATEGORIES),
            minor_categories: owned(&SAMPLE_MINOR_CATEGORIES),
            seed_sample_data: true,
            snapshot_location: MOCK_SNAPSHOT_LOCATION.to_string(),
        }
    }
}

impl BoardConfig {
    /// サンプル無しの空ストア用
    pub fn unseeded() -> Self {
        Self {
            seed_sample_data: false,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// クレンジング済みの初期ステータス（空にならない）
    pub fn statuses(&self) -> Vec<String> {
        non_empty_or(&self.default_statuses, &DEFAULT_STATUSES)
    }

    /// クレンジング済みの優先度既定値（空にならない）
    pub fn priorities(&self) -> Vec<String> {
        non_empty_or(&self.priority_defaults, &PRIORITY_DEFAULT_OPTIONS)
    }

    pub fn majors(&self) -> Vec<String> {
        dedupe_values(&self.major_categories)
    }

    pub fn minors(&self) -> Vec<String> {
        dedupe_values(&self.minor_categories)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn non_empty_or(values: &[String], builtin: &[&str]) -> Vec<String> {
    let cleaned = dedupe_values(values);
    if cleaned.is_empty() {
        return owned(builtin);
    }
    cleaned
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
