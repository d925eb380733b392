//! Snapshot - 複合レスポンス（バリデーション更新結果・再読込結果）

use serde::{Deserialize, Serialize};

use super::task::NumberedTask;
use crate::validation::Validations;

/// update_validations の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationUpdate {
    pub ok: bool,
    pub validations: Validations,
    pub statuses: Vec<String>,
}

/// reload_from_snapshot の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadSnapshot {
    pub ok: bool,
    pub tasks: Vec<NumberedTask>,
    pub statuses: Vec<String>,
    pub validations: Validations,
}
