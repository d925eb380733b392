//! Errors - タスクボードのエラー型
//!
//! すべての操作は `Result<T, KanbanError>` を返します。
//! 呼び出し側には人が読めるメッセージとして表面化します。

use thiserror::Error;

/// KanbanError はタスクボード操作のエラー
///
/// # 分類
/// - Validation: 正規化で弾かれた入力（タイトル必須など）
/// - NotFound: 位置 ID が解決できない（update/move のみ。delete は false を返す）
/// - InvalidCall: ホスト呼び出しの形式不正
/// - Unavailable: API がまだバインドされていない
/// - Listener: コールバックの失敗（ログのみで伝播しない）
#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("task not found: No={0}")]
    NotFound(String),

    #[error("invalid host call: {0}")]
    InvalidCall(String),

    #[error("no task API is bound yet")]
    Unavailable,

    #[error("listener failed: {0}")]
    Listener(String),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl KanbanError {
    pub fn title_required() -> Self {
        Self::Validation("title required".to_string())
    }

    pub fn not_found(no: impl ToString) -> Self {
        Self::NotFound(no.to_string())
    }
}

pub type KanbanResult<T> = Result<T, KanbanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            KanbanError::title_required().to_string(),
            "validation failed: title required"
        );
        assert_eq!(KanbanError::not_found(9).to_string(), "task not found: No=9");
    }
}
