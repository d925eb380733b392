//! TaskApi port - タスクボードの機能セット
//!
//! モック（`impls::MockTaskApi`）とホスト提供の実装が同じ trait を満たし、
//! `app::RuntimeBinding` がどちらかを注入します。
//!
//! # 呼び出しモデル
//! - すべて async（呼び出し側は 1 件ずつ await してから次を発行する）
//! - 失敗は `KanbanError` として返り、握りつぶさない

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    KanbanError, NumberedTask, ReloadSnapshot, TaskNo, TaskPatch, ValidationUpdate,
};
use crate::validation::Validations;

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// 現在の並び順で位置 ID を付けたスナップショット
    async fn list_tasks(&self) -> Result<Vec<NumberedTask>, KanbanError>;

    /// これまでに現れたステータス
    async fn list_statuses(&self) -> Result<Vec<String>, KanbanError>;

    async fn get_validations(&self) -> Result<Validations, KanbanError>;

    /// フィールドごとの選択肢を置き換える（オブジェクト以外は空扱い）
    async fn update_validations(&self, payload: Value) -> Result<ValidationUpdate, KanbanError>;

    /// 末尾に追加。返る位置 ID は追加後の件数
    async fn add_task(&self, payload: TaskPatch) -> Result<NumberedTask, KanbanError>;

    /// 既存レコードに重ねて再正規化し、その場で置き換える
    ///
    /// # Errors
    /// - 位置 ID が範囲外なら `KanbanError::NotFound`
    /// - マージ結果のタイトルが空なら `KanbanError::Validation`
    async fn update_task(&self, no: TaskNo, payload: TaskPatch)
    -> Result<NumberedTask, KanbanError>;

    /// 見つからなければ `Ok(false)`（エラーではない）
    async fn delete_task(&self, no: TaskNo) -> Result<bool, KanbanError>;

    /// `update_task(no, { status })` と同じ
    async fn move_task(&self, no: TaskNo, status: String) -> Result<NumberedTask, KanbanError> {
        self.update_task(no, TaskPatch::status_only(status)).await
    }

    /// 永続化フック。保存先を表す不透明な文字列を返す
    async fn save_snapshot(&self) -> Result<String, KanbanError>;

    /// 再読込フック
    async fn reload_from_snapshot(&self) -> Result<ReloadSnapshot, KanbanError>;
}
