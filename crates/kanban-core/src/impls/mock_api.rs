//! MockTaskApi - ブラウザ単体テスト用のインメモリ・タスクストア
//!
//! # 状態
//! - tasks: 表示順の Vec（この順序が位置 ID の基準）
//! - statuses: StatusSet（縮まない）
//! - registry: ValidationRegistry
//!
//! 位置 ID は呼び出しのたびに並び順から導出し、キャッシュしません。
//! 呼び出し元は 1 つ（1 件ずつ await）という前提で、Mutex はデータ競合を
//! 防ぐためだけにあります。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::BoardConfig;
use crate::domain::{
    Field, KanbanError, NumberedTask, ReloadSnapshot, TaskNo, TaskPatch, TaskRecord,
    ValidationUpdate,
};
use crate::normalize::normalize_task;
use crate::ports::{Clock, SystemClock, TaskApi};
use crate::validation::{StatusSet, ValidationRegistry, Validations};

const SAMPLE_TASK_COUNT: usize = 8;
const SAMPLE_ASSIGNEES: [&str; 4] = ["田中", "佐藤", "鈴木", "高橋"];
const SAMPLE_NOTE: &str = "モックデータ";

/// MockTaskApi の内部状態
struct MockState {
    tasks: Vec<TaskRecord>,
    statuses: StatusSet,
    registry: ValidationRegistry,
}

impl MockState {
    fn numbered(&self) -> Vec<NumberedTask> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(index, record)| NumberedTask::new(record.clone(), TaskNo::from_index(index)))
            .collect()
    }

    fn locate(&self, no: TaskNo) -> Option<usize> {
        no.index_in(self.tasks.len())
    }
}

/// MockTaskApi はホスト API と同じ契約を満たすモック
///
/// # 使用例
/// ```ignore
/// let api = MockTaskApi::new(&BoardConfig::default(), &SystemClock);
/// let added = api.add_task(TaskPatch::titled("Write report")).await?;
/// ```
pub struct MockTaskApi {
    state: Arc<Mutex<MockState>>,
    snapshot_location: String,
}

impl MockTaskApi {
    /// 設定に従って構築（seed_sample_data なら 8 件のサンプルを投入）
    pub fn new(config: &BoardConfig, clock: &dyn Clock) -> Self {
        let mut statuses = StatusSet::new(config.statuses());
        let tasks = if config.seed_sample_data {
            sample_tasks(config, clock.today(), &mut statuses)
        } else {
            Vec::new()
        };

        let mut initial = Validations::new();
        initial.set(Field::Status, statuses.to_vec());
        initial.set(Field::MajorCategory, config.majors());
        initial.set(Field::MinorCategory, config.minors());
        initial.set(Field::Priority, config.priorities());

        Self {
            state: Arc::new(Mutex::new(MockState {
                tasks,
                statuses,
                registry: ValidationRegistry::new(initial, config.priorities()),
            })),
            snapshot_location: config.snapshot_location.clone(),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config, &SystemClock)
    }

    /// サンプル無しの空ストア
    pub fn empty() -> Self {
        Self::new(&BoardConfig::unseeded(), &SystemClock)
    }

    /// 件数（テスト・デモ用）
    pub async fn len(&self) -> usize {
        self.state.lock().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MockTaskApi {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

/// サンプルタスクを組み立てる
///
/// 期限は今日を基準に -2 日から 1 日ずつずらす。
fn sample_tasks(config: &BoardConfig, today: NaiveDate, statuses: &mut StatusSet) -> Vec<TaskRecord> {
    let base = config.statuses();
    let majors = config.majors();
    let minors = config.minors();
    let priorities = config.priorities();
    let pick = |values: &[String], index: usize| {
        if values.is_empty() {
            return String::new();
        }
        values[index % values.len()].clone()
    };

    (0..SAMPLE_TASK_COUNT)
        .map(|index| {
            let status = pick(&base, index);
            statuses.insert(&status);
            let offset = i64::try_from(index).unwrap_or_default() - 2;
            let due_date = today
                .checked_add_signed(Duration::days(offset))
                .map(|due| due.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            TaskRecord {
                status,
                major_category: pick(&majors, index),
                minor_category: pick(&minors, index),
                title: format!("サンプルタスク {}", index + 1),
                assignee: SAMPLE_ASSIGNEES[index % SAMPLE_ASSIGNEES.len()].to_string(),
                priority: pick(&priorities, index),
                due_date,
                note: if index % 2 == 0 { SAMPLE_NOTE.to_string() } else { String::new() },
            }
        })
        .collect()
}

#[async_trait]
impl TaskApi for MockTaskApi {
    async fn list_tasks(&self) -> Result<Vec<NumberedTask>, KanbanError> {
        let state = self.state.lock().await;
        Ok(state.numbered())
    }

    async fn list_statuses(&self) -> Result<Vec<String>, KanbanError> {
        let state = self.state.lock().await;
        Ok(state.statuses.to_vec())
    }

    async fn get_validations(&self) -> Result<Validations, KanbanError> {
        let state = self.state.lock().await;
        Ok(state.registry.snapshot())
    }

    async fn update_validations(&self, payload: Value) -> Result<ValidationUpdate, KanbanError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let validations = state.registry.update(&payload, &mut state.statuses);
        debug!(fields = validations.len(), "validations replaced");
        Ok(ValidationUpdate {
            ok: true,
            validations,
            statuses: state.statuses.to_vec(),
        })
    }

    async fn add_task(&self, payload: TaskPatch) -> Result<NumberedTask, KanbanError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let record = normalize_task(&payload, &mut state.statuses)?;
        state.tasks.push(record.clone());
        let no = TaskNo::from_index(state.tasks.len() - 1);
        debug!(%no, title = %record.title, "task added");
        Ok(NumberedTask::new(record, no))
    }

    async fn update_task(
        &self,
        no: TaskNo,
        payload: TaskPatch,
    ) -> Result<NumberedTask, KanbanError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let index = state.locate(no).ok_or_else(|| KanbanError::not_found(no))?;
        let merged = payload.merged_over(&state.tasks[index]);
        let updated = normalize_task(&merged, &mut state.statuses)?;
        state.tasks[index] = updated.clone();
        debug!(%no, status = %updated.status, "task updated");
        Ok(NumberedTask::new(updated, TaskNo::from_index(index)))
    }

    async fn delete_task(&self, no: TaskNo) -> Result<bool, KanbanError> {
        let mut state = self.state.lock().await;
        let Some(index) = state.locate(no) else {
            debug!(%no, "delete ignored; no such task");
            return Ok(false);
        };
        state.tasks.remove(index);
        debug!(%no, remaining = state.tasks.len(), "task deleted");
        Ok(true)
    }

    async fn save_snapshot(&self) -> Result<String, KanbanError> {
        Ok(self.snapshot_location.clone())
    }

    async fn reload_from_snapshot(&self) -> Result<ReloadSnapshot, KanbanError> {
        let state = self.state.lock().await;
        Ok(ReloadSnapshot {
            ok: true,
            tasks: state.numbered(),
            statuses: state.statuses.to_vec(),
            validations: state.registry.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_STATUSES;
    use crate::ports::FixedClock;
    use rstest::rstest;
    use serde_json::json;

    fn seeded() -> MockTaskApi {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        MockTaskApi::new(&BoardConfig::default(), &FixedClock::new(today))
    }

    #[tokio::test]
    async fn seeded_store_has_sample_tasks() {
        let api = seeded();
        let tasks = api.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 8);
        assert_eq!(tasks[0].no, TaskNo::new(1));
        assert_eq!(tasks[0].record.title, "サンプルタスク 1");
        assert_eq!(tasks[0].record.due_date, "2024-01-08");
        assert_eq!(tasks[0].record.note, "モックデータ");
        assert_eq!(tasks[1].record.note, "");
        assert_eq!(tasks[5].record.status, "進行中");
        assert_eq!(tasks[7].record.due_date, "2024-01-15");
    }

    #[tokio::test]
    async fn seeded_registry_lists_every_field() {
        let validations = seeded().get_validations().await.unwrap();
        assert_eq!(validations.get(Field::Status), DEFAULT_STATUSES);
        assert_eq!(validations.get(Field::MajorCategory).len(), 3);
        assert_eq!(validations.get(Field::MinorCategory).len(), 4);
        assert_eq!(validations.get(Field::Priority), ["高", "中", "低"]);
    }

    #[tokio::test]
    async fn add_task_appends_and_returns_new_length() {
        let api = seeded();
        let added = api.add_task(TaskPatch::titled("追加")).await.unwrap();
        assert_eq!(added.no, TaskNo::new(9));
        assert_eq!(api.len().await, 9);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[tokio::test]
    async fn add_task_rejects_blank_title(#[case] title: &str) {
        let api = MockTaskApi::empty();
        let err = api.add_task(TaskPatch::titled(title)).await.unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
        assert!(api.is_empty().await);
    }

    #[tokio::test]
    async fn update_task_merges_over_existing_record() {
        let api = seeded();
        let before = api.list_tasks().await.unwrap()[2].clone();
        let updated = api
            .update_task(TaskNo::new(3), TaskPatch::default().with_priority("低"))
            .await
            .unwrap();
        assert_eq!(updated.no, TaskNo::new(3));
        assert_eq!(updated.record.priority, "低");
        assert_eq!(updated.record.title, before.record.title);
        assert_eq!(updated.record.due_date, before.record.due_date);
    }

    #[tokio::test]
    async fn update_task_out_of_range_is_not_found() {
        let api = seeded();
        let err = api
            .update_task(TaskNo::new(99), TaskPatch::titled("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_task_cannot_blank_the_title() {
        let api = seeded();
        let err = api
            .update_task(TaskNo::new(1), TaskPatch::titled("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
        let tasks = api.list_tasks().await.unwrap();
        assert_eq!(tasks[0].record.title, "サンプルタスク 1");
    }

    #[tokio::test]
    async fn move_task_with_blank_status_falls_back() {
        let api = seeded();
        let moved = api.move_task(TaskNo::new(2), " ".to_string()).await.unwrap();
        assert_eq!(moved.record.status, "未着手");
    }

    #[tokio::test]
    async fn move_task_registers_new_status() {
        let api = seeded();
        api.move_task(TaskNo::new(1), "レビュー".to_string()).await.unwrap();
        let statuses = api.list_statuses().await.unwrap();
        assert_eq!(statuses.last().map(String::as_str), Some("レビュー"));
    }

    #[tokio::test]
    async fn delete_shifts_following_ids_down() {
        let api = seeded();
        let third = api.list_tasks().await.unwrap()[2].record.clone();
        assert!(api.delete_task(TaskNo::new(2)).await.unwrap());
        let tasks = api.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 7);
        assert_eq!(tasks[1].record, third);
        assert_eq!(tasks[1].no, TaskNo::new(2));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::past_end(9)]
    #[tokio::test]
    async fn delete_out_of_range_returns_false(#[case] raw: u64) {
        let api = seeded();
        let before = api.list_tasks().await.unwrap();
        assert!(!api.delete_task(TaskNo::new(raw)).await.unwrap());
        assert_eq!(api.list_tasks().await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_validations_reports_statuses() {
        let api = seeded();
        let result = api
            .update_validations(json!({ "ステータス": ["完了", "差し戻し"] }))
            .await
            .unwrap();
        assert!(result.ok);
        assert_eq!(result.validations.get(Field::Status), ["完了", "差し戻し"]);
        assert!(result.statuses.contains(&"差し戻し".to_string()));
        assert!(result.statuses.contains(&"未着手".to_string()));
    }

    #[tokio::test]
    async fn snapshot_hooks_do_no_io() {
        let api = seeded();
        assert_eq!(api.save_snapshot().await.unwrap(), "mock://task.xlsx");
        let reloaded = api.reload_from_snapshot().await.unwrap();
        assert!(reloaded.ok);
        assert_eq!(reloaded.tasks, api.list_tasks().await.unwrap());
        assert_eq!(reloaded.validations, api.get_validations().await.unwrap());
    }
}
