//! Demo - モックに対する一連のボード操作のデモ
//!
//! ランタイム経由でモックをバインドし、一覧・追加・移動・削除・push を順に流します。

use std::sync::Arc;

use async_trait::async_trait;
use kanban_core::app::{ApiContext, RuntimeBinding, RuntimeListener};
use kanban_core::priority::PriorityHelper;
use kanban_core::{BoardConfig, KanbanError, NumberedTask, TaskNo, TaskPatch};
use serde_json::json;
use tracing::{error, info};

/// listener：バインドされた API で初回の一覧を取る
struct BoardListener;

#[async_trait]
impl RuntimeListener for BoardListener {
    fn on_api_changed(&self, context: &ApiContext) -> Result<(), KanbanError> {
        info!(run_mode = %context.run_mode, "api changed");
        Ok(())
    }

    async fn on_init(&self, context: ApiContext) -> Result<(), KanbanError> {
        let tasks = context.api.list_tasks().await?;
        println!("[init] {} mode, {} tasks loaded", context.run_mode, tasks.len());
        Ok(())
    }
}

pub async fn run(config: BoardConfig) -> Result<(), KanbanError> {
    // (A) ホスト API は無いのでモックがバインドされる
    let binding = RuntimeBinding::builder()
        .config(config)
        .listener(Arc::new(BoardListener))
        .build();
    if let Some(init) = binding.document_ready(None).await {
        if let Err(err) = init.await {
            error!(error = %err, "initialization task did not finish");
        }
    }
    let api = binding.require_api().await?;

    // (B) 一覧（位置 ID は読み出しのたびに振り直される）
    for task in api.list_tasks().await? {
        println!(
            "No.{:<2} [{}] {} ({}, due {})",
            task.no, task.record.status, task.record.title, task.record.priority, task.record.due_date
        );
    }

    // (C) 追加 → 移動 → 削除
    let added = api
        .add_task(TaskPatch::titled("Write report").with_due_date("2024/07/01"))
        .await?;
    println!("added No.{} status={} due={}", added.no, added.record.status, added.record.due_date);

    let moved = api.move_task(added.no, "進行中".to_string()).await?;
    println!("moved No.{} -> {}", moved.no, moved.record.status);

    let deleted = api.delete_task(TaskNo::new(1)).await?;
    let remaining = api.list_tasks().await?;
    println!("{}", describe_delete(deleted, &moved.record.title, &remaining));

    match api.add_task(TaskPatch::titled("   ")).await {
        Ok(task) => println!("unexpectedly added No.{}", task.no),
        Err(err) => println!("rejected blank title: {err}"),
    }

    // (D) 優先度セレクタ
    let validations = api.get_validations().await?;
    let helper = PriorityHelper::new(move || validations.clone());
    let choices = helper.choices(None, true);
    println!(
        "priority options: {:?}, selected: {}",
        choices.values().collect::<Vec<_>>(),
        choices.selected
    );

    // (E) push 通知（壊れた文字列は空ペイロードとして届く）
    let mut updates = binding.subscribe_updates().await;
    binding
        .receive_update(json!({ "statuses": ["未着手", "完了"] }))
        .await;
    binding.receive_update("{not json").await;
    for _ in 0..2 {
        if let Some(payload) = updates.recv().await {
            println!("push: statuses={:?} empty={}", payload.statuses(), payload.is_empty());
        }
    }

    println!("snapshot saved to {}", api.save_snapshot().await?);
    Ok(())
}

/// 削除後に追跡中のタスクがどこへ移ったか（消えたか）を説明する
fn describe_delete(deleted: bool, title: &str, remaining: &[NumberedTask]) -> String {
    match remaining.iter().find(|task| task.record.title == title) {
        Some(task) => format!("deleted No.1: {deleted}; {title} is now No.{}", task.no),
        None => format!("deleted No.1: {deleted}; {title} was removed"),
    }
}
