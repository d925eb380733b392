//! Bridge - ホストからの呼び出しのデコードと実行
//!
//! ホストはメソッド名と位置引数（JSON）で操作を呼び出します。
//! 例: `{"method":"update_task","args":[3,{"ステータス":"完了"}]}`
//!
//! 位置 ID はここでは型が付いていません。解釈できない ID は範囲外と同じ扱いです。

use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use crate::domain::{KanbanError, TaskNo, TaskPatch, text_of};
use crate::ports::TaskApi;

#[derive(Debug, Deserialize)]
struct RawCall {
    method: String,
    #[serde(default)]
    args: Vec<Value>,
}

/// デコード済みのホスト呼び出し
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetTasks,
    GetStatuses,
    GetValidations,
    UpdateValidations(Value),
    AddTask(TaskPatch),
    UpdateTask(Value, TaskPatch),
    DeleteTask(Value),
    MoveTask(Value, String),
    SaveExcel,
    ReloadFromExcel,
}

impl ApiCall {
    pub fn method(&self) -> &'static str {
        match self {
            ApiCall::GetTasks => "get_tasks",
            ApiCall::GetStatuses => "get_statuses",
            ApiCall::GetValidations => "get_validations",
            ApiCall::UpdateValidations(_) => "update_validations",
            ApiCall::AddTask(_) => "add_task",
            ApiCall::UpdateTask(..) => "update_task",
            ApiCall::DeleteTask(_) => "delete_task",
            ApiCall::MoveTask(..) => "move_task",
            ApiCall::SaveExcel => "save_excel",
            ApiCall::ReloadFromExcel => "reload_from_excel",
        }
    }

    pub fn from_value(value: Value) -> Result<Self, KanbanError> {
        let raw: RawCall = serde_json::from_value(value)
            .map_err(|err| KanbanError::InvalidCall(err.to_string()))?;
        let arg = |index: usize| raw.args.get(index).cloned().unwrap_or(Value::Null);

        let call = match raw.method.as_str() {
            "get_tasks" => ApiCall::GetTasks,
            "get_statuses" => ApiCall::GetStatuses,
            "get_validations" => ApiCall::GetValidations,
            "update_validations" => ApiCall::UpdateValidations(arg(0)),
            "add_task" => ApiCall::AddTask(patch_arg(arg(0))?),
            "update_task" => ApiCall::UpdateTask(arg(0), patch_arg(arg(1))?),
            "delete_task" => ApiCall::DeleteTask(arg(0)),
            "move_task" => ApiCall::MoveTask(arg(0), text_of(&arg(1))),
            "save_excel" => ApiCall::SaveExcel,
            "reload_from_excel" => ApiCall::ReloadFromExcel,
            other => return Err(KanbanError::InvalidCall(format!("unknown method: {other}"))),
        };
        Ok(call)
    }
}

impl FromStr for ApiCall {
    type Err = KanbanError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| KanbanError::InvalidCall(err.to_string()))?;
        Self::from_value(value)
    }
}

/// 引数が無い・オブジェクトでない場合は空の部分更新として扱う
fn patch_arg(value: Value) -> Result<TaskPatch, KanbanError> {
    if !value.is_object() {
        return Ok(TaskPatch::default());
    }
    serde_json::from_value(value).map_err(|err| KanbanError::InvalidCall(err.to_string()))
}

fn resolve(raw: &Value) -> Result<TaskNo, KanbanError> {
    TaskNo::from_value(raw).ok_or_else(|| KanbanError::not_found(text_of(raw)))
}

/// 呼び出しを実行し、結果を JSON で返す
pub async fn invoke(api: &dyn TaskApi, call: ApiCall) -> Result<Value, KanbanError> {
    let result = match call {
        ApiCall::GetTasks => serde_json::to_value(api.list_tasks().await?)?,
        ApiCall::GetStatuses => serde_json::to_value(api.list_statuses().await?)?,
        ApiCall::GetValidations => serde_json::to_value(api.get_validations().await?)?,
        ApiCall::UpdateValidations(payload) => {
            serde_json::to_value(api.update_validations(payload).await?)?
        }
        ApiCall::AddTask(patch) => serde_json::to_value(api.add_task(patch).await?)?,
        ApiCall::UpdateTask(no, patch) => {
            serde_json::to_value(api.update_task(resolve(&no)?, patch).await?)?
        }
        ApiCall::DeleteTask(no) => match TaskNo::from_value(&no) {
            Some(no) => Value::Bool(api.delete_task(no).await?),
            None => Value::Bool(false),
        },
        ApiCall::MoveTask(no, status) => {
            serde_json::to_value(api.move_task(resolve(&no)?, status).await?)?
        }
        ApiCall::SaveExcel => Value::String(api.save_snapshot().await?),
        ApiCall::ReloadFromExcel => serde_json::to_value(api.reload_from_snapshot().await?)?,
    };
    Ok(result)
}
