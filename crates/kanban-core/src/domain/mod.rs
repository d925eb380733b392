//! Domain - ドメインモデル
//!
//! タスクレコード、位置 ID、フィールド名、エラーを定義します。

pub mod errors;
pub mod fields;
pub mod snapshot;
pub mod task;
pub mod task_no;
pub mod value;

pub use self::errors::{KanbanError, KanbanResult};
pub use self::fields::{
    DEFAULT_STATUSES, Field, MEDIUM_PRIORITY, MOCK_SNAPSHOT_LOCATION, NO_KEY,
    PRIORITY_DEFAULT_OPTIONS, UNSET_PRIORITY_LABEL, UNSET_STATUS_LABEL,
};
pub use self::snapshot::{ReloadSnapshot, ValidationUpdate};
pub use self::task::{HostTask, NumberedTask, TaskPatch, TaskRecord};
pub use self::task_no::TaskNo;
pub use self::value::text_of;
