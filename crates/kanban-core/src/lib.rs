//! kanban-core
//!
//! Client-side data and runtime-binding layer for a kanban task board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TaskRecord, TaskPatch, TaskNo, フィールド名, エラー）
//! - **normalize**: 入力値の正規化とホスト由来データのサニタイズ
//! - **validation**: フィールドごとの選択肢（ValidationRegistry）と StatusSet
//! - **priority**: 優先度セレクタの選択肢と既定選択
//! - **ports**: 抽象化レイヤー（TaskApi, Clock）
//! - **impls**: 実装（MockTaskApi）
//! - **app**: ホストとのつなぎ込み（RuntimeBinding, bridge, push payload）
//! - **config**: ボード設定（JSON）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod normalize;
pub mod ports;
pub mod priority;
pub mod validation;

pub use config::{BoardConfig, ConfigError};
pub use domain::{HostTask, KanbanError, KanbanResult, NumberedTask, TaskNo, TaskPatch, TaskRecord};
pub use impls::MockTaskApi;
pub use ports::TaskApi;
