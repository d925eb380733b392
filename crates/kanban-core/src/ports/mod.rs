//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! タスクボードの機能セット（TaskApi）と時刻（Clock）を trait で切り出し、
//! モックとホスト実装を差し替え可能にします。

pub mod clock;
pub mod task_api;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::task_api::TaskApi;
