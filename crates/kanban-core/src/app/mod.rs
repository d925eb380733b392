//! App - アプリケーション層
//!
//! ports を組み合わせて、ホスト境界とのつなぎ込みを実装します。
//!
//! # 主要コンポーネント
//! - **RuntimeBinding**: ホスト API とモックの選択、準備検知、push 通知
//! - **bridge**: メソッド名 + 位置引数によるホスト呼び出しのデコードと実行
//! - **payload**: push 通知のデコード

pub mod bridge;
pub mod payload;
pub mod runtime;

pub use self::bridge::{ApiCall, invoke};
pub use self::payload::{PushPayload, StatePayload, decode_state_payload};
pub use self::runtime::{
    ApiContext, MockFactory, ReadinessEvent, RunMode, RuntimeBinding, RuntimeBuilder,
    RuntimeListener,
};
