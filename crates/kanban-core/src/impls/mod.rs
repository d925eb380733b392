//! Impls - ポートの実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **MockTaskApi**: ホスト API が無い環境（ブラウザ単体・テスト）用のインメモリストア
//!
//! 本番のホスト API は外部提供で、`ports::TaskApi` と同じ契約を満たします。

pub mod mock_api;

pub use self::mock_api::MockTaskApi;
