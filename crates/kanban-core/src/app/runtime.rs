//! RuntimeBinding - ホスト API とモックの切り替え
//!
//! # 学習ポイント
//! - trait object（`Arc<dyn TaskApi>`）による実装の注入
//! - コールバック失敗を境界で止める（ログのみ）
//! - push 通知を単一コンシューマのチャネルに流す
//!
//! # フロー
//! 1. ドキュメント準備完了: ホスト API があればそれを、無ければモックをバインド
//! 2. ホスト準備完了: ホスト API をバインド（準備イベント 1 回につき 1 回だけ差し替え）
//! 3. バインドのたびに listener の on_api_changed → on_init(force = true)

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::payload::{PushPayload, StatePayload, decode_state_payload};
use crate::config::BoardConfig;
use crate::domain::KanbanError;
use crate::impls::MockTaskApi;
use crate::ports::{SystemClock, TaskApi};

/// どの実装がバインドされているか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Mock,
    Host,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Mock => f.write_str("mock"),
            RunMode::Host => f.write_str("host"),
        }
    }
}

/// listener に渡すバインド情報
#[derive(Clone)]
pub struct ApiContext {
    pub api: Arc<dyn TaskApi>,
    pub run_mode: RunMode,
    pub force: bool,
}

/// RuntimeListener はバインドの通知を受ける
///
/// どちらのコールバックの失敗もログに残るだけで、準備検知の流れは止めない。
#[async_trait]
pub trait RuntimeListener: Send + Sync {
    fn on_api_changed(&self, _context: &ApiContext) -> Result<(), KanbanError> {
        Ok(())
    }

    async fn on_init(&self, context: ApiContext) -> Result<(), KanbanError>;
}

/// モックを生成するファクトリ
pub type MockFactory = Box<dyn Fn() -> Arc<dyn TaskApi> + Send + Sync>;

/// 環境からの準備シグナル
pub enum ReadinessEvent {
    /// ドキュメント準備完了（その時点でホスト API があれば Some）
    DocumentReady(Option<Arc<dyn TaskApi>>),
    /// ホスト API の準備完了
    HostReady(Arc<dyn TaskApi>),
}

struct BindingState {
    api: Option<Arc<dyn TaskApi>>,
    run_mode: RunMode,
}

/// RuntimeBuilder は RuntimeBinding を構築
///
/// # 使用例
/// ```ignore
/// let binding = RuntimeBuilder::new()
///     .config(config)
///     .listener(Arc::new(MyListener))
///     .build();
/// binding.document_ready(None).await;
/// ```
pub struct RuntimeBuilder {
    config: BoardConfig,
    listener: Option<Arc<dyn RuntimeListener>>,
    mock_factory: Option<MockFactory>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: BoardConfig::default(),
            listener: None,
            mock_factory: None,
        }
    }

    /// 既定のモックファクトリが使う設定
    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn listener(mut self, listener: Arc<dyn RuntimeListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn mock_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn TaskApi> + Send + Sync + 'static,
    {
        self.mock_factory = Some(Box::new(factory));
        self
    }

    pub fn build(self) -> RuntimeBinding {
        let mock_factory = self.mock_factory.unwrap_or_else(|| {
            let config = self.config;
            let factory: MockFactory = Box::new(move || -> Arc<dyn TaskApi> {
                Arc::new(MockTaskApi::new(&config, &SystemClock))
            });
            factory
        });
        RuntimeBinding {
            state: Mutex::new(BindingState {
                api: None,
                run_mode: RunMode::Mock,
            }),
            listener: self.listener,
            mock_factory,
            updates: Mutex::new(None),
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// RuntimeBinding は現在の API 実装を保持する
pub struct RuntimeBinding {
    state: Mutex<BindingState>,
    listener: Option<Arc<dyn RuntimeListener>>,
    mock_factory: MockFactory,
    updates: Mutex<Option<mpsc::UnboundedSender<StatePayload>>>,
}

impl RuntimeBinding {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub async fn api(&self) -> Option<Arc<dyn TaskApi>> {
        self.state.lock().await.api.clone()
    }

    /// バインド済みの API（未バインドなら `KanbanError::Unavailable`）
    pub async fn require_api(&self) -> Result<Arc<dyn TaskApi>, KanbanError> {
        self.api().await.ok_or(KanbanError::Unavailable)
    }

    pub async fn run_mode(&self) -> RunMode {
        self.state.lock().await.run_mode
    }

    /// ドキュメント準備完了
    ///
    /// 返り値は on_init の完了を待つためのハンドル（listener が無ければ None）。
    pub async fn document_ready(&self, host: Option<Arc<dyn TaskApi>>) -> Option<JoinHandle<()>> {
        match host {
            Some(api) => self.bind(api, RunMode::Host).await,
            None => {
                let mock = (self.mock_factory)();
                self.bind(mock, RunMode::Mock).await
            }
        }
    }

    /// ホスト API の準備完了
    pub async fn host_ready(&self, host: Arc<dyn TaskApi>) -> Option<JoinHandle<()>> {
        self.bind(host, RunMode::Host).await
    }

    /// チャネルが閉じるまで準備イベントを処理する
    pub async fn drive(&self, mut events: mpsc::Receiver<ReadinessEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                ReadinessEvent::DocumentReady(host) => self.document_ready(host).await,
                ReadinessEvent::HostReady(host) => self.host_ready(host).await,
            };
        }
        debug!("readiness channel closed");
    }

    async fn bind(&self, api: Arc<dyn TaskApi>, run_mode: RunMode) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.lock().await;
            state.api = Some(Arc::clone(&api));
            state.run_mode = run_mode;
        }
        info!(%run_mode, "task API bound");

        let listener = Arc::clone(self.listener.as_ref()?);
        let context = ApiContext {
            api,
            run_mode,
            force: true,
        };
        match panic::catch_unwind(AssertUnwindSafe(|| listener.on_api_changed(&context))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!(error = %err, "on_api_changed callback failed"),
            Err(_) => error!("on_api_changed callback panicked"),
        }

        let init = tokio::spawn(async move { listener.on_init(context).await });
        Some(tokio::spawn(async move {
            match init.await {
                Ok(Ok(())) => debug!("initialization finished"),
                Ok(Err(err)) => error!(error = %err, "initialization failed"),
                Err(join_err) => error!(error = %join_err, "initialization panicked"),
            }
        }))
    }

    /// push 通知の受け口を登録する
    ///
    /// 再登録すると以前の受け口は置き換えられる（単一コンシューマ）。
    pub async fn subscribe_updates(&self) -> mpsc::UnboundedReceiver<StatePayload> {
        let (sender, receiver) = mpsc::unbounded_channel();
        *self.updates.lock().await = Some(sender);
        receiver
    }

    /// ホストからの push 通知を受け取り、デコードして流す
    ///
    /// 受け口が無い・閉じている場合は捨てて false。
    pub async fn receive_update(&self, payload: impl Into<PushPayload>) -> bool {
        let decoded = decode_state_payload(payload.into());
        let updates = self.updates.lock().await;
        let Some(sender) = updates.as_ref() else {
            debug!("no update subscriber; dropping pushed payload");
            return false;
        };
        if sender.send(decoded).is_err() {
            debug!("update subscriber is gone; dropping pushed payload");
            return false;
        }
        true
    }
}
