//! TaskNo - 位置 ID（1 始まりの表示順番号）
//!
//! 保存された安定キーではなく、読み出し時点の並び順から毎回導出されます。
//! サイズ N のストアで有効な番号は `1..=N` のみです。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNo(u64);

impl TaskNo {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// 0 始まりの位置から番号を作る
    pub fn from_index(index: usize) -> Self {
        Self(u64::try_from(index).map_or(u64::MAX, |i| i.saturating_add(1)))
    }

    /// 長さ `len` の並びにおける 0 始まりの位置へ解決する
    ///
    /// 範囲外（0 や len 超え）は `None`。
    pub fn index_in(self, len: usize) -> Option<usize> {
        let index = usize::try_from(self.0.checked_sub(1)?).ok()?;
        (index < len).then_some(index)
    }

    /// ホストから届いた生の値を番号として解釈する
    ///
    /// 小数部を持たない数値、またはトリム後にそう読める文字列のみ受け付ける。
    /// 端数・負数・非数値・null・真偽値は `None`。
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().and_then(integral_u64))
                .map(Self),
            Value::String(text) => Self::parse(text),
            _ => None,
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<u64>()
            .ok()
            .or_else(|| text.parse::<f64>().ok().and_then(integral_u64))
            .map(Self)
    }
}

fn integral_u64(value: f64) -> Option<u64> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value as u64)
}

impl From<u64> for TaskNo {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
