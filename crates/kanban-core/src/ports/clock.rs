//! Clock port - 「今日」の抽象化
//!
//! モックのサンプルデータは今日を基準に期限を振るため、
//! テストでは FixedClock で日付を固定します。

use chrono::{Local, NaiveDate};

/// Clock は現在の日付（ローカル時刻）を提供
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// SystemClock はローカル時刻の今日を返す（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// FixedClock は固定の日付を返す（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), clock.today());
    }
}
