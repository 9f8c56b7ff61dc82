//! 支出リストの絞り込み
//!
//! 保存済みの支出リストに対し、期間ウィンドウとカテゴリによる
//! 絞り込みをメモリ上で行います。入力リストは変更せず、
//! 相対順序を保った新しいリストを返します。どんな入力でもエラーにはならず、
//! 解釈できない日付は「一致しない」として扱います。

use crate::features::expenses::models::Expense;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Asia::Tokyo;
use serde::{Deserialize, Serialize};

/// 絞り込みの期間指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// 期間による絞り込みなし
    #[default]
    All,
    /// 今週（直近の日曜日から7日間、半開区間）
    Week,
    /// 今月（月初から翌月初まで、半開区間）
    Month,
}

/// ビュー層が所有する絞り込み状態
///
/// 描画のたびにこの状態を純粋関数に渡して絞り込みを行う。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub period: Period,
    pub category: Option<String>,
}

impl FilterState {
    /// 現在の状態で支出リストを絞り込む
    ///
    /// 「今日」はJSTの暦日として評価する。
    pub fn apply(&self, records: &[Expense]) -> Vec<Expense> {
        filter_expenses(records, self.period, self.category.as_deref(), today_jst())
    }
}

/// JSTでの今日の暦日を取得する
pub fn today_jst() -> NaiveDate {
    Utc::now().with_timezone(&Tokyo).date_naive()
}

/// 支出リストを期間とカテゴリで絞り込む
///
/// # 引数
/// * `records` - 支出リスト
/// * `period` - 期間指定
/// * `category` - カテゴリ指定（Noneなら絞り込みなし。前後の空白を無視した完全一致）
/// * `today` - 基準となる「今日」の暦日
///
/// # 戻り値
/// 条件に一致する支出の新しいリスト（入力の相対順序を維持）
///
/// 日付が未設定または正規形として解釈できないレコードは、
/// `Week`/`Month`では一致せず、`All`では含まれる。
pub fn filter_expenses(
    records: &[Expense],
    period: Period,
    category: Option<&str>,
    today: NaiveDate,
) -> Vec<Expense> {
    let window = period_window(period, today);

    records
        .iter()
        .filter(|expense| match &window {
            None => true,
            Some((start, end)) => record_date(expense)
                .map(|date| date >= *start && date < *end)
                .unwrap_or(false),
        })
        .filter(|expense| match category {
            None => true,
            Some(selected) => expense.category.trim() == selected.trim(),
        })
        .cloned()
        .collect()
}

/// 期間指定に対応する半開区間 [開始, 終了) を計算する
///
/// `All`はNone（絞り込みなし）。
fn period_window(period: Period, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match period {
        Period::All => None,
        Period::Week => {
            // 週の開始は直近の日曜日（日曜日=0）
            let offset = today.weekday().num_days_from_sunday() as i64;
            let start = today - Duration::days(offset);
            Some((start, start + Duration::days(7)))
        }
        Period::Month => {
            // 月初と翌月初の計算は常に成功する
            let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
            let end = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
            };
            Some((start, end))
        }
    }
}

/// レコードの日付を暦日として解釈する
///
/// 正規形（YYYY-MM-DD）として解釈できない場合はNone。
fn record_date(expense: &Expense) -> Option<NaiveDate> {
    let date = expense.date.as_deref()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
