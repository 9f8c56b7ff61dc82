//! 支出の集計
//!
//! 絞り込み後の支出リストから、合計金額とカテゴリ別の合計を計算します。

use crate::features::expenses::models::Expense;
use serde::Serialize;
use std::collections::HashMap;

/// カテゴリが空のレコードを集計する際のラベル
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// カテゴリ別の合計金額
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// 集計結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// 合計金額
    pub total: f64,
    /// カテゴリ別合計（金額の降順。同額の場合はカテゴリ名の昇順）
    pub by_category: Vec<CategoryTotal>,
}

/// 支出リストを集計する
///
/// # 引数
/// * `records` - 集計対象の支出リスト
///
/// # 戻り値
/// 合計金額とカテゴリ別合計
///
/// カテゴリが空（空白のみ）のレコードは `Uncategorized` として集計する。
/// NaNの金額は0として扱う。空リストの集計は合計0・空のカテゴリ別リストになる。
pub fn summarize(records: &[Expense]) -> Summary {
    let mut total = 0.0;
    let mut sums: HashMap<String, f64> = HashMap::new();

    for expense in records {
        let amount = if expense.amount.is_nan() {
            0.0
        } else {
            expense.amount
        };
        total += amount;

        let trimmed = expense.category.trim();
        let label = if trimmed.is_empty() {
            UNCATEGORIZED_LABEL.to_string()
        } else {
            trimmed.to_string()
        };
        *sums.entry(label).or_insert(0.0) += amount;
    }

    let mut by_category: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();

    // 金額の降順、同額の場合はカテゴリ名の昇順
    by_category.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    Summary { total, by_category }
}
