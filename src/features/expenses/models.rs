use serde::{Deserialize, Serialize};

/// 支出データモデル
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    /// 正規形（YYYY-MM-DD）の日付。正規化に失敗した場合や未入力の場合はNone
    pub date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 支出作成用DTO（画面からの生入力）
#[derive(Debug, Deserialize)]
pub struct CreateExpenseDto {
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    /// 自由形式の日付入力。保存前に正規化される
    pub date: Option<String>,
}

/// 支出更新用DTO
///
/// Noneのフィールドは既存の値を維持する。
#[derive(Debug, Deserialize, Default)]
pub struct UpdateExpenseDto {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
}

/// 検証・正規化済みの書き込み内容
///
/// サービス層でバリデーションを通過した値のみがここに入る。
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub date: Option<String>,
}
