/// 支出機能モジュール
///
/// このモジュールは支出レコードの管理に関連する機能を提供します：
/// - 支出の作成、読み取り、更新、削除（CRUD操作）
/// - 書き込み前のバリデーションと日付正規化
// サブモジュールの宣言
pub mod models;
pub mod repository;
pub mod service;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{CreateExpenseDto, Expense, ExpenseDraft, UpdateExpenseDto};

// サービス（書き込み境界）
pub use service::{add_expense, edit_expense, list_expenses, remove_expense};
