/// マイグレーション機能モジュール
///
/// このモジュールは既存データの修復処理を提供します：
/// - 旧バージョンが保存した非正規形の日付データを正規形（YYYY-MM-DD）に書き換える
///
/// 修復はベストエフォートで行い、個々の行の失敗は記録した上で処理を継続します。
// サブモジュールの宣言
pub mod models;
pub mod service;

pub use models::{DateRepairReport, RowRepairFailure};
pub use service::repair_legacy_dates;
