/// 集計・絞り込み機能モジュール
///
/// このモジュールは画面描画のたびに呼ばれる純粋関数群を提供します：
/// - 期間（すべて / 今週 / 今月）とカテゴリによる支出リストの絞り込み
/// - 合計金額とカテゴリ別合計の集計
///
/// I/Oは一切行わず、メモリ上のリストを受け取って新しいリストを返します。
// サブモジュールの宣言
pub mod filter;
pub mod summary;

pub use filter::{filter_expenses, today_jst, FilterState, Period};
pub use summary::{summarize, CategoryTotal, Summary, UNCATEGORIZED_LABEL};
