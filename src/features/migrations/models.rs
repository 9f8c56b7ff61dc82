use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 1行分の日付修復失敗
///
/// どの行がなぜ修復できなかったかを保持する。
/// レポートに集約され、握りつぶされずに呼び出し側へ返る。
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("id={id} の日付「{raw}」を修復できません: {reason}")]
pub struct RowRepairFailure {
    /// 対象行のID
    pub id: i64,
    /// 保存されていた元の値
    pub raw: String,
    /// 失敗理由
    pub reason: String,
}

/// 日付修復の実行結果レポート
#[derive(Debug, Serialize, Deserialize)]
pub struct DateRepairReport {
    /// 日付が設定されている行数（走査対象）
    pub total_rows: usize,
    /// 既に正規形だった行数
    pub already_canonical: usize,
    /// 正規形に書き換えた行数
    pub rewritten_count: usize,
    /// 修復できなかった行数
    pub failed_count: usize,
    /// 失敗の詳細
    pub failures: Vec<RowRepairFailure>,
    /// 実行時間（ミリ秒）
    pub duration_ms: u64,
}

impl DateRepairReport {
    /// すべての行が修復済みまたは正規形かどうか
    pub fn is_clean(&self) -> bool {
        self.failed_count == 0
    }

    /// 構造化ログ用のメタデータを取得
    pub fn log_metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "total_rows": self.total_rows,
            "already_canonical": self.already_canonical,
            "rewritten_count": self.rewritten_count,
            "failed_count": self.failed_count,
            "duration_ms": self.duration_ms,
        })
    }
}
