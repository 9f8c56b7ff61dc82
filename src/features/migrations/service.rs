//! 旧形式の日付データ修復
//!
//! 旧バージョンの画面は日付入力をそのまま保存していたため、
//! エポック値やスラッシュ区切りなど非正規形の値が残っていることがある。
//! 起動時に保存済みの値を正規形（YYYY-MM-DD）へベストエフォートで書き換える。

use crate::features::migrations::models::{DateRepairReport, RowRepairFailure};
use crate::shared::errors::AppResult;
use crate::shared::utils::dates::{is_canonical_date, normalize_date};
use log::{info, warn};
use rusqlite::{params, Connection};
use std::time::Instant;

/// 保存済みの日付データをベストエフォートで正規形に修復する
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 修復結果レポート、または走査自体に失敗した場合はエラー
///
/// # 処理内容
/// 日付が設定されている全行を走査し、非正規形の値を正規化して書き戻す。
/// 正規化できない値やSQLエラーは行単位の失敗としてレポートに記録し、
/// 残りの行の処理は継続する。修復できなかった行は元の値のまま残す。
pub fn repair_legacy_dates(conn: &Connection) -> AppResult<DateRepairReport> {
    let start_time = Instant::now();

    // 日付が設定されている行をすべて取得
    let mut stmt = conn.prepare("SELECT id, date FROM expenses WHERE date IS NOT NULL")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let total_rows = rows.len();
    let mut already_canonical = 0;
    let mut rewritten_count = 0;
    let mut failures: Vec<RowRepairFailure> = Vec::new();

    info!("日付データの修復を開始します: 走査対象={}行", total_rows);

    for (id, raw) in rows {
        if is_canonical_date(&raw) {
            already_canonical += 1;
            continue;
        }

        match normalize_date(&raw) {
            Some(canonical) => {
                match conn.execute(
                    "UPDATE expenses SET date = ?1 WHERE id = ?2",
                    params![canonical, id],
                ) {
                    Ok(_) => {
                        rewritten_count += 1;
                        info!("日付を修復しました: id={}, 「{}」->「{}」", id, raw, canonical);
                    }
                    Err(e) => {
                        // 書き込み失敗も行単位の失敗として記録し、処理は続行する
                        warn!("日付の書き換えに失敗しました: id={}, {}", id, e);
                        failures.push(RowRepairFailure {
                            id,
                            raw,
                            reason: format!("書き換えに失敗: {e}"),
                        });
                    }
                }
            }
            None => {
                // 修復できない値は元のまま残し、レポートに記録する
                warn!("修復できない日付データ: id={}, 「{}」", id, raw);
                failures.push(RowRepairFailure {
                    id,
                    raw,
                    reason: "正規形に変換できない形式".to_string(),
                });
            }
        }
    }

    let report = DateRepairReport {
        total_rows,
        already_canonical,
        rewritten_count,
        failed_count: failures.len(),
        failures,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    info!("日付データの修復が完了しました: {}", report.log_metadata());

    Ok(report)
}
