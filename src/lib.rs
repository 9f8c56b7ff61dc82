pub mod features;
pub mod shared;

use log::{info, warn};
use rusqlite::Connection;
use std::sync::Mutex;

pub use shared::errors::{AppError, AppResult};

/// アプリケーション状態（データベース接続を保持）
///
/// ビュー層が所有し、各操作の呼び出し時に接続を貸し出す。
pub struct AppState {
    pub db: Mutex<Connection>,
}

/// アプリケーションを初期化する
///
/// # 戻り値
/// 初期化済みのアプリケーション状態、または失敗時はエラー
///
/// # 処理内容
/// 1. ログシステムを初期化
/// 2. 環境変数を読み込み（.envファイルがある場合）
/// 3. データディレクトリとデータベースを初期化
/// 4. 旧形式の日付データを修復（ベストエフォート）
pub fn initialize() -> AppResult<AppState> {
    shared::config::initialize_logging_system();

    info!("アプリケーション初期化を開始します...");

    // 環境変数を読み込み（.envファイルがある場合）
    shared::config::load_environment_variables();

    // データディレクトリとデータベースファイルパスを決定
    let init_result = shared::config::initialize_application()?;

    // データベース接続を開き、テーブル作成とスキーママイグレーションを実行
    let conn = shared::database::initialize_database(&init_result.database_path)?;

    // 旧形式の日付データをベストエフォートで修復
    let report = features::migrations::repair_legacy_dates(&conn)?;
    if report.failed_count > 0 {
        warn!(
            "修復できない日付データが{}件あります（詳細はレポートを参照）",
            report.failed_count
        );
    }

    shared::config::log_initialization_complete(&init_result);

    Ok(AppState {
        db: Mutex::new(conn),
    })
}
