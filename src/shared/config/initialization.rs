use crate::shared::config::{get_database_filename, get_environment, Environment};
use crate::shared::errors::{AppError, AppResult};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーション初期化の結果を表す構造体
#[derive(Debug)]
pub struct InitializationResult {
    /// 初回起動かどうか
    pub is_first_run: bool,
    /// アプリケーションデータディレクトリのパス
    pub app_data_dir: PathBuf,
    /// データベースファイルのパス
    pub database_path: PathBuf,
    /// 実行環境
    pub environment: Environment,
}

/// アプリケーションの初期化を実行する
///
/// # 戻り値
/// 初期化結果、または失敗時はエラー
///
/// # 処理内容
/// 1. アプリケーションデータディレクトリの作成
/// 2. 環境に応じたデータベースファイルパスの決定
/// 3. 初回起動の判定（データベースファイルの存在で判定）
pub fn initialize_application() -> AppResult<InitializationResult> {
    // 現在の実行環境を取得
    let environment = get_environment();

    // アプリケーションデータディレクトリを取得・作成
    let app_data_dir = resolve_app_data_directory()?;
    ensure_directory(&app_data_dir)?;

    // データベースファイルパスを構築
    let db_filename = get_database_filename(environment.clone());
    let database_path = app_data_dir.join(db_filename);

    // 初回起動かどうかを判定
    let is_first_run = !database_path.exists();

    if is_first_run {
        info!("=== アプリケーション初回起動 ===");
        info!("実行環境: {:?}", environment);
        info!("アプリデータディレクトリ: {:?}", app_data_dir);
        info!("データベースファイル: {:?}", database_path);
    }

    Ok(InitializationResult {
        is_first_run,
        app_data_dir,
        database_path,
        environment,
    })
}

/// アプリケーションデータディレクトリのパスを解決する
///
/// # 戻り値
/// データディレクトリのパス、または失敗時はエラー
fn resolve_app_data_directory() -> AppResult<PathBuf> {
    let base_dir = dirs::data_dir()
        .ok_or_else(|| AppError::configuration("データディレクトリの取得に失敗しました"))?;

    Ok(base_dir.join("kakeibo"))
}

/// ディレクトリを確実に作成する
///
/// # 引数
/// * `path` - 作成するディレクトリのパス
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
fn ensure_directory(path: &Path) -> AppResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            AppError::configuration(format!("データディレクトリの作成に失敗しました: {e}"))
        })?;
        info!("アプリケーションデータディレクトリを作成しました: {:?}", path);
    }

    Ok(())
}

/// 環境変数を読み込む（.envファイルがある場合）
pub fn load_environment_variables() {
    if dotenv::dotenv().is_err() {
        // .envファイルがない場合は無視（本番環境では環境変数が直接設定される）
        warn!(".envファイルが見つかりません。環境変数が直接設定されていることを確認してください。");
    } else {
        info!(".envファイルを読み込みました");
    }
}

/// ログシステムを初期化する
pub fn initialize_logging_system() {
    // ログレベルを環境変数 LOG_LEVEL から決定
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => match get_environment() {
            Environment::Development => log::LevelFilter::Debug,
            Environment::Production => log::LevelFilter::Info,
        },
    };

    // env_loggerを初期化（二重初期化は無視）
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();
}

/// 初期化完了ログを出力する
///
/// # 引数
/// * `result` - 初期化結果
pub fn log_initialization_complete(result: &InitializationResult) {
    if result.is_first_run {
        info!("初回起動の初期化が正常に完了しました");
    } else {
        info!("アプリケーション起動完了（既存データベースを使用）");
    }
    info!("環境: {:?}", result.environment);
    info!("データベース: {:?}", result.database_path);
}
