use crate::shared::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

/// データベース接続を初期化し、テーブル作成とスキーママイグレーションを実行する
///
/// # 引数
/// * `database_path` - データベースファイルのパス
///
/// # 戻り値
/// データベース接続、または失敗時はエラー
///
/// # 処理内容
/// 1. データベース接続を開く（ファイルが存在しない場合は自動作成される）
/// 2. テーブル作成とスキーママイグレーションを実行
pub fn initialize_database(database_path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(database_path)?;

    create_tables(&conn)?;

    log::info!("データベースを初期化しました: {:?}", database_path);

    Ok(conn)
}

/// データベーステーブルを作成する
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    // 既存のテーブル構造をチェック
    let table_exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='expenses'",
        [],
        |row| row.get(0),
    )?;

    if table_exists == 0 {
        // 新規インストール: 最新のスキーマ（date列あり）でテーブルを作成
        create_expenses_table(conn)?;
        log::info!("新規データベースを作成しました");
    } else {
        // 既存インストール: 必要なカラムを安全に追加
        log::info!("既存のデータベースを確認中...");
        migrate_existing_tables(conn)?;
    }

    // インデックスを作成
    create_indexes(conn)?;

    Ok(())
}

/// 支出テーブルを作成する
fn create_expenses_table(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            note TEXT,
            date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// 既存テーブルのスキーママイグレーションを実行する
///
/// 旧バージョンのテーブルにはdate列が存在しないため、
/// 不足している場合はここで追加する。
fn migrate_existing_tables(conn: &Connection) -> AppResult<()> {
    if !column_exists(conn, "expenses", "date") {
        log::info!("date列を追加します...");
        // date列を追加（エラーを無視）
        let _ = conn.execute("ALTER TABLE expenses ADD COLUMN date TEXT", []);
    }

    Ok(())
}

/// インデックスを作成する
fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category)",
        [],
    )?;

    Ok(())
}

/// テーブルに指定されたカラムが存在するかチェックする
///
/// # 引数
/// * `conn` - データベース接続
/// * `table` - テーブル名
/// * `column` - カラム名
///
/// # 戻り値
/// カラムが存在する場合はtrue、存在しないかエラーの場合はfalse
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({table})");

    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(rows) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };

    let found = rows.flatten().any(|name| name == column);
    found
}
