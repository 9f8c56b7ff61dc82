use crate::features::expenses::models::{Expense, ExpenseDraft};
use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;
use chrono_tz::Asia::Tokyo;
use rusqlite::{params, Connection, Row};

/// 行をExpenseにマッピングする
fn map_expense_row(row: &Row) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        note: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// 支出を作成する
///
/// # 引数
/// * `conn` - データベース接続
/// * `draft` - 検証・正規化済みの書き込み内容
///
/// # 戻り値
/// 作成された支出、または失敗時はエラー
pub fn create(conn: &Connection, draft: &ExpenseDraft) -> AppResult<Expense> {
    // JSTで現在時刻を取得
    let now = Utc::now().with_timezone(&Tokyo).to_rfc3339();

    conn.execute(
        "INSERT INTO expenses (amount, category, note, date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![draft.amount, draft.category, draft.note, draft.date, now, now],
    )?;

    let id = conn.last_insert_rowid();
    find_by_id(conn, id)
}

/// IDで支出を取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - 支出ID
///
/// # 戻り値
/// 支出、または失敗時はエラー
pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Expense> {
    conn.query_row(
        "SELECT id, amount, category, note, date, created_at, updated_at
         FROM expenses WHERE id = ?1",
        params![id],
        map_expense_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AppError::not_found("支出"),
        _ => AppError::Database(e),
    })
}

/// 支出一覧を取得する
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// ID降順（新しい順）の支出リスト、または失敗時はエラー
///
/// 期間・カテゴリによる絞り込みは保存後のリストに対して
/// メモリ上で行うため、ここではフィルタしない。
pub fn find_all(conn: &Connection) -> AppResult<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, category, note, date, created_at, updated_at
         FROM expenses ORDER BY id DESC",
    )?;

    let expenses = stmt.query_map([], map_expense_row)?;

    expenses
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Database)
}

/// 支出を更新する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - 支出ID
/// * `draft` - 検証・正規化済みの書き込み内容
///
/// # 戻り値
/// 更新された支出、または失敗時はエラー
pub fn update(conn: &Connection, id: i64, draft: &ExpenseDraft) -> AppResult<Expense> {
    // JSTで現在時刻を取得
    let now = Utc::now().with_timezone(&Tokyo).to_rfc3339();

    let affected_rows = conn.execute(
        "UPDATE expenses SET amount = ?1, category = ?2, note = ?3, date = ?4, updated_at = ?5
         WHERE id = ?6",
        params![draft.amount, draft.category, draft.note, draft.date, now, id],
    )?;

    if affected_rows == 0 {
        return Err(AppError::not_found("支出"));
    }

    find_by_id(conn, id)
}

/// 支出を削除する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - 支出ID
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    let affected_rows = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;

    if affected_rows == 0 {
        return Err(AppError::not_found("支出"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::create_tables;
    use rusqlite::Connection;

    fn create_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn draft(amount: f64, category: &str, date: Option<&str>) -> ExpenseDraft {
        ExpenseDraft {
            amount,
            category: category.to_string(),
            note: None,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_expense_crud_operations() {
        let conn = create_test_db();

        // 支出作成のテスト
        let expense = create(
            &conn,
            &ExpenseDraft {
                amount: 1000.0,
                category: "食費".to_string(),
                note: Some("テスト支出".to_string()),
                date: Some("2024-01-01".to_string()),
            },
        )
        .unwrap();
        assert_eq!(expense.amount, 1000.0);
        assert_eq!(expense.category, "食費");
        assert_eq!(expense.note, Some("テスト支出".to_string()));
        assert_eq!(expense.date, Some("2024-01-01".to_string()));

        // 支出取得のテスト
        let retrieved = find_by_id(&conn, expense.id).unwrap();
        assert_eq!(retrieved.id, expense.id);
        assert_eq!(retrieved.amount, 1000.0);

        // 支出更新のテスト
        let updated = update(
            &conn,
            expense.id,
            &ExpenseDraft {
                amount: 1500.0,
                category: "書籍".to_string(),
                note: None,
                date: None,
            },
        )
        .unwrap();
        assert_eq!(updated.amount, 1500.0);
        assert_eq!(updated.category, "書籍");
        assert_eq!(updated.note, None);
        assert_eq!(updated.date, None);

        // 作成日時は維持され、更新日時のみ変わる余地があることを確認
        assert_eq!(updated.created_at, expense.created_at);

        // 支出削除のテスト
        delete(&conn, expense.id).unwrap();
        assert!(find_by_id(&conn, expense.id).is_err());
    }

    #[test]
    fn test_find_all_returns_newest_first() {
        let conn = create_test_db();

        let first = create(&conn, &draft(100.0, "食費", Some("2024-01-01"))).unwrap();
        let second = create(&conn, &draft(200.0, "交通費", None)).unwrap();
        let third = create(&conn, &draft(300.0, "書籍", Some("2024-02-01"))).unwrap();

        // ID降順（新しい順）で返ることを確認
        let all = find_all(&conn).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, third.id);
        assert_eq!(all[1].id, second.id);
        assert_eq!(all[2].id, first.id);
    }

    #[test]
    fn test_date_can_be_absent() {
        let conn = create_test_db();

        // 日付なしでも作成できることを確認
        let expense = create(&conn, &draft(500.0, "雑費", None)).unwrap();
        assert_eq!(expense.date, None);

        let retrieved = find_by_id(&conn, expense.id).unwrap();
        assert_eq!(retrieved.date, None);
    }

    #[test]
    fn test_not_found_errors() {
        let conn = create_test_db();

        // 存在しない支出の取得テスト
        let result = find_by_id(&conn, 999);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));

        // 存在しない支出の更新テスト
        let result = update(&conn, 999, &draft(100.0, "食費", None));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));

        // 存在しない支出の削除テスト
        let result = delete(&conn, 999);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }
}
