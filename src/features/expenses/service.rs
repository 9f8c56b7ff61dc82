//! 支出の書き込み境界
//!
//! 画面からの生入力をバリデーション・正規化してから永続化します。
//! バリデーションに失敗した操作は一切書き込みを行わずエラーを返し、
//! ビュー層は入力中の内容を保持したままユーザーに修正を促します。

use crate::features::expenses::models::{CreateExpenseDto, Expense, ExpenseDraft, UpdateExpenseDto};
use crate::features::expenses::repository;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::dates::normalize_date;
use rusqlite::Connection;

/// 金額の上限（10桁）
const MAX_AMOUNT: f64 = 9_999_999_999.0;

/// 支出を追加する
///
/// # 引数
/// * `conn` - データベース接続
/// * `dto` - 支出作成用DTO（生入力）
///
/// # 戻り値
/// 作成された支出、または失敗時はエラー
pub fn add_expense(conn: &Connection, dto: CreateExpenseDto) -> AppResult<Expense> {
    let amount = validate_amount(dto.amount)?;
    let category = sanitize_category(&dto.category)?;
    let note = sanitize_note(dto.note);
    // 日付の正規化失敗は「日付なし」であり、追加操作を妨げない
    let date = dto.date.as_deref().and_then(normalize_date);

    repository::create(
        conn,
        &ExpenseDraft {
            amount,
            category,
            note,
            date,
        },
    )
}

/// 支出を編集する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - 支出ID
/// * `dto` - 支出更新用DTO（Noneのフィールドは既存の値を維持）
///
/// # 戻り値
/// 更新された支出、または失敗時はエラー
///
/// 指定されたフィールドには追加時と同じバリデーション・正規化を適用する。
pub fn edit_expense(conn: &Connection, id: i64, dto: UpdateExpenseDto) -> AppResult<Expense> {
    let existing = repository::find_by_id(conn, id)?;

    let amount = match dto.amount {
        Some(amount) => validate_amount(amount)?,
        None => existing.amount,
    };
    let category = match dto.category {
        Some(category) => sanitize_category(&category)?,
        None => existing.category,
    };
    let note = match dto.note {
        Some(note) => sanitize_note(Some(note)),
        None => existing.note,
    };
    let date = match dto.date.as_deref() {
        // 空文字の指定は日付のクリアになる
        Some(raw) => normalize_date(raw),
        None => existing.date,
    };

    repository::update(
        conn,
        id,
        &ExpenseDraft {
            amount,
            category,
            note,
            date,
        },
    )
}

/// 支出を削除する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - 支出ID
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn remove_expense(conn: &Connection, id: i64) -> AppResult<()> {
    repository::delete(conn, id)
}

/// 支出一覧を取得する（新しい順）
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 支出のリスト、または失敗時はエラー
pub fn list_expenses(conn: &Connection) -> AppResult<Vec<Expense>> {
    repository::find_all(conn)
}

/// 金額をバリデーションする
///
/// 正の数値かつ10桁以内でなければエラー。
fn validate_amount(amount: f64) -> AppResult<f64> {
    // NaNもここで弾く
    if !(amount > 0.0) {
        return Err(AppError::validation("金額は正の数値である必要があります"));
    }

    if amount > MAX_AMOUNT {
        return Err(AppError::validation("金額は10桁以内で入力してください"));
    }

    Ok(amount)
}

/// カテゴリをバリデーションし、前後の空白を取り除く
fn sanitize_category(category: &str) -> AppResult<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("カテゴリを入力してください"));
    }

    Ok(trimmed.to_string())
}

/// メモの前後の空白を取り除く（空になった場合はNone）
fn sanitize_note(note: Option<String>) -> Option<String> {
    let trimmed = note?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
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

    fn count_rows(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .unwrap()
    }

    fn create_dto(amount: f64, category: &str, date: Option<&str>) -> CreateExpenseDto {
        CreateExpenseDto {
            amount,
            category: category.to_string(),
            note: None,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_add_expense_normalizes_input() {
        let conn = create_test_db();

        let expense = add_expense(
            &conn,
            CreateExpenseDto {
                amount: 1200.0,
                category: " 食費 ".to_string(),
                note: Some("  ランチ  ".to_string()),
                // エポック秒はUTCの暦日に正規化される
                date: Some("1709600000".to_string()),
            },
        )
        .unwrap();

        assert_eq!(expense.category, "食費");
        assert_eq!(expense.note, Some("ランチ".to_string()));
        assert_eq!(expense.date, Some("2024-03-05".to_string()));
    }

    #[test]
    fn test_add_expense_rejects_invalid_amount() {
        let conn = create_test_db();

        // 0以下の金額は拒否され、レコードは追加されない
        let result = add_expense(&conn, create_dto(0.0, "食費", None));
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
        assert_eq!(count_rows(&conn), 0);

        let result = add_expense(&conn, create_dto(-100.0, "食費", None));
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
        assert_eq!(count_rows(&conn), 0);

        // 10桁を超える金額も拒否される
        let result = add_expense(&conn, create_dto(10_000_000_000.0, "食費", None));
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
        assert_eq!(count_rows(&conn), 0);
    }

    #[test]
    fn test_add_expense_rejects_blank_category() {
        let conn = create_test_db();

        let result = add_expense(&conn, create_dto(100.0, "", None));
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
        assert_eq!(count_rows(&conn), 0);

        let result = add_expense(&conn, create_dto(100.0, "   ", None));
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
        assert_eq!(count_rows(&conn), 0);
    }

    #[test]
    fn test_add_expense_tolerates_bad_date() {
        let conn = create_test_db();

        // 日付の正規化失敗は追加を妨げず、日付なしで保存される
        let expense = add_expense(&conn, create_dto(100.0, "食費", Some("??????"))).unwrap();
        assert_eq!(expense.date, None);
        assert_eq!(count_rows(&conn), 1);

        // メモは空白のみならNoneになる
        let expense = add_expense(
            &conn,
            CreateExpenseDto {
                amount: 200.0,
                category: "雑費".to_string(),
                note: Some("   ".to_string()),
                date: None,
            },
        )
        .unwrap();
        assert_eq!(expense.note, None);
    }

    #[test]
    fn test_edit_expense_partial_update() {
        let conn = create_test_db();

        let created = add_expense(&conn, create_dto(100.0, "食費", Some("2024-03-05"))).unwrap();

        // 金額だけ更新し、他のフィールドは維持される
        let updated = edit_expense(
            &conn,
            created.id,
            UpdateExpenseDto {
                amount: Some(250.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.amount, 250.0);
        assert_eq!(updated.category, "食費");
        assert_eq!(updated.date, Some("2024-03-05".to_string()));

        // 空文字の指定で日付をクリアできる
        let cleared = edit_expense(
            &conn,
            created.id,
            UpdateExpenseDto {
                date: Some("".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cleared.date, None);
    }

    #[test]
    fn test_edit_expense_validation_leaves_record_unchanged() {
        let conn = create_test_db();

        let created = add_expense(&conn, create_dto(100.0, "食費", None)).unwrap();

        // 不正な金額での更新は拒否され、既存レコードは変わらない
        let result = edit_expense(
            &conn,
            created.id,
            UpdateExpenseDto {
                amount: Some(-1.0),
                ..Default::default()
            },
        );
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

        let unchanged = repository::find_by_id(&conn, created.id).unwrap();
        assert_eq!(unchanged.amount, 100.0);

        // 空白カテゴリでの更新も拒否される
        let result = edit_expense(
            &conn,
            created.id,
            UpdateExpenseDto {
                category: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[test]
    fn test_remove_expense() {
        let conn = create_test_db();

        let created = add_expense(&conn, create_dto(100.0, "食費", None)).unwrap();
        assert_eq!(count_rows(&conn), 1);

        remove_expense(&conn, created.id).unwrap();
        assert_eq!(count_rows(&conn), 0);

        // 既に削除済みのIDはNotFound
        let result = remove_expense(&conn, created.id);
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }
}
