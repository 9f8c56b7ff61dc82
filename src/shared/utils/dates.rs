//! 日付入力の正規化ユーティリティ
//!
//! 画面から渡される自由形式の日付入力（ISO形式、エポック秒/ミリ秒の数字列、
//! 一般的な日付文字列）を保存用の正規形 `YYYY-MM-DD` に変換します。
//! 正規化は保存時に一度だけ行い、保存後のデータは正規形のみを前提とします。

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// 正規形の日付（YYYY-MM-DD）にマッチするパターン
static CANONICAL_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// 数字のみの入力（エポック値）にマッチするパターン
static DIGITS_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// 日時として解釈を試みるフォーマット
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// 日付として解釈を試みるフォーマット
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y", "%Y年%m月%d日"];

/// 文字列が正規形の日付（YYYY-MM-DD）かどうかを判定する
///
/// 形状のみのチェックであり、暦として妥当かどうかは検証しない。
pub fn is_canonical_date(value: &str) -> bool {
    CANONICAL_DATE_RE.is_match(value)
}

/// 自由形式の日付入力を正規形 `YYYY-MM-DD` に変換する
///
/// # 引数
/// * `raw` - 画面から渡された日付入力
///
/// # 戻り値
/// 正規形の日付文字列、または正規形を導出できない場合はNone
///
/// # 変換規則
/// 1. 空文字・空白のみ → None（日付なし）
/// 2. 既に正規形 → そのまま返す
/// 3. 数字のみ → エポック値として解釈（ちょうど10桁なら秒、それ以外はミリ秒）
///    し、UTCの暦日に変換
/// 4. それ以外 → 一般的な日付フォーマットで解釈を試み、成功すればUTCの暦日
/// 5. どの解釈も失敗 → None
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_canonical_date(trimmed) {
        return Some(trimmed.to_string());
    }

    if DIGITS_ONLY_RE.is_match(trimmed) {
        return normalize_epoch(trimmed);
    }

    parse_general(trimmed).map(format_canonical)
}

/// 数字のみの入力をエポック値として正規化する
///
/// ちょうど10桁の場合は秒として1000倍し、それ以外はミリ秒として扱う。
/// i64で表現できない桁数や、表現可能な日時範囲を超える値はNoneになる。
fn normalize_epoch(digits: &str) -> Option<String> {
    let value: i64 = digits.parse().ok()?;

    let millis = if digits.len() == 10 {
        value.checked_mul(1000)?
    } else {
        value
    };

    let datetime = Utc.timestamp_millis_opt(millis).single()?;
    Some(format_canonical(datetime.date_naive()))
}

/// 一般的な日付フォーマットでの解釈を試みる
///
/// タイムゾーン付きの日時はUTCに変換した上で暦日を取る。
fn parse_general(input: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc2822(input) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Some(datetime.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(date);
        }
    }

    None
}

/// 暦日を正規形の文字列に整形する
fn format_canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 入力途中の日付をインクリメンタルに整形する
///
/// # 引数
/// * `raw` - 入力欄の現在の内容
///
/// # 戻り値
/// 表示用に整形した文字列
///
/// # 整形規則
/// 数字以外を取り除き、8桁（YYYYMMDD）に切り詰めた上で、
/// 5桁目と7桁目の位置が埋まり次第ハイフンを挿入する
/// （`YYYY` → `YYYY-MM` → `YYYY-MM-DD`）。
/// 表示整形のみであり、暦としての妥当性は検証しない。
pub fn format_typed_date(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(8).collect();

    let mut formatted = String::with_capacity(10);
    for (index, digit) in digits.chars().enumerate() {
        if index == 4 || index == 6 {
            formatted.push('-');
        }
        formatted.push(digit);
    }

    formatted
}
