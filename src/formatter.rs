//! Formatter Module
//!
//! セル値を表示文字列に変換するモジュール。
//! ヘッダーとデータ行で共通の改行正規化もここで提供します。

use std::borrow::Cow;
use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

use crate::api::DateFormat;
use crate::error::Excel2MdError;
use crate::types::CellValue;

/// セル内の改行の置換先
pub(crate) const LINE_BREAK: &str = "<br>";

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Clone)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { format: date_format },
            number_formatter: NumberFormatter,
        }
    }

    /// セル値を表示文字列に変換
    ///
    /// 空セルは空文字列になり、"null"や"nan"のような表記は出力しません。
    /// 改行はここでは正規化しません（[`normalize_newlines`]を参照）。
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => self.number_formatter.format(*f),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            CellValue::DateTime(dt) => self.date_formatter.format(dt),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new(DateFormat::Iso8601)
    }
}

/// 日付フォーマッター
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    format: DateFormat,
}

impl DateFormatter {
    /// 日時をフォーマット
    ///
    /// `Iso8601`では、深夜0時ちょうどでも時刻まで出力します（`2020-01-15 00:00:00`）。
    pub fn format(&self, value: &NaiveDateTime) -> String {
        match &self.format {
            DateFormat::Iso8601 => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            DateFormat::Custom(format_str) => value.format(format_str).to_string(),
        }
    }
}

/// カスタム日付形式を検証
///
/// 空文字列、またはchronoが解釈できない指定子を含む場合はエラー。
/// 検証済みの形式であれば`format()`はパニックしません。
pub(crate) fn validate_date_format(format_str: &str) -> Result<(), Excel2MdError> {
    if format_str.is_empty() {
        return Err(Excel2MdError::Config(
            "Invalid date format string: ''".to_string(),
        ));
    }

    if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
        return Err(Excel2MdError::Config(format!(
            "Invalid date format string: '{}'",
            format_str
        )));
    }

    // タイムゾーン指定子などはNaiveDateTimeに対して書式化できない
    let sample = NaiveDateTime::default();
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format_str)).is_err() {
        return Err(Excel2MdError::Config(format!(
            "Invalid date format string: '{}'",
            format_str
        )));
    }

    Ok(())
}

/// 数値フォーマッター
#[derive(Debug, Clone)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 整数値に収まる数値は小数点なしで出力する上限
    const INTEGRAL_LIMIT: f64 = 1e15;

    /// 数値をフォーマット
    ///
    /// 整数値（例: `100.0`）は`100`、それ以外は最短表現（例: `5.5`）。
    pub fn format(&self, value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < Self::INTEGRAL_LIMIT {
            format!("{}", value as i64)
        } else {
            value.to_string()
        }
    }
}

/// セル内の改行を`<br>`に置換
///
/// `\r\n`と`\n`は`<br>`に置換し、単独の`\r`は削除します。
/// 改行を含まない場合は割り当てを行いません。
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.replace("\r\n", LINE_BREAK)
            .replace('\n', LINE_BREAK)
            .replace('\r', ""),
    )
}
