//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;
use indexmap::IndexMap;

/// シート名からデータセットへの対応（ワークブック内の順序を保持）
pub type SheetMap = IndexMap<String, TabularDataset>;

/// セルの値を表す列挙型
///
/// スプレッドシートのセルは型が混在するため、和型として保持し、
/// 表示文字列への変換はレンダリング時に行います。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 整数
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 文字列
    Text(String),

    /// 論理値
    Bool(bool),

    /// 日付・日時
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル（欠損値）
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// 列名と行データからなる表形式データセット
///
/// 列名は重複してもよく、一意である必要はありません。
/// 各行は列と位置で対応し、列数より短い行・長い行も保持できます
/// （出力時に列数へ揃えられます）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularDataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TabularDataset {
    /// 列名と行データからデータセットを生成
    ///
    /// ```rust
    /// use excel2md::{CellValue, TabularDataset};
    ///
    /// let dataset = TabularDataset::new(
    ///     vec!["产品".to_string(), "数量".to_string()],
    ///     vec![vec!["苹果".into(), 100.into()], vec!["橙子".into(), CellValue::Empty]],
    /// );
    /// assert_eq!(dataset.row_count(), 2);
    /// ```
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// 列名のリスト
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 行データのリスト
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// データ行数（ヘッダーを含まない）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// テーブルとして出力すべきデータがないかどうか
    ///
    /// データ行が0件、または列が0件の場合に`true`。
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}
