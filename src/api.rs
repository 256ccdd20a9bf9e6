//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付の出力形式
///
/// 日付セルをMarkdownに変換する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式
    ///
    /// 常に時刻まで`2025-11-20 13:45:00`のように出力します
    /// （0時0分0秒でも`2025-11-20 00:00:00`）。
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use excel2md::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), excel2md::Excel2MdError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// シート選択方式
///
/// 変換対象のシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// すべてのシートをワークブックの定義順に変換（デフォルト）
    All,

    /// インデックス指定（0始まり）
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("产品销售".to_string())`
    Name(String),

    /// 複数のインデックス指定
    Indices(Vec<usize>),

    /// 複数のシート名指定（指定順で出力）
    Names(Vec<String>),
}

impl SheetSelector {
    /// `-s/--sheet`のような任意指定の名前から選択方式を作る
    pub fn from_optional_name(name: Option<String>) -> Self {
        match name {
            Some(name) => SheetSelector::Name(name),
            None => SheetSelector::All,
        }
    }
}
