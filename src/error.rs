//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// excel2mdクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、Markdownへの変換、ファイル出力の各段階で
/// 発生するすべてのエラーを統一的に扱います。
///
/// # エラーの種類
///
/// - `FileNotFound`: 入力パスが既存ファイルを指していない
/// - `Read`: スプレッドシートの解析に失敗した（calamine由来、原因をラップ）
/// - `SheetNotFound`: 指定されたシートがワークブックに存在しない
/// - `Write`: 出力先への書き込みに失敗した
/// - `Validation`: 操作の前提条件を満たしていない（シート未選択など）
/// - `Config`: ビルダー設定の検証に失敗した
///
/// # 使用例
///
/// ```rust,no_run
/// use excel2md::{ConverterBuilder, Excel2MdError};
///
/// let converter = ConverterBuilder::new().build().unwrap();
/// match converter.convert_path("missing.xlsx") {
///     Err(Excel2MdError::FileNotFound(path)) => {
///         eprintln!("not found: {}", path.display());
///     }
///     Err(e) => eprintln!("{}", e),
///     Ok(markdown) => println!("{}", markdown),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Excel2MdError {
    /// 入力パスが存在しない、またはファイルではない
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// 破損したファイル、未対応の形式、読み込み中のI/Oエラーなどが原因となります。
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    /// 指定された名前のシートが見つからない
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// 出力ファイルの書き込みに失敗したエラー
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        /// 書き込み先のパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: io::Error,
    },

    /// 操作の前提条件を満たしていない
    ///
    /// 入力ファイル未選択、出力先未指定、シート未選択など。
    #[error("Validation error: {0}")]
    Validation(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時、またはシートインデックスが範囲外の場合に発生します。
    ///
    /// ```rust,no_run
    /// use excel2md::{ConverterBuilder, DateFormat, Excel2MdError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom(String::new()))
    ///     .build();
    ///
    /// if let Err(Excel2MdError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力サイズ上限などのセキュリティ制限に違反した
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// ストリーム出力中のI/Oエラー
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
