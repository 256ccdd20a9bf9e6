//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::api::{DateFormat, SheetSelector};
use crate::error::Excel2MdError;
use crate::formatter::{validate_date_format, CellFormatter};
use crate::output::{DocumentAssembler, TableRenderer, DEFAULT_EMPTY_NOTICE};
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;
use crate::types::{SheetMap, TabularDataset};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// 列幅を揃えて出力するか
    pub align_columns: bool,

    /// 空テーブルの文言
    pub empty_notice: String,

    /// 入力サイズ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            date_format: DateFormat::Iso8601,
            align_columns: false,
            empty_notice: DEFAULT_EMPTY_NOTICE.to_string(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use excel2md::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), excel2md::Excel2MdError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("产品销售".to_string()))
///     .with_aligned_columns(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - 日付形式: ISO 8601
    /// - 列幅の整列: なし
    /// - 空テーブルの文言: `Empty table`
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付の出力形式を指定する
    ///
    /// ```rust,no_run
    /// use excel2md::{ConverterBuilder, DateFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 列幅を揃えて出力するかを指定する
    ///
    /// `true`の場合、各セルを列の最大表示幅まで空白で埋めます
    /// （全角文字は幅2として計算）。
    pub fn with_aligned_columns(mut self, align: bool) -> Self {
        self.config.align_columns = align;
        self
    }

    /// データ行が0件のシートに出力する文言を指定する
    pub fn with_empty_notice(mut self, notice: impl Into<String>) -> Self {
        self.config.empty_notice = notice.into();
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `Excel2MdError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式文字列
    ///   * 空テーブルの文言が空、または改行を含む
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, Excel2MdError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            validate_date_format(format_str)?;
        }

        // 2. 空テーブル文言の検証（1行でなければならない）
        let notice = &self.config.empty_notice;
        if notice.trim().is_empty() || notice.contains(['\n', '\r']) {
            return Err(Excel2MdError::Config(format!(
                "Empty-table notice must be a single non-empty line: {:?}",
                notice
            )));
        }

        // 3. 入力サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(Excel2MdError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// シートの読み込み、テーブルのレンダリング、文書の組み立てをまとめて提供します。
///
/// # 使用例
///
/// ```rust,no_run
/// use excel2md::{write_markdown, default_output_path, ConverterBuilder};
/// use std::path::Path;
///
/// # fn main() -> Result<(), excel2md::Excel2MdError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = Path::new("example.xlsx");
/// let markdown = converter.convert_path(input)?;
/// write_markdown(&default_output_path(input), &markdown)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター（ヘッダー変換用）
    formatter: CellFormatter,

    /// 文書アセンブラー
    assembler: DocumentAssembler,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        let formatter = CellFormatter::new(config.date_format.clone());
        let renderer = TableRenderer::new(
            formatter.clone(),
            config.align_columns,
            config.empty_notice.clone(),
        );

        Self {
            formatter,
            assembler: DocumentAssembler::new(renderer),
            config,
        }
    }

    /// ワークブックのシート名を定義順で取得
    pub fn sheet_names<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>, Excel2MdError> {
        let parser = WorkbookParser::open_path(path.as_ref(), &self.config.security)?;
        Ok(parser.sheet_names())
    }

    /// 設定されたシート選択方式でシートを読み込む
    pub fn load_sheets<P: AsRef<Path>>(&self, path: P) -> Result<SheetMap, Excel2MdError> {
        self.load_sheets_with(path, &self.config.sheet_selector)
    }

    /// 指定したシート選択方式でシートを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetMap)` - シート名からデータセットへの対応（選択順）
    /// * `Err(Excel2MdError::FileNotFound)` - 入力ファイルが存在しない場合
    /// * `Err(Excel2MdError::Read)` - スプレッドシートの解析に失敗した場合
    /// * `Err(Excel2MdError::SheetNotFound)` - 指定シートが存在しない場合
    pub fn load_sheets_with<P: AsRef<Path>>(
        &self,
        path: P,
        selector: &SheetSelector,
    ) -> Result<SheetMap, Excel2MdError> {
        let mut parser = WorkbookParser::open_path(path.as_ref(), &self.config.security)?;
        parser.load(selector, &self.formatter)
    }

    /// 1つのデータセットをMarkdownテーブルに変換
    ///
    /// I/Oを行わない純粋な変換です。
    pub fn render_table(&self, dataset: &TabularDataset, title: Option<&str>) -> String {
        self.assembler.renderer().render(dataset, title)
    }

    /// 複数シートを見出し付きで連結した文書を生成
    pub fn assemble(&self, sheets: &SheetMap) -> String {
        self.assembler.assemble(sheets)
    }

    /// 名前のない単一データセットの文書を生成
    pub fn assemble_untitled(&self, dataset: &TabularDataset) -> String {
        self.assembler.assemble_untitled(dataset)
    }

    /// ファイルを読み込み、Markdown文書を返す
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<String, Excel2MdError> {
        let sheets = self.load_sheets(path)?;
        Ok(self.assemble(&sheets))
    }

    /// スプレッドシートをMarkdown形式に変換してライターに書き出す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use excel2md::ConverterBuilder;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), excel2md::Excel2MdError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let input = File::open("example.xlsx")?;
    /// converter.convert(input, std::io::stdout())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), Excel2MdError> {
        let document = self.convert_to_string(input)?;

        let mut writer = BufWriter::new(output);
        writer.write_all(document.as_bytes())?;
        writer.flush()?;

        Ok(())
    }

    /// スプレッドシートをMarkdown形式の文字列に変換
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use excel2md::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), excel2md::Excel2MdError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let excel_data: Vec<u8> = std::fs::read("example.xlsx")?;
    /// let markdown = converter.convert_to_string(Cursor::new(excel_data))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, Excel2MdError> {
        let mut parser = WorkbookParser::open_reader(input, &self.config.security)?;
        let sheets = parser.load(&self.config.sheet_selector, &self.formatter)?;
        debug!(sheets = sheets.len(), "workbook loaded from reader");
        Ok(self.assemble(&sheets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.sheet_selector, SheetSelector::All);
        assert_eq!(builder.config.date_format, DateFormat::Iso8601);
        assert!(!builder.config.align_columns);
        assert_eq!(builder.config.empty_notice, DEFAULT_EMPTY_NOTICE);
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_sheet_selector(SheetSelector::Index(1))
            .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
            .with_aligned_columns(true)
            .with_empty_notice("表格为空")
            .with_max_input_size(1024);

        assert_eq!(builder.config.sheet_selector, SheetSelector::Index(1));
        assert!(matches!(
            builder.config.date_format,
            DateFormat::Custom(ref s) if s == "%d/%m/%Y"
        ));
        assert!(builder.config.align_columns);
        assert_eq!(builder.config.empty_notice, "表格为空");
        assert_eq!(builder.config.security.max_input_file_size, 1024);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_with_invalid_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("".to_string()))
            .build();

        match result {
            Err(Excel2MdError::Config(msg)) => assert!(msg.contains("Invalid date format")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_multiline_notice() {
        let result = ConverterBuilder::new().with_empty_notice("a\nb").build();
        assert!(matches!(result, Err(Excel2MdError::Config(_))));

        let result = ConverterBuilder::new().with_empty_notice("   ").build();
        assert!(matches!(result, Err(Excel2MdError::Config(_))));
    }

    #[test]
    fn test_build_with_zero_input_limit() {
        let result = ConverterBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(Excel2MdError::Config(_))));
    }

    #[test]
    fn test_render_table_uses_configured_options() {
        let converter = ConverterBuilder::new()
            .with_empty_notice("表格为空")
            .build()
            .unwrap();

        let empty = TabularDataset::new(vec!["A".to_string()], vec![]);
        assert_eq!(converter.render_table(&empty, Some("S")), "## S\n\n表格为空");

        let ds = TabularDataset::new(vec!["A".to_string()], vec![vec![CellValue::Float(12.0)]]);
        assert_eq!(converter.render_table(&ds, None), "| A |\n| --- |\n| 12 |");
    }

    #[test]
    fn test_load_sheets_missing_file() {
        let converter = ConverterBuilder::new().build().unwrap();
        match converter.load_sheets("definitely/not/here.xlsx") {
            Err(Excel2MdError::FileNotFound(path)) => {
                assert_eq!(path, Path::new("definitely/not/here.xlsx"));
            }
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_to_string_with_invalid_input() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_to_string(std::io::Cursor::new(b"not a workbook".to_vec()));
        assert!(matches!(result, Err(Excel2MdError::Read(_))));
    }
}
