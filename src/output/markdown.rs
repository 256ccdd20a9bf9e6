//! Markdown Table Renderer
//!
//! 1つのデータセットをMarkdownのパイプテーブルに変換します。
//! I/Oを行わない純粋な変換で、同じ入力からは常に同じ文字列を返します。

use unicode_width::UnicodeWidthStr;

use crate::formatter::{normalize_newlines, CellFormatter};
use crate::types::TabularDataset;

/// データ行が0件のときに出力する既定の文言
pub const DEFAULT_EMPTY_NOTICE: &str = "Empty table";

/// 区切り行と整列時の最小列幅
const MIN_COLUMN_WIDTH: usize = 3;

/// テーブルレンダラー
#[derive(Debug, Clone)]
pub(crate) struct TableRenderer {
    /// セルフォーマッター
    formatter: CellFormatter,

    /// 列幅を揃えて出力するか
    align_columns: bool,

    /// 空テーブルの文言
    empty_notice: String,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(CellFormatter::default(), false, DEFAULT_EMPTY_NOTICE.to_string())
    }
}

impl TableRenderer {
    pub fn new(formatter: CellFormatter, align_columns: bool, empty_notice: String) -> Self {
        Self {
            formatter,
            align_columns,
            empty_notice,
        }
    }

    /// データセットをMarkdownに変換
    ///
    /// # 出力形式
    ///
    /// ```markdown
    /// ## <title>
    ///
    /// | 列1 | 列2 |
    /// | --- | --- |
    /// | 値1 | 値2 |
    /// ```
    ///
    /// * タイトルが空または`None`の場合、見出しと空行は出力しません
    /// * データ行が0件の場合、テーブルの代わりに空テーブルの文言を出力します
    /// * 列数より短い行は空文字列で補い、長い行は列数で切り詰めます
    /// * `|`はエスケープしません
    pub fn render(&self, dataset: &TabularDataset, title: Option<&str>) -> String {
        let mut lines = Vec::with_capacity(dataset.row_count() + 4);

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            lines.push(format!("## {}", title));
            lines.push(String::new());
        }

        if dataset.is_empty() {
            lines.push(self.empty_notice.clone());
            return lines.join("\n");
        }

        let column_count = dataset.column_count();

        let header: Vec<String> = dataset
            .columns()
            .iter()
            .map(|name| normalize_newlines(name).into_owned())
            .collect();

        let body: Vec<Vec<String>> = dataset
            .rows()
            .iter()
            .map(|row| {
                (0..column_count)
                    .map(|col| match row.get(col) {
                        Some(value) if !value.is_empty() => {
                            normalize_newlines(&self.formatter.format_cell(value)).into_owned()
                        }
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect();

        let widths = if self.align_columns {
            Some(column_widths(&header, &body))
        } else {
            None
        };

        lines.push(table_line(&header, widths.as_deref()));
        lines.push(separator_line(column_count, widths.as_deref()));
        for row in &body {
            lines.push(table_line(row, widths.as_deref()));
        }

        lines.join("\n")
    }
}

/// 各列の最大表示幅を計算（全角文字は幅2）
fn column_widths(header: &[String], body: &[Vec<String>]) -> Vec<usize> {
    let mut widths = vec![MIN_COLUMN_WIDTH; header.len()];

    for row in std::iter::once(header).chain(body.iter().map(Vec::as_slice)) {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    widths
}

/// `| a | b |`形式の1行を生成
fn table_line(cells: &[String], widths: Option<&[usize]>) -> String {
    let cells: Vec<String> = match widths {
        Some(widths) => cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| {
                let padding = width.saturating_sub(cell.width());
                format!("{}{}", cell, " ".repeat(padding))
            })
            .collect(),
        None => cells.to_vec(),
    };

    format!("| {} |", cells.join(" | "))
}

/// `| --- | --- |`形式の区切り行を生成
fn separator_line(column_count: usize, widths: Option<&[usize]>) -> String {
    let tokens: Vec<String> = match widths {
        Some(widths) => widths.iter().map(|&w| "-".repeat(w)).collect(),
        None => vec!["-".repeat(MIN_COLUMN_WIDTH); column_count],
    };

    format!("| {} |", tokens.join(" | "))
}
