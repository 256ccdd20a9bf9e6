//! Document Assembler
//!
//! 複数シートのテーブルを1つのMarkdown文書に連結します。

use tracing::debug;

use crate::output::markdown::TableRenderer;
use crate::types::{SheetMap, TabularDataset};

/// シート間の区切り（空行2つ、水平線、空行2つ）
pub(crate) const SHEET_SEPARATOR: &str = "\n\n\n---\n\n\n";

/// 文書アセンブラー
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentAssembler {
    renderer: TableRenderer,
}

impl DocumentAssembler {
    pub fn new(renderer: TableRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &TableRenderer {
        &self.renderer
    }

    /// シートごとにシート名を見出しとして出力し、水平線で連結
    ///
    /// 水平線はシートの間にのみ入り、末尾には付きません。
    /// 文書は改行1つで終わります（シートが0件なら空文字列）。
    pub fn assemble(&self, sheets: &SheetMap) -> String {
        let sections: Vec<String> = sheets
            .iter()
            .map(|(name, dataset)| {
                debug!(sheet = name.as_str(), rows = dataset.row_count(), "rendering sheet");
                self.renderer.render(dataset, Some(name.as_str()))
            })
            .collect();

        finish(sections.join(SHEET_SEPARATOR))
    }

    /// 名前のない単一データセットをタイトルなしで出力
    pub fn assemble_untitled(&self, dataset: &TabularDataset) -> String {
        finish(self.renderer.render(dataset, None))
    }
}

fn finish(mut document: String) -> String {
    if !document.is_empty() {
        document.push('\n');
    }
    document
}
