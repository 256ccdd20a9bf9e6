//! Output Module
//!
//! Markdownテーブルの生成、文書の組み立て、ファイル出力を提供するモジュール。

mod document;
mod markdown;
mod writer;

pub(crate) use document::DocumentAssembler;
pub use markdown::DEFAULT_EMPTY_NOTICE;
pub(crate) use markdown::TableRenderer;
pub use writer::{default_output_path, write_markdown};
