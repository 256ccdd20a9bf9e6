//! Parser Module
//!
//! calamineを使用したスプレッドシート解析の実装。
//! シートごとに表形式データセットを構築します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
