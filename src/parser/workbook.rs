//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作（シート一覧、シート選択、
//! データセット構築）を提供します。

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::Excel2MdError;
use crate::formatter::CellFormatter;
use crate::security::SecurityConfig;
use crate::types::{CellValue, SheetMap, TabularDataset};

/// ワークブックパーサー
///
/// xlsx / xlsm / xlsb / xls / ods をバイト列から自動判別して開きます。
pub(crate) struct WorkbookParser<RS: Read + Seek + Clone> {
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// ファイルパスからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Err(Excel2MdError::FileNotFound)` - パスが既存ファイルを指していない場合
    /// * `Err(Excel2MdError::Read)` - 読み込み・解析に失敗した場合
    pub fn open_path(path: &Path, security: &SecurityConfig) -> Result<Self, Excel2MdError> {
        if !path.is_file() {
            return Err(Excel2MdError::FileNotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "opening workbook");
        let file = File::open(path).map_err(calamine::Error::Io)?;
        Self::open_reader(file, security)
    }

    /// 任意のリーダーからワークブックを開く
    ///
    /// 入力全体をメモリに読み込みます（入力サイズ上限を適用）。
    pub fn open_reader<R: Read>(reader: R, security: &SecurityConfig) -> Result<Self, Excel2MdError> {
        let buffer = security.read_limited(reader)?;
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(WorkbookParser { workbook })
    }
}

impl<RS: Read + Seek + Clone> WorkbookParser<RS> {
    /// すべてのシート名をワークブックの定義順で取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト
    /// * `Err(Excel2MdError::SheetNotFound)` - 指定名のシートが存在しない場合
    /// * `Err(Excel2MdError::Config)` - インデックスが範囲外の場合
    /// * `Err(Excel2MdError::Validation)` - 名前リストが空の場合
    pub fn select_sheets(&self, selector: &SheetSelector) -> Result<Vec<String>, Excel2MdError> {
        let all_sheet_names = self.sheet_names();

        let by_index = |index: usize| -> Result<String, Excel2MdError> {
            all_sheet_names.get(index).cloned().ok_or_else(|| {
                Excel2MdError::Config(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    all_sheet_names.len()
                ))
            })
        };

        let by_name = |name: &String| -> Result<String, Excel2MdError> {
            if all_sheet_names.contains(name) {
                Ok(name.clone())
            } else {
                Err(Excel2MdError::SheetNotFound(name.clone()))
            }
        };

        match selector {
            SheetSelector::All => Ok(all_sheet_names.clone()),
            SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
            SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
            SheetSelector::Indices(indices) => indices.iter().map(|&i| by_index(i)).collect(),
            SheetSelector::Names(names) => {
                if names.is_empty() {
                    return Err(Excel2MdError::Validation(
                        "Select at least one sheet".to_string(),
                    ));
                }
                names.iter().map(by_name).collect()
            }
        }
    }

    /// 選択されたシートをすべて読み込む
    pub fn load(
        &mut self,
        selector: &SheetSelector,
        formatter: &CellFormatter,
    ) -> Result<SheetMap, Excel2MdError> {
        let sheet_names = self.select_sheets(selector)?;

        let mut sheets = SheetMap::with_capacity(sheet_names.len());
        for name in sheet_names {
            let dataset = self.load_sheet(&name, formatter)?;
            sheets.insert(name, dataset);
        }

        Ok(sheets)
    }

    /// 1つのシートを読み込み、データセットを構築
    pub fn load_sheet(
        &mut self,
        sheet_name: &str,
        formatter: &CellFormatter,
    ) -> Result<TabularDataset, Excel2MdError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let dataset = dataset_from_range(&range, formatter);

        debug!(
            sheet = sheet_name,
            columns = dataset.column_count(),
            rows = dataset.row_count(),
            "loaded sheet"
        );

        Ok(dataset)
    }
}

/// 使用範囲の先頭行をヘッダー、残りをデータ行としてデータセットを構築
///
/// 空のヘッダーセルは`Unnamed: <列番号>`（0始まり）になります（空白のみのセルはそのまま）。
fn dataset_from_range(range: &Range<Data>, formatter: &CellFormatter) -> TabularDataset {
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let name = formatter.format_cell(&convert_cell(cell));
                if name.is_empty() {
                    format!("Unnamed: {}", idx)
                } else {
                    name
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let data_rows = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    TabularDataset::new(columns, data_rows)
}

/// calamineのセルデータを`CellValue`に変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                match cell.as_duration() {
                    Some(duration) => CellValue::Text(format_duration(duration)),
                    None => CellValue::Float(dt.as_f64()),
                }
            } else {
                // 1900年/1904年エポックの差はcalamineが吸収する
                match cell.as_datetime() {
                    Some(value) => CellValue::DateTime(value),
                    None => CellValue::Float(dt.as_f64()),
                }
            }
        }
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// ODSなどのISO 8601文字列を日時として解釈
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// 経過時間を`H:MM:SS`形式に変換
fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
