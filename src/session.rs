//! Conversion Session
//!
//! 変換ウィンドウが保持する状態（入力ファイル、シート選択、出力先、プレビュー、
//! ステータス）と、各ボタンに対応する同期的な操作を提供します。

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::builder::{ConversionConfig, Converter};
use crate::error::Excel2MdError;
use crate::output::{default_output_path, write_markdown};

/// セッションのステータス表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// 初期状態
    Ready,

    /// ファイルを読み込んだ
    Loaded { file: String, sheets: usize },

    /// シート一覧の読み込みに失敗した
    LoadFailed,

    /// プレビューを生成した
    PreviewReady(usize),

    /// プレビューの生成に失敗した
    PreviewFailed,

    /// ファイルに保存した
    Saved(PathBuf),

    /// 変換に失敗した
    ConversionFailed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Ready => write!(f, "Ready"),
            SessionStatus::Loaded { file, sheets } => {
                write!(f, "Loaded {} ({} sheets)", file, sheets)
            }
            SessionStatus::LoadFailed => write!(f, "Failed to load sheets"),
            SessionStatus::PreviewReady(count) => write!(f, "Preview ready ({} sheets)", count),
            SessionStatus::PreviewFailed => write!(f, "Preview failed"),
            SessionStatus::Saved(path) => write!(f, "Saved to {}", path.display()),
            SessionStatus::ConversionFailed => write!(f, "Conversion failed"),
        }
    }
}

/// 変換セッション
///
/// # 使用例
///
/// ```rust,no_run
/// use excel2md::ConversionSession;
///
/// # fn main() -> Result<(), excel2md::Excel2MdError> {
/// let mut session = ConversionSession::default();
/// session.open_file("sales.xlsx")?;
/// session.set_selected("员工信息", false)?;
/// session.preview()?;
/// let saved = session.convert_and_save()?;
/// println!("{}", session.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConversionSession {
    converter: Converter,
    input_path: Option<PathBuf>,
    /// シート名と選択状態（ワークブックの定義順）
    sheets: Vec<(String, bool)>,
    output_path: Option<PathBuf>,
    preview: String,
    status: SessionStatus,
}

impl Default for ConversionSession {
    fn default() -> Self {
        Self::new(Converter::new(ConversionConfig::default()))
    }
}

impl ConversionSession {
    /// 指定したコンバーターを使うセッションを作成
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            input_path: None,
            sheets: Vec::new(),
            output_path: None,
            preview: String::new(),
            status: SessionStatus::Ready,
        }
    }

    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// 読み込んだすべてのシート名
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 選択中のシート名（ワークブックの定義順）
    pub fn selected_sheets(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.sheets.iter().any(|(n, selected)| n == name && *selected)
    }

    /// 最後に生成したプレビュー
    pub fn preview_text(&self) -> &str {
        &self.preview
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// スプレッドシートを開き、シート一覧を読み込む
    ///
    /// 成功するとすべてのシートが選択され、出力先は入力と同じ場所の`.md`になります。
    /// 失敗した場合は以前の状態を保持します。
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Excel2MdError> {
        let path = path.as_ref();

        let names = match self.converter.sheet_names(path) {
            Ok(names) => names,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load sheet names");
                self.status = SessionStatus::LoadFailed;
                return Err(e);
            }
        };

        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.status = SessionStatus::Loaded {
            file,
            sheets: names.len(),
        };
        self.sheets = names.into_iter().map(|name| (name, true)).collect();
        self.output_path = Some(default_output_path(path));
        self.input_path = Some(path.to_path_buf());
        self.preview.clear();

        Ok(())
    }

    pub fn select_all(&mut self) {
        self.sheets.iter_mut().for_each(|(_, selected)| *selected = true);
    }

    pub fn clear_selection(&mut self) {
        self.sheets.iter_mut().for_each(|(_, selected)| *selected = false);
    }

    /// 1つのシートの選択状態を変更
    pub fn set_selected(&mut self, name: &str, selected: bool) -> Result<(), Excel2MdError> {
        let entry = self
            .sheets
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| Excel2MdError::SheetNotFound(name.to_string()))?;
        entry.1 = selected;
        Ok(())
    }

    pub fn set_output_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.output_path = Some(path.into());
    }

    /// 選択中のシートを変換し、プレビューとして保持する
    pub fn preview(&mut self) -> Result<&str, Excel2MdError> {
        match self.render_selection() {
            Ok((document, count)) => {
                self.preview = document;
                self.status = SessionStatus::PreviewReady(count);
                Ok(&self.preview)
            }
            Err(e) => {
                warn!(error = %e, "preview failed");
                self.status = SessionStatus::PreviewFailed;
                Err(e)
            }
        }
    }

    /// 選択中のシートを変換し、出力先に保存する
    ///
    /// 既存のファイルは確認なしで上書きします。
    pub fn convert_and_save(&mut self) -> Result<PathBuf, Excel2MdError> {
        match self.save() {
            Ok(path) => {
                self.status = SessionStatus::Saved(path.clone());
                Ok(path)
            }
            Err(e) => {
                warn!(error = %e, "conversion failed");
                self.status = SessionStatus::ConversionFailed;
                Err(e)
            }
        }
    }

    fn save(&self) -> Result<PathBuf, Excel2MdError> {
        self.require_input()?;
        let output = self
            .output_path
            .clone()
            .ok_or_else(|| Excel2MdError::Validation("No output path selected".to_string()))?;

        let (document, _) = self.render_selection()?;
        write_markdown(&output, &document)?;
        Ok(output)
    }

    fn require_input(&self) -> Result<&Path, Excel2MdError> {
        self.input_path
            .as_deref()
            .ok_or_else(|| Excel2MdError::Validation("No input file selected".to_string()))
    }

    fn render_selection(&self) -> Result<(String, usize), Excel2MdError> {
        let input = self.require_input()?;

        let selected: Vec<String> = self
            .selected_sheets()
            .into_iter()
            .map(str::to_string)
            .collect();
        if selected.is_empty() {
            return Err(Excel2MdError::Validation(
                "Select at least one sheet".to_string(),
            ));
        }

        debug!(sheets = selected.len(), "rendering selection");
        let count = selected.len();
        let sheets = self
            .converter
            .load_sheets_with(input, &SheetSelector::Names(selected))?;

        Ok((self.converter.assemble(&sheets), count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn create_workbook() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sales.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("产品销售").unwrap();
        sheet.write_string(0, 0, "产品").unwrap();
        sheet.write_string(0, 1, "数量").unwrap();
        sheet.write_string(1, 0, "苹果").unwrap();
        sheet.write_number(1, 1, 100).unwrap();

        let sheet = workbook.add_worksheet();
        sheet.set_name("员工信息").unwrap();
        sheet.write_string(0, 0, "姓名").unwrap();
        sheet.write_string(1, 0, "张三").unwrap();

        workbook.save(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(SessionStatus::Ready.to_string(), "Ready");
        assert_eq!(
            SessionStatus::Loaded {
                file: "a.xlsx".to_string(),
                sheets: 2
            }
            .to_string(),
            "Loaded a.xlsx (2 sheets)"
        );
        assert_eq!(SessionStatus::LoadFailed.to_string(), "Failed to load sheets");
        assert_eq!(SessionStatus::PreviewReady(1).to_string(), "Preview ready (1 sheets)");
        assert_eq!(SessionStatus::PreviewFailed.to_string(), "Preview failed");
        assert_eq!(
            SessionStatus::Saved(PathBuf::from("out.md")).to_string(),
            "Saved to out.md"
        );
        assert_eq!(SessionStatus::ConversionFailed.to_string(), "Conversion failed");
    }

    #[test]
    fn test_open_file_selects_all_sheets() {
        let (_dir, path) = create_workbook();
        let mut session = ConversionSession::default();

        session.open_file(&path).unwrap();

        assert_eq!(session.sheet_names(), ["产品销售", "员工信息"]);
        assert_eq!(session.selected_sheets(), ["产品销售", "员工信息"]);
        assert_eq!(session.output_path(), Some(path.with_extension("md").as_path()));
        assert_eq!(session.status().to_string(), "Loaded sales.xlsx (2 sheets)");
    }

    #[test]
    fn test_open_missing_file() {
        let mut session = ConversionSession::default();
        let result = session.open_file("no/such/file.xlsx");

        assert!(matches!(result, Err(Excel2MdError::FileNotFound(_))));
        assert_eq!(session.status(), &SessionStatus::LoadFailed);
        assert!(session.input_path().is_none());
    }

    #[test]
    fn test_selection_changes() {
        let (_dir, path) = create_workbook();
        let mut session = ConversionSession::default();
        session.open_file(&path).unwrap();

        session.clear_selection();
        assert!(session.selected_sheets().is_empty());

        session.set_selected("员工信息", true).unwrap();
        assert_eq!(session.selected_sheets(), ["员工信息"]);
        assert!(!session.is_selected("产品销售"));

        session.select_all();
        assert_eq!(session.selected_sheets().len(), 2);

        assert!(matches!(
            session.set_selected("Missing", true),
            Err(Excel2MdError::SheetNotFound(name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_preview_selected_sheets() {
        let (_dir, path) = create_workbook();
        let mut session = ConversionSession::default();
        session.open_file(&path).unwrap();
        session.set_selected("员工信息", false).unwrap();

        let preview = session.preview().unwrap().to_string();

        assert_eq!(preview, "## 产品销售\n\n| 产品 | 数量 |\n| --- | --- |\n| 苹果 | 100 |\n");
        assert_eq!(session.preview_text(), preview);
        assert_eq!(session.status().to_string(), "Preview ready (1 sheets)");
    }

    #[test]
    fn test_preview_without_input() {
        let mut session = ConversionSession::default();
        assert!(matches!(session.preview(), Err(Excel2MdError::Validation(_))));
        assert_eq!(session.status(), &SessionStatus::PreviewFailed);
        assert_eq!(session.status().to_string(), "Preview failed");
    }

    #[test]
    fn test_preview_without_selection() {
        let (_dir, path) = create_workbook();
        let mut session = ConversionSession::default();
        session.open_file(&path).unwrap();
        session.clear_selection();

        assert!(matches!(session.preview(), Err(Excel2MdError::Validation(_))));
        assert_eq!(session.status(), &SessionStatus::PreviewFailed);
    }

    #[test]
    fn test_convert_and_save_overwrites() {
        let (dir, path) = create_workbook();
        let target = dir.path().join("out").join("result.md");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "stale").unwrap();

        let mut session = ConversionSession::default();
        session.open_file(&path).unwrap();
        session.set_output_path(&target);

        let saved = session.convert_and_save().unwrap();

        assert_eq!(saved, target);
        let content = fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("## 产品销售"));
        assert!(content.contains("\n---\n"));
        assert!(content.ends_with("| 张三 |\n"));
        assert_eq!(session.status(), &SessionStatus::Saved(target));
    }

    #[test]
    fn test_convert_and_save_validation_order() {
        let mut session = ConversionSession::default();
        session.set_output_path("out.md");
        match session.convert_and_save() {
            Err(Excel2MdError::Validation(msg)) => assert!(msg.contains("input")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert_eq!(session.status().to_string(), "Conversion failed");

        let (_dir, path) = create_workbook();
        let mut session = ConversionSession::default();
        session.open_file(&path).unwrap();
        session.clear_selection();
        match session.convert_and_save() {
            Err(Excel2MdError::Validation(msg)) => assert!(msg.contains("sheet")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
