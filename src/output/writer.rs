//! Output Writer
//!
//! Markdown文書をUTF-8でファイルに書き込みます。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Excel2MdError;

/// 入力パスの拡張子を`.md`に置き換えた既定の出力パス
///
/// ```rust
/// use std::path::Path;
/// use excel2md::default_output_path;
///
/// assert_eq!(default_output_path(Path::new("data/sales.xlsx")), Path::new("data/sales.md"));
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("md")
}

/// Markdown文書をファイルに書き込む
///
/// 親ディレクトリが存在しない場合は作成し、既存のファイルは確認なしで上書きします。
///
/// # 戻り値
///
/// * `Err(Excel2MdError::Write)` - ディレクトリ作成または書き込みに失敗した場合
pub fn write_markdown(path: &Path, content: &str) -> Result<(), Excel2MdError> {
    let write_error = |source| Excel2MdError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    fs::write(path, content.as_bytes()).map_err(write_error)?;

    info!(path = %path.display(), bytes = content.len(), "markdown written");
    Ok(())
}
