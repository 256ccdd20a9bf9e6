//! Security Module
//!
//! 入力サイズの上限を適用するモジュール。
//! ワークブック全体をメモリに読み込むため、読み込み中に上限を確認します。

use std::io::Read;

use crate::error::Excel2MdError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 上限を守りながら入力を最後まで読み込む
    ///
    /// 上限+1バイトまでしか読まないため、巨大な入力でもメモリを使い切りません。
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, Excel2MdError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(calamine::Error::Io)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(Excel2MdError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}
