//! Audio Storage Port - 出站端口
//!
//! 定义本地音频输出目录的抽象接口

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 输出目录
    fn output_dir(&self) -> &Path;

    /// 获取音频文件路径
    fn get_audio_path(&self, file_name: &str) -> PathBuf {
        self.output_dir().join(file_name)
    }

    /// 保存音频数据，已存在的文件会被覆盖
    async fn save_audio(&self, file_name: &str, data: &[u8])
        -> Result<PathBuf, AudioStorageError>;
}
