//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioStorageError, AudioStoragePort};

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 输出目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储，目录不存在时自动创建
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }
}

/// 只接受单层文件名，拒绝路径穿越
fn validate_file_name(file_name: &str) -> Result<(), AudioStorageError> {
    let path = Path::new(file_name);
    let single_component = path.components().count() == 1
        && path.file_name().map_or(false, |name| name == path.as_os_str());
    if file_name.is_empty() || !single_component {
        return Err(AudioStorageError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn output_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn save_audio(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError> {
        validate_file_name(file_name)?;
        let audio_path = self.get_audio_path(file_name);

        fs::write(&audio_path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            "Saved audio: path={}, size={} bytes",
            audio_path.display(),
            data.len()
        );

        Ok(audio_path)
    }
}
