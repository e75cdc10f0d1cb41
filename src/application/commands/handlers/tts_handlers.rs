//! TTS Command Handlers

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::{GenerateAudioFile, GenerateBase64Audio};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStoragePort, GenerateTtsRequest, ToolServerPort};

/// 生成结果
///
/// 服务端明确拒绝（`success: false`）不算错误，交给调用方展示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome<T> {
    Generated(T),
    Rejected { message: String },
}

#[cfg(test)]
impl<T> GenerateOutcome<T> {
    pub fn generated(self) -> Option<T> {
        match self {
            Self::Generated(value) => Some(value),
            Self::Rejected { .. } => None,
        }
    }
}

// ============================================================================
// GenerateAudioFile
// ============================================================================

/// GenerateAudioFile Handler
pub struct GenerateAudioFileHandler {
    tool_server: Arc<dyn ToolServerPort>,
}

impl GenerateAudioFileHandler {
    pub fn new(tool_server: Arc<dyn ToolServerPort>) -> Self {
        Self { tool_server }
    }

    /// 返回服务端写出的文件路径
    pub async fn handle(
        &self,
        command: GenerateAudioFile,
    ) -> Result<GenerateOutcome<String>, ApplicationError> {
        let request =
            GenerateTtsRequest::file(command.text, command.voice_id, command.output_filename);
        let response = self.tool_server.generate_tts(request).await?;

        if !response.success {
            return Ok(GenerateOutcome::Rejected {
                message: response.message_or_none().to_string(),
            });
        }

        let file_path = response
            .file_path
            .ok_or_else(|| ApplicationError::invalid_response("success without file_path"))?;

        tracing::info!(file_path = %file_path, "Audio file generated");

        Ok(GenerateOutcome::Generated(file_path))
    }
}

// ============================================================================
// GenerateBase64Audio
// ============================================================================

/// GenerateBase64Audio Handler
pub struct GenerateBase64AudioHandler {
    tool_server: Arc<dyn ToolServerPort>,
    storage: Arc<dyn AudioStoragePort>,
}

impl GenerateBase64AudioHandler {
    pub fn new(tool_server: Arc<dyn ToolServerPort>, storage: Arc<dyn AudioStoragePort>) -> Self {
        Self {
            tool_server,
            storage,
        }
    }

    /// 解码 base64 音频并写入本地，返回本地路径
    pub async fn handle(
        &self,
        command: GenerateBase64Audio,
    ) -> Result<GenerateOutcome<PathBuf>, ApplicationError> {
        let request = GenerateTtsRequest::base64(command.text, command.voice_id);
        let response = self.tool_server.generate_tts(request).await?;

        let encoded = match response.audio_data.as_deref() {
            Some(data) if response.success && !data.is_empty() => data,
            _ => {
                return Ok(GenerateOutcome::Rejected {
                    message: response.message_or_none().to_string(),
                })
            }
        };

        let audio = decode_audio(encoded)?;
        let path = self.storage.save_audio(&command.file_name, &audio).await?;

        tracing::info!(
            path = %path.display(),
            audio_size = audio.len(),
            "Base64 audio saved"
        );

        Ok(GenerateOutcome::Generated(path))
    }
}

/// 宽松解码：丢弃 base64 字母表以外的字符（换行、空格等）再解码
fn decode_audio(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: Vec<u8> = encoded
        .bytes()
        .filter(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();
    STANDARD.decode(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{ReturnType, VoiceId};
    use crate::infrastructure::adapters::{FakeFailure, FakeToolServer, FileAudioStorage};
    use tempfile::tempdir;

    fn file_command() -> GenerateAudioFile {
        GenerateAudioFile {
            voice_id: VoiceId::new("v1"),
            text: "Hello".to_string(),
            output_filename: "cursor_example".to_string(),
        }
    }

    fn base64_command() -> GenerateBase64Audio {
        GenerateBase64Audio {
            voice_id: VoiceId::new("v1"),
            text: "Hello".to_string(),
            file_name: "out.mp3".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_audio_file() {
        let server = Arc::new(FakeToolServer::new());
        let handler = GenerateAudioFileHandler::new(server.clone());

        let outcome = handler.handle(file_command()).await.unwrap();
        assert_eq!(
            outcome,
            GenerateOutcome::Generated("output/cursor_example.mp3".to_string())
        );
        assert_eq!(server.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_audio_file_rejected() {
        let server = Arc::new(
            FakeToolServer::new()
                .fail_return_type(ReturnType::File, FakeFailure::Rejected(Some("quota".into()))),
        );
        let handler = GenerateAudioFileHandler::new(server);

        let outcome = handler.handle(file_command()).await.unwrap();
        assert_eq!(
            outcome,
            GenerateOutcome::Rejected {
                message: "quota".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_generate_audio_file_unreachable() {
        let server = Arc::new(
            FakeToolServer::new().fail_return_type(ReturnType::File, FakeFailure::Unreachable),
        );
        let handler = GenerateAudioFileHandler::new(server);

        assert!(matches!(
            handler.handle(file_command()).await,
            Err(ApplicationError::ToolServer(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_base64_audio_writes_decoded_bytes() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(temp_dir.path()).await.unwrap());
        let server = Arc::new(FakeToolServer::new().with_audio(b"ID3 fake mp3".to_vec()));
        let handler = GenerateBase64AudioHandler::new(server, storage);

        let path = handler
            .handle(base64_command())
            .await
            .unwrap()
            .generated()
            .unwrap();
        assert_eq!(path, temp_dir.path().join("out.mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3 fake mp3");
    }

    #[tokio::test]
    async fn test_generate_base64_audio_line_wrapped_payload() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(temp_dir.path()).await.unwrap());
        let server = Arc::new(FakeToolServer::new().with_encoded_audio("aGVsbG8g\nd29ybGQ=\n"));
        let handler = GenerateBase64AudioHandler::new(server, storage);

        let path = handler
            .handle(base64_command())
            .await
            .unwrap()
            .generated()
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn test_decode_audio_skips_non_alphabet_characters() {
        assert_eq!(decode_audio("aGVs\r\nbG8=").unwrap(), b"hello");
        assert_eq!(decode_audio(" aGVsbG8= ").unwrap(), b"hello");
        assert!(decode_audio("aGVsbG8").is_err());
    }

    #[tokio::test]
    async fn test_generate_base64_audio_corrupt_payload() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(temp_dir.path()).await.unwrap());
        let server = Arc::new(
            FakeToolServer::new().fail_return_type(ReturnType::Base64, FakeFailure::CorruptAudio),
        );
        let handler = GenerateBase64AudioHandler::new(server, storage);

        assert!(matches!(
            handler.handle(base64_command()).await,
            Err(ApplicationError::DecodeError(_))
        ));
        assert!(!temp_dir.path().join("out.mp3").exists());
    }

    #[tokio::test]
    async fn test_generate_base64_audio_missing_data_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(temp_dir.path()).await.unwrap());
        let server = Arc::new(FakeToolServer::new().with_audio(Vec::new()));
        let handler = GenerateBase64AudioHandler::new(server, storage);

        let outcome = handler.handle(base64_command()).await.unwrap();
        assert!(matches!(outcome, GenerateOutcome::Rejected { .. }));
    }
}
