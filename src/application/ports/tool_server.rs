//! Tool Server Port - 语音生成服务抽象
//!
//! 远端服务只有一个入口，所有调用都是同一种信封:
//! `{"tool": <name>, "params": {...}}`
//!
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::voice::{ReturnType, Voice, VoiceId};

/// Tool Server 错误
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 请求信封
///
/// 序列化为 `{"tool": "...", "params": {...}}`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tool", content = "params", rename_all = "snake_case")]
pub enum ToolCall {
    ListVoices {},
    GenerateTts(GenerateTtsRequest),
}

impl ToolCall {
    /// 工具名（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListVoices {} => "list_voices",
            Self::GenerateTts(_) => "generate_tts",
        }
    }
}

/// TTS 生成请求参数
#[derive(Debug, Clone, Serialize)]
pub struct GenerateTtsRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色 ID
    pub voice_id: VoiceId,
    /// 返回方式
    pub return_type: ReturnType,
    /// 服务端输出文件名（仅 file 模式）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
}

impl GenerateTtsRequest {
    /// 由服务端写文件并返回路径
    pub fn file(
        text: impl Into<String>,
        voice_id: VoiceId,
        output_filename: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            voice_id,
            return_type: ReturnType::File,
            output_filename: Some(output_filename.into()),
        }
    }

    /// 返回 base64 编码的音频
    pub fn base64(text: impl Into<String>, voice_id: VoiceId) -> Self {
        Self {
            text: text.into(),
            voice_id,
            return_type: ReturnType::Base64,
            output_filename: None,
        }
    }
}

/// `list_voices` 响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVoicesResponse {
    /// 缺失或为 null 时视为空列表
    #[serde(default, deserialize_with = "null_as_empty")]
    pub voices: Vec<Voice>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Voice>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Voice>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `generate_tts` 响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTtsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// file 模式下服务端写出的文件路径
    #[serde(default)]
    pub file_path: Option<String>,
    /// base64 模式下的音频数据
    #[serde(default)]
    pub audio_data: Option<String>,
}

impl GenerateTtsResponse {
    /// 失败原因，服务端未给出时为 "None"
    pub fn message_or_none(&self) -> &str {
        self.message.as_deref().unwrap_or("None")
    }
}

/// Tool Server Port
///
/// 外部语音生成服务的抽象接口
#[async_trait]
pub trait ToolServerPort: Send + Sync {
    /// 列出所有可用音色
    async fn list_voices(&self) -> Result<Vec<Voice>, ToolError>;

    /// 生成 TTS 音频
    async fn generate_tts(
        &self,
        request: GenerateTtsRequest,
    ) -> Result<GenerateTtsResponse, ToolError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
