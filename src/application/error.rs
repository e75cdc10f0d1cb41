//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{AudioStorageError, ToolError};
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 音色选择失败
    #[error(transparent)]
    Voice(#[from] VoiceError),

    /// 外部服务错误
    #[error(transparent)]
    ToolServer(#[from] ToolError),

    /// 服务端返回了不完整的数据
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 音频数据解码失败
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建响应格式错误
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

impl From<AudioStorageError> for ApplicationError {
    fn from(err: AudioStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<base64::DecodeError> for ApplicationError {
    fn from(err: base64::DecodeError) -> Self {
        Self::DecodeError(err.to_string())
    }
}
