//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ToolServer、AudioStorage）
//! - commands: 生成音频命令及处理器
//! - queries: 音色查询及处理器
//! - demo: 演示流程驱动
//! - error: 应用层错误定义

pub mod commands;
pub mod demo;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{GenerateAudioFileHandler, GenerateBase64AudioHandler, GenerateOutcome},
    GenerateAudioFile, GenerateBase64Audio,
};

pub use demo::{DemoReport, VoiceDemo};

pub use error::ApplicationError;

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    // Tool server
    GenerateTtsRequest,
    GenerateTtsResponse,
    ToolError,
    ToolServerPort,
};

pub use queries::{
    handlers::{ListVoicesHandler, VoiceListResponse},
    ListVoices,
};
