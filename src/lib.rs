//! voicegen - 语音生成服务演示客户端
//!
//! 通过 HTTP 调用已运行的语音生成服务：列出音色，
//! 并以两种方式（服务端文件路径、base64 数据）生成 TTS 音频。
//!
//! 领域层 (domain/):
//! - Voice Context: 音色记录与返回方式
//!
//! 应用层 (application/):
//! - Ports: ToolServerPort, AudioStoragePort
//! - Commands / Queries: 生成音频、列出音色
//! - Demo: 按顺序执行三步的演示驱动
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP Tool Client, File Storage

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
