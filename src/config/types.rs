//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::demo::DemoSettings;
use crate::domain::voice::VoiceId;
use crate::infrastructure::adapters::HttpToolClientConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 语音生成服务配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 本地输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 演示参数
    #[serde(default)]
    pub demo: DemoConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 转换为演示驱动参数
    pub fn demo_settings(&self) -> DemoSettings {
        DemoSettings {
            preferred_voice: self.demo.voice_id.as_deref().map(VoiceId::new),
            preview_count: self.demo.preview_count,
            file_text: self.demo.file_text.clone(),
            base64_text: self.demo.base64_text.clone(),
            file_output_name: self.output.file_output_name.clone(),
            base64_filename: self.output.base64_filename.clone(),
        }
    }
}

/// 语音生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 工具调用入口 URL
    #[serde(default = "default_server_url")]
    pub url: String,

    /// 请求超时时间（秒），不设置则不限制
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_server_url() -> String {
    "http://localhost:8000/tools".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// 转换为 HTTP 客户端配置
    pub fn client_config(&self) -> HttpToolClientConfig {
        let config = HttpToolClientConfig::new(self.url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

/// 本地输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 输出目录，启动时自动创建
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// file 模式下交给服务端的输出文件名
    #[serde(default = "default_file_output_name")]
    pub file_output_name: String,

    /// base64 模式下本地保存的文件名
    #[serde(default = "default_base64_filename")]
    pub base64_filename: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./cursor_output")
}

fn default_file_output_name() -> String {
    "cursor_example".to_string()
}

fn default_base64_filename() -> String {
    "cursor_example_base64.mp3".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            file_output_name: default_file_output_name(),
            base64_filename: default_base64_filename(),
        }
    }
}

/// 演示参数配置
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// 指定音色 ID，不设置则使用列表中的第一个
    #[serde(default)]
    pub voice_id: Option<String>,

    /// 列表中展示的音色数量
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,

    /// file 模式合成的文本
    #[serde(default = "default_file_text")]
    pub file_text: String,

    /// base64 模式合成的文本
    #[serde(default = "default_base64_text")]
    pub base64_text: String,
}

fn default_preview_count() -> usize {
    5
}

fn default_file_text() -> String {
    "Hello! This is an example of Cursor AI using Resemble's voice generation capabilities."
        .to_string()
}

fn default_base64_text() -> String {
    "This is another example showing base64 encoding for web applications.".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            voice_id: None,
            preview_count: default_preview_count(),
            file_text: default_file_text(),
            base64_text: default_base64_text(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
