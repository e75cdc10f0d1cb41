//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEGEN_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEGEN_SERVER__URL=http://tts-server:8000/tools`
/// - `VOICEGEN_SERVER__TIMEOUT_SECS=30`
/// - `VOICEGEN_OUTPUT__DIR=/tmp/voicegen`
/// - `VOICEGEN_DEMO__VOICE_ID=55592656`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    // 1. 默认值（最低优先级）由 types.rs 中的 serde default 提供
    let mut builder = Config::builder();

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VOICEGEN_SERVER__URL=http://tts-server:8000/tools
    builder = builder.add_source(
        Environment::with_prefix("VOICEGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let url = &config.server.url;
    if url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Server URL cannot be empty".to_string(),
        ));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "Server URL must start with http:// or https://: {}",
            url
        )));
    }

    if config.server.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "Server timeout cannot be 0".to_string(),
        ));
    }

    if config.demo.preview_count == 0 {
        return Err(ConfigError::ValidationError(
            "Preview count cannot be 0".to_string(),
        ));
    }

    if config.output.file_output_name.is_empty() || config.output.base64_filename.is_empty() {
        return Err(ConfigError::ValidationError(
            "Output file names cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server URL: {}", config.server.url);
    match config.server.timeout_secs {
        Some(secs) => tracing::info!("Server Timeout: {}s", secs),
        None => tracing::info!("Server Timeout: none"),
    }
    tracing::info!("Output Directory: {:?}", config.output.dir);
    if let Some(voice_id) = &config.demo.voice_id {
        tracing::info!("Preferred Voice: {}", voice_id);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
