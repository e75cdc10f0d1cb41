//! voicegen - 语音生成服务演示客户端
//!
//! 依次调用远端服务：列出音色、生成音频文件、生成 base64 音频

use std::process::ExitCode;
use std::sync::Arc;

use voicegen::application::VoiceDemo;
use voicegen::application::ToolServerPort;
use voicegen::config::{load_config, print_config, LogConfig};
use voicegen::infrastructure::{FileAudioStorage, HttpToolClient};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},voicegen={}", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // 日志写到 stderr，stdout 只留给演示输出
    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    print_config(&config);

    // 输出目录在启动时创建
    let storage = Arc::new(FileAudioStorage::new(&config.output.dir).await?);

    let tool_server = Arc::new(HttpToolClient::new(config.server.client_config())?);
    if !tool_server.health_check().await {
        tracing::warn!(url = %tool_server.url(), "Tool server is not reachable");
    }

    let mut demo = VoiceDemo::new(tool_server, storage, config.demo_settings());
    let report = demo.run().await;

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
