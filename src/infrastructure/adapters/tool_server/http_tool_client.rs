//! HTTP Tool Client - 调用外部语音生成 HTTP 服务
//!
//! 实现 ToolServerPort trait
//!
//! 外部 API:
//! POST http://localhost:8000/tools
//! Request: {"tool": "list_voices" | "generate_tts", "params": {...}}  (JSON)
//! Response: JSON

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::application::ports::{
    GenerateTtsRequest, GenerateTtsResponse, ListVoicesResponse, ToolCall, ToolError,
    ToolServerPort,
};
use crate::domain::voice::Voice;

/// HTTP Tool Client 配置
#[derive(Debug, Clone)]
pub struct HttpToolClientConfig {
    /// 工具调用入口 URL
    pub url: String,
    /// 请求超时时间（秒），None 表示不限制
    pub timeout_secs: Option<u64>,
}

impl HttpToolClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// HTTP Tool Client
///
/// 所有调用按顺序发出，每次调用都等待响应后才返回
pub struct HttpToolClient {
    client: Client,
    config: HttpToolClientConfig,
}

impl HttpToolClient {
    /// 创建新的 HTTP Tool Client
    pub fn new(config: HttpToolClientConfig) -> Result<Self, ToolError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ToolError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 工具调用 URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// 发送一次工具调用并解析 JSON 响应
    async fn invoke<T: DeserializeOwned>(&self, call: &ToolCall) -> Result<T, ToolError> {
        tracing::debug!(url = %self.config.url, tool = call.name(), "Sending tool request");

        let response = self
            .client
            .post(&self.config.url)
            .json(call)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ToolError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ToolError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| ToolError::InvalidResponse(format!("{}: {}", call.name(), e)))
    }
}

fn map_send_error(e: reqwest::Error) -> ToolError {
    if e.is_timeout() {
        ToolError::Timeout
    } else if e.is_connect() {
        ToolError::NetworkError(format!("Cannot connect to tool server: {}", e))
    } else {
        ToolError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl ToolServerPort for HttpToolClient {
    async fn list_voices(&self) -> Result<Vec<Voice>, ToolError> {
        let response: ListVoicesResponse = self.invoke(&ToolCall::ListVoices {}).await?;

        tracing::info!(count = response.voices.len(), "Voices received");

        Ok(response.voices)
    }

    async fn generate_tts(
        &self,
        request: GenerateTtsRequest,
    ) -> Result<GenerateTtsResponse, ToolError> {
        let return_type = request.return_type;
        let text_len = request.text.len();
        let response: GenerateTtsResponse = self.invoke(&ToolCall::GenerateTts(request)).await?;

        tracing::info!(
            return_type = %return_type,
            text_len,
            success = response.success,
            "TTS generation completed"
        );

        Ok(response)
    }

    async fn health_check(&self) -> bool {
        // 任何 HTTP 响应都说明服务在线，包括 405
        self.client
            .get(&self.config.url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }
}
