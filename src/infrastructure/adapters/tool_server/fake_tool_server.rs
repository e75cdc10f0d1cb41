//! Fake Tool Server - 用于测试的内存实现
//!
//! 不发起网络请求，按配置返回固定音色和音频

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Mutex;

use crate::application::ports::{
    GenerateTtsRequest, GenerateTtsResponse, ToolCall, ToolError, ToolServerPort,
};
use crate::domain::voice::{ReturnType, Voice, VoiceId};

/// 注入的故障
#[derive(Debug, Clone)]
pub enum FakeFailure {
    /// 调用直接返回网络错误
    Unreachable,
    /// 返回 `success: false`，消息可缺省
    Rejected(Option<String>),
    /// 返回无法解码的 audio_data
    CorruptAudio,
}

/// Fake Tool Server
///
/// 记录收到的每一次调用，便于断言调用顺序
pub struct FakeToolServer {
    voices: Vec<Voice>,
    audio_data: Vec<u8>,
    /// 原样返回的 audio_data，优先于 `audio_data`
    encoded_audio: Option<String>,
    list_failure: Option<FakeFailure>,
    file_failure: Option<FakeFailure>,
    base64_failure: Option<FakeFailure>,
    calls: Mutex<Vec<ToolCall>>,
}

impl FakeToolServer {
    /// 一个音色，固定音频
    pub fn new() -> Self {
        Self::with_voice_count(1)
    }

    /// 生成 `count` 个音色: voice-1, voice-2, ...
    pub fn with_voice_count(count: usize) -> Self {
        let voices = (1..=count)
            .map(|i| Voice {
                id: VoiceId::new(format!("voice-{}", i)),
                name: format!("Speaker {}", i),
                gender: if i % 2 == 0 { "male" } else { "female" }.to_string(),
                language: "en-US".to_string(),
            })
            .collect();

        Self {
            voices,
            audio_data: b"fake mp3 data".to_vec(),
            encoded_audio: None,
            list_failure: None,
            file_failure: None,
            base64_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_audio(mut self, audio_data: Vec<u8>) -> Self {
        self.audio_data = audio_data;
        self
    }

    pub fn with_encoded_audio(mut self, encoded: impl Into<String>) -> Self {
        self.encoded_audio = Some(encoded.into());
        self
    }

    pub fn fail_list_voices(mut self, failure: FakeFailure) -> Self {
        self.list_failure = Some(failure);
        self
    }

    pub fn fail_return_type(mut self, return_type: ReturnType, failure: FakeFailure) -> Self {
        match return_type {
            ReturnType::File => self.file_failure = Some(failure),
            ReturnType::Base64 => self.base64_failure = Some(failure),
        }
        self
    }

    /// 已收到的调用
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: ToolCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for FakeToolServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolServerPort for FakeToolServer {
    async fn list_voices(&self) -> Result<Vec<Voice>, ToolError> {
        self.record(ToolCall::ListVoices {});

        match &self.list_failure {
            None => Ok(self.voices.clone()),
            Some(FakeFailure::Unreachable) => Err(ToolError::NetworkError(
                "Cannot connect to tool server".to_string(),
            )),
            Some(FakeFailure::Rejected(message)) => Err(ToolError::ServiceError(
                message.clone().unwrap_or_default(),
            )),
            Some(FakeFailure::CorruptAudio) => Err(ToolError::InvalidResponse(
                "list_voices: expected an object".to_string(),
            )),
        }
    }

    async fn generate_tts(
        &self,
        request: GenerateTtsRequest,
    ) -> Result<GenerateTtsResponse, ToolError> {
        self.record(ToolCall::GenerateTts(request.clone()));

        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            return_type = %request.return_type,
            "FakeToolServer: returning fixed audio"
        );

        let failure = match request.return_type {
            ReturnType::File => &self.file_failure,
            ReturnType::Base64 => &self.base64_failure,
        };

        match failure {
            Some(FakeFailure::Unreachable) => {
                return Err(ToolError::NetworkError(
                    "Cannot connect to tool server".to_string(),
                ))
            }
            Some(FakeFailure::Rejected(message)) => {
                return Ok(GenerateTtsResponse {
                    success: false,
                    message: message.clone(),
                    ..Default::default()
                })
            }
            Some(FakeFailure::CorruptAudio) => {
                return Ok(GenerateTtsResponse {
                    success: true,
                    audio_data: Some("%%% not base64 %%%".to_string()),
                    ..Default::default()
                })
            }
            None => {}
        }

        let response = match request.return_type {
            ReturnType::File => GenerateTtsResponse {
                success: true,
                file_path: Some(format!(
                    "output/{}.mp3",
                    request.output_filename.as_deref().unwrap_or("output")
                )),
                ..Default::default()
            },
            ReturnType::Base64 => GenerateTtsResponse {
                success: true,
                audio_data: Some(
                    self.encoded_audio
                        .clone()
                        .unwrap_or_else(|| STANDARD.encode(&self.audio_data)),
                ),
                ..Default::default()
            },
        };

        Ok(response)
    }
}
