//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ToolServerPort;
use crate::application::queries::ListVoices;
use crate::domain::voice::{select_voice, Voice};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色列表响应
#[derive(Debug, Clone)]
pub struct VoiceListResponse {
    pub voices: Vec<Voice>,
    /// 列表为空时为 None
    pub selected: Option<Voice>,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    tool_server: Arc<dyn ToolServerPort>,
}

impl ListVoicesHandler {
    pub fn new(tool_server: Arc<dyn ToolServerPort>) -> Self {
        Self { tool_server }
    }

    pub async fn handle(&self, query: ListVoices) -> Result<VoiceListResponse, ApplicationError> {
        let voices = self.tool_server.list_voices().await?;

        if voices.is_empty() {
            return Ok(VoiceListResponse {
                voices,
                selected: None,
            });
        }

        let selected = select_voice(&voices, query.preferred.as_ref())?.clone();

        tracing::debug!(
            count = voices.len(),
            selected = %selected.id,
            "Voices listed"
        );

        Ok(VoiceListResponse {
            voices,
            selected: Some(selected),
        })
    }
}
