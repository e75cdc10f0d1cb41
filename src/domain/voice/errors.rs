//! Voice Context - Errors

use thiserror::Error;

use super::VoiceId;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Voice not found: {0}")]
    NotFound(VoiceId),

    #[error("No voices available")]
    Empty,
}
