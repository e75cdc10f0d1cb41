//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 远端返回的音色记录
//! - 演示用的音色选择
//! - TTS 返回方式

mod entity;
mod errors;
mod value_objects;

pub use entity::{select_voice, Voice};
pub use errors::VoiceError;
pub use value_objects::{ReturnType, VoiceId};
