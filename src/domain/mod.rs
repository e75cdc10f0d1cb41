//! Domain Layer - 领域层
//!
//! Voice Context: 远端音色记录与 TTS 返回方式

pub mod voice;
