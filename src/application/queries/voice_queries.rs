//! Voice Queries

use crate::domain::voice::VoiceId;

/// 列出所有音色并选出演示用的音色
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    /// 指定音色，None 表示使用列表中的第一个
    pub preferred: Option<VoiceId>,
}
