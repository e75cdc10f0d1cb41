//! TTS Commands

use crate::domain::voice::VoiceId;

/// 生成音频文件（服务端落盘）
#[derive(Debug, Clone)]
pub struct GenerateAudioFile {
    pub voice_id: VoiceId,
    pub text: String,
    /// 服务端输出文件名
    pub output_filename: String,
}

/// 生成 base64 音频并保存到本地输出目录
#[derive(Debug, Clone)]
pub struct GenerateBase64Audio {
    pub voice_id: VoiceId,
    pub text: String,
    /// 本地文件名
    pub file_name: String,
}
