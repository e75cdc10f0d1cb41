//! Demo Driver - 演示流程
//!
//! 按顺序执行三步：列出音色、生成音频文件、生成 base64 音频。
//! 每一步的失败只打印提示并返回空结果，不中断后续步骤
//! （没有可用音色时除外）。

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::handlers::{
    GenerateAudioFileHandler, GenerateBase64AudioHandler, GenerateOutcome,
};
use crate::application::commands::{GenerateAudioFile, GenerateBase64Audio};
use crate::application::ports::{AudioStoragePort, ToolServerPort};
use crate::application::queries::handlers::ListVoicesHandler;
use crate::application::queries::ListVoices;
use crate::domain::voice::VoiceId;

/// 演示参数
#[derive(Debug, Clone)]
pub struct DemoSettings {
    /// 指定音色，None 表示使用第一个
    pub preferred_voice: Option<VoiceId>,
    /// 列表中展示的音色数量
    pub preview_count: usize,
    pub file_text: String,
    pub base64_text: String,
    /// 服务端输出文件名（file 模式）
    pub file_output_name: String,
    /// 本地文件名（base64 模式）
    pub base64_filename: String,
}

/// 演示结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoReport {
    pub voice_id: Option<VoiceId>,
    /// 服务端写出的文件路径
    pub file_path: Option<String>,
    /// 本地保存的 base64 音频路径
    pub base64_path: Option<PathBuf>,
}

impl DemoReport {
    /// 至少生成了一个音频
    pub fn is_success(&self) -> bool {
        self.file_path.is_some() || self.base64_path.is_some()
    }
}

/// 演示输出，默认写到 stdout
struct Console {
    out: Box<dyn Write + Send>,
}

impl Console {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            tracing::warn!(error = %e, "Failed to write demo output");
        }
    }
}

/// 演示驱动
pub struct VoiceDemo {
    list_voices: ListVoicesHandler,
    generate_file: GenerateAudioFileHandler,
    generate_base64: GenerateBase64AudioHandler,
    settings: DemoSettings,
    console: Console,
}

impl VoiceDemo {
    pub fn new(
        tool_server: Arc<dyn ToolServerPort>,
        storage: Arc<dyn AudioStoragePort>,
        settings: DemoSettings,
    ) -> Self {
        Self {
            list_voices: ListVoicesHandler::new(tool_server.clone()),
            generate_file: GenerateAudioFileHandler::new(tool_server.clone()),
            generate_base64: GenerateBase64AudioHandler::new(tool_server, storage),
            settings,
            console: Console {
                out: Box::new(io::stdout()),
            },
        }
    }

    /// 替换演示输出目标
    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.console.out = out;
        self
    }

    /// 运行完整演示
    pub async fn run(&mut self) -> DemoReport {
        self.console
            .line(format_args!("🤖 Cursor AI + Resemble AI Voice Generation Demo\n"));

        let mut report = DemoReport::default();

        let Some(voice_id) = self.list_available_voices().await else {
            self.console
                .line(format_args!("❌ Cannot proceed without a voice ID."));
            return report;
        };
        report.voice_id = Some(voice_id.clone());

        let file_text = self.settings.file_text.clone();
        report.file_path = self.generate_audio_file(&voice_id, &file_text).await;
        let base64_text = self.settings.base64_text.clone();
        report.base64_path = self.generate_base64_audio(&voice_id, &base64_text).await;

        self.print_summary(&report);
        report
    }

    /// 列出可用音色，返回选中的音色 ID
    pub async fn list_available_voices(&mut self) -> Option<VoiceId> {
        self.console
            .line(format_args!("🔍 Listing available voices from Resemble AI..."));

        let query = ListVoices {
            preferred: self.settings.preferred_voice.clone(),
        };
        let listing = match self.list_voices.handle(query).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(error = %e, "list_voices failed");
                self.console
                    .line(format_args!("❌ Error listing voices: {}", e));
                return None;
            }
        };

        let Some(selected) = listing.selected else {
            self.console
                .line(format_args!("❌ No voices found in the response."));
            return None;
        };

        let voices = &listing.voices;
        let preview_count = self.settings.preview_count;
        self.console
            .line(format_args!("\n✅ Found {} voices!\n", voices.len()));

        for (i, voice) in voices.iter().take(preview_count).enumerate() {
            self.console.line(format_args!("Voice {}:", i + 1));
            self.console.line(format_args!("  - ID: {}", voice.id));
            self.console.line(format_args!("  - Name: {}", voice.name));
            self.console.line(format_args!("  - Gender: {}", voice.gender));
            self.console
                .line(format_args!("  - Language: {}", voice.language));
            self.console.line(format_args!(""));
        }

        if voices.len() > preview_count {
            self.console.line(format_args!(
                "... and {} more voices available.\n",
                voices.len() - preview_count
            ));
        }

        Some(selected.id)
    }

    /// 生成音频文件，返回服务端路径
    pub async fn generate_audio_file(&mut self, voice_id: &VoiceId, text: &str) -> Option<String> {
        self.console
            .line(format_args!("🔊 Generating audio for: \"{}\"", text));

        let command = GenerateAudioFile {
            voice_id: voice_id.clone(),
            text: text.to_string(),
            output_filename: self.settings.file_output_name.clone(),
        };

        match self.generate_file.handle(command).await {
            Ok(GenerateOutcome::Generated(file_path)) => {
                self.console.line(format_args!(
                    "✅ Audio file generated successfully: {}",
                    file_path
                ));
                Some(file_path)
            }
            Ok(GenerateOutcome::Rejected { message }) => {
                self.console
                    .line(format_args!("❌ Failed to generate audio: {}", message));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "generate_tts (file) failed");
                self.console
                    .line(format_args!("❌ Error generating audio file: {}", e));
                None
            }
        }
    }

    /// 生成 base64 音频并保存到本地，返回本地路径
    pub async fn generate_base64_audio(
        &mut self,
        voice_id: &VoiceId,
        text: &str,
    ) -> Option<PathBuf> {
        self.console
            .line(format_args!("🔊 Generating base64 audio for: \"{}\"", text));

        let command = GenerateBase64Audio {
            voice_id: voice_id.clone(),
            text: text.to_string(),
            file_name: self.settings.base64_filename.clone(),
        };

        match self.generate_base64.handle(command).await {
            Ok(GenerateOutcome::Generated(path)) => {
                self.console.line(format_args!(
                    "✅ Base64 audio decoded and saved to: {}",
                    path.display()
                ));
                Some(path)
            }
            Ok(GenerateOutcome::Rejected { message }) => {
                self.console
                    .line(format_args!("❌ Failed to generate base64 audio: {}", message));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "generate_tts (base64) failed");
                self.console
                    .line(format_args!("❌ Error generating base64 audio: {}", e));
                None
            }
        }
    }

    fn print_summary(&mut self, report: &DemoReport) {
        let console = &mut self.console;

        if !report.is_success() {
            console.line(format_args!("\n❌ Demo failed to generate any audio files."));
            return;
        }

        console.line(format_args!("\n✨ Demo completed successfully!"));
        console.line(format_args!(
            "This demonstrates how Cursor AI can use the Resemble AI server to generate voice content."
        ));
        console.line(format_args!("\nYou can find the generated audio files in:"));
        if let Some(file_path) = &report.file_path {
            console.line(format_args!("- {}", file_path));
        }
        if let Some(base64_path) = &report.base64_path {
            console.line(format_args!("- {}", base64_path.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::voice::ReturnType;
    use crate::infrastructure::adapters::{FakeFailure, FakeToolServer, FileAudioStorage};
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    /// 收集演示输出
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedOutput {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn default_settings() -> DemoSettings {
        AppConfig::default().demo_settings()
    }

    async fn demo(
        server: Arc<FakeToolServer>,
        settings: DemoSettings,
    ) -> (VoiceDemo, CapturedOutput, TempDir) {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(FileAudioStorage::new(temp_dir.path()).await.unwrap());
        let output = CapturedOutput::default();
        let demo = VoiceDemo::new(server, storage, settings).with_output(Box::new(output.clone()));
        (demo, output, temp_dir)
    }

    #[tokio::test]
    async fn test_full_demo() {
        let server = Arc::new(FakeToolServer::with_voice_count(7));
        let (mut demo, output, temp_dir) = demo(server.clone(), default_settings()).await;

        let report = demo.run().await;

        assert!(report.is_success());
        assert_eq!(report.voice_id, Some(VoiceId::new("voice-1")));
        assert_eq!(
            report.file_path.as_deref(),
            Some("output/cursor_example.mp3")
        );
        let base64_path = temp_dir.path().join("cursor_example_base64.mp3");
        assert_eq!(report.base64_path, Some(base64_path.clone()));
        assert!(base64_path.exists());

        let names: Vec<_> = server.calls().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["list_voices", "generate_tts", "generate_tts"]);

        let text = output.text();
        assert!(text.starts_with("🤖 Cursor AI + Resemble AI Voice Generation Demo\n"));
        assert!(text.contains("✅ Audio file generated successfully: output/cursor_example.mp3\n"));
        assert!(text.contains(&format!(
            "✅ Base64 audio decoded and saved to: {}\n",
            base64_path.display()
        )));
        assert!(text.contains("\n✨ Demo completed successfully!\n"));
        assert!(text.contains("- output/cursor_example.mp3\n"));
        assert!(text.ends_with(&format!("- {}\n", base64_path.display())));
    }

    #[tokio::test]
    async fn test_voice_listing_is_cut_at_preview_count() {
        let server = Arc::new(FakeToolServer::with_voice_count(7));
        let (mut demo, output, _temp_dir) = demo(server, default_settings()).await;

        demo.list_available_voices().await;

        let text = output.text();
        assert!(text.contains("\n✅ Found 7 voices!\n\n"));
        assert!(text.contains(
            "Voice 5:\n  - ID: voice-5\n  - Name: Speaker 5\n  - Gender: female\n  - Language: en-US\n\n"
        ));
        assert!(!text.contains("Voice 6:"));
        assert!(text.contains("... and 2 more voices available.\n"));
    }

    #[tokio::test]
    async fn test_voice_listing_without_overflow_line() {
        let server = Arc::new(FakeToolServer::with_voice_count(5));
        let (mut demo, output, _temp_dir) = demo(server, default_settings()).await;

        demo.list_available_voices().await;

        let text = output.text();
        assert!(text.contains("Voice 5:"));
        assert!(!text.contains("more voices available"));
    }

    #[tokio::test]
    async fn test_demo_stops_without_voices() {
        let server = Arc::new(FakeToolServer::with_voice_count(0));
        let (mut demo, output, _temp_dir) = demo(server.clone(), default_settings()).await;

        let report = demo.run().await;

        assert_eq!(report, DemoReport::default());
        assert_eq!(server.calls().len(), 1);

        let text = output.text();
        assert!(text.contains("❌ No voices found in the response.\n"));
        assert!(text.ends_with("❌ Cannot proceed without a voice ID.\n"));
        assert!(!text.contains("Generating"));
    }

    #[tokio::test]
    async fn test_demo_stops_when_list_fails() {
        let server = Arc::new(FakeToolServer::new().fail_list_voices(FakeFailure::Unreachable));
        let (mut demo, output, _temp_dir) = demo(server.clone(), default_settings()).await;

        let report = demo.run().await;

        assert!(!report.is_success());
        assert!(report.voice_id.is_none());
        assert_eq!(server.calls().len(), 1);
        assert!(output
            .text()
            .contains("❌ Error listing voices: Network error: Cannot connect to tool server\n"));
    }

    #[tokio::test]
    async fn test_base64_step_runs_after_file_step_fails() {
        let server = Arc::new(
            FakeToolServer::new().fail_return_type(ReturnType::File, FakeFailure::Unreachable),
        );
        let (mut demo, output, _temp_dir) = demo(server.clone(), default_settings()).await;

        let report = demo.run().await;

        assert!(report.file_path.is_none());
        assert!(report.base64_path.is_some());
        assert!(report.is_success());
        assert_eq!(server.calls().len(), 3);

        let text = output.text();
        assert!(text.contains("❌ Error generating audio file: "));
        assert!(text.contains("✅ Base64 audio decoded and saved to: "));
    }

    #[tokio::test]
    async fn test_rejection_without_message_prints_none() {
        let server = Arc::new(
            FakeToolServer::new()
                .fail_return_type(ReturnType::File, FakeFailure::Rejected(None))
                .fail_return_type(ReturnType::Base64, FakeFailure::Rejected(None)),
        );
        let (mut demo, output, _temp_dir) = demo(server, default_settings()).await;

        let report = demo.run().await;

        assert!(report.voice_id.is_some());
        assert!(!report.is_success());

        let text = output.text();
        assert!(text.contains("❌ Failed to generate audio: None\n"));
        assert!(text.contains("❌ Failed to generate base64 audio: None\n"));
        assert!(text.ends_with("\n❌ Demo failed to generate any audio files.\n"));
    }

    #[tokio::test]
    async fn test_demo_fails_when_both_generations_fail() {
        let server = Arc::new(
            FakeToolServer::new()
                .fail_return_type(ReturnType::File, FakeFailure::Rejected(Some("busy".into())))
                .fail_return_type(ReturnType::Base64, FakeFailure::CorruptAudio),
        );
        let (mut demo, output, _temp_dir) = demo(server, default_settings()).await;

        let report = demo.run().await;

        assert!(report.voice_id.is_some());
        assert!(!report.is_success());

        let text = output.text();
        assert!(text.contains("❌ Failed to generate audio: busy\n"));
        assert!(text.contains("❌ Error generating base64 audio: Decode error: "));
    }

    #[tokio::test]
    async fn test_preferred_voice_is_used() {
        let server = Arc::new(FakeToolServer::with_voice_count(3));
        let settings = DemoSettings {
            preferred_voice: Some(VoiceId::new("voice-3")),
            ..default_settings()
        };
        let (mut demo, _output, _temp_dir) = demo(server, settings).await;

        assert_eq!(
            demo.list_available_voices().await,
            Some(VoiceId::new("voice-3"))
        );
    }

    #[tokio::test]
    async fn test_unknown_preferred_voice() {
        let server = Arc::new(FakeToolServer::with_voice_count(3));
        let settings = DemoSettings {
            preferred_voice: Some(VoiceId::new("nobody")),
            ..default_settings()
        };
        let (mut demo, output, _temp_dir) = demo(server, settings).await;

        assert_eq!(demo.list_available_voices().await, None);
        assert!(output
            .text()
            .contains("❌ Error listing voices: Voice not found: nobody\n"));
    }
}
