//! Voice Context - 音色记录

use serde::{Deserialize, Serialize};

use super::{VoiceError, VoiceId};

/// 远端服务返回的音色记录
///
/// 四个字段都是必需的，缺失任何一个视为响应格式错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: VoiceId,
    pub name: String,
    pub gender: String,
    pub language: String,
}

/// 从音色列表中选出演示使用的音色
///
/// - `preferred` 为 None 时取第一个
/// - 指定了 `preferred` 时必须在列表中
pub fn select_voice<'a>(
    voices: &'a [Voice],
    preferred: Option<&VoiceId>,
) -> Result<&'a Voice, VoiceError> {
    match preferred {
        Some(id) => voices
            .iter()
            .find(|v| &v.id == id)
            .ok_or_else(|| VoiceError::NotFound(id.clone())),
        None => voices.first().ok_or(VoiceError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str) -> Voice {
        Voice {
            id: VoiceId::new(id),
            name: format!("Voice {}", id),
            gender: "female".to_string(),
            language: "en-US".to_string(),
        }
    }

    #[test]
    fn test_select_first_voice_by_default() {
        let voices = vec![voice("a"), voice("b")];
        let selected = select_voice(&voices, None).unwrap();
        assert_eq!(selected.id.as_str(), "a");
    }

    #[test]
    fn test_select_preferred_voice() {
        let voices = vec![voice("a"), voice("b")];
        let preferred = VoiceId::new("b");
        let selected = select_voice(&voices, Some(&preferred)).unwrap();
        assert_eq!(selected.id.as_str(), "b");
    }

    #[test]
    fn test_select_missing_preferred_voice() {
        let voices = vec![voice("a")];
        let preferred = VoiceId::new("zzz");
        assert!(matches!(
            select_voice(&voices, Some(&preferred)),
            Err(VoiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_select_from_empty_list() {
        assert!(matches!(select_voice(&[], None), Err(VoiceError::Empty)));
    }

    #[test]
    fn test_voice_ignores_unknown_fields() {
        let json = r#"{"id":"v1","name":"Ada","gender":"female","language":"en","uuid":"x"}"#;
        let v: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(v.name, "Ada");
    }

    #[test]
    fn test_voice_missing_field_is_error() {
        let json = r#"{"id":"v1","name":"Ada"}"#;
        assert!(serde_json::from_str::<Voice>(json).is_err());
    }
}
