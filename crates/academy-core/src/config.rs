use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AcademyError, Result};

/// Top-level configuration for the academy assistant.
///
/// Loaded from `~/.academy/config.toml` by default. Each section configures
/// one chat surface or the shared speech layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcademyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub lab: LabConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AcademyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AcademyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AcademyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// General assistant surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Simulated thinking time before a response is appended.
    pub response_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 1000,
        }
    }
}

/// Lab assistant surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Simulated thinking time before a response is appended.
    pub response_delay_ms: u64,
    /// Read each response aloud through the shared speech output.
    pub speak_responses: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 600,
            speak_responses: true,
        }
    }
}

/// Voice guide surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Simulated thinking time before a response is appended.
    pub response_delay_ms: u64,
    /// BCP 47 language tag passed to the recognizer.
    pub language: String,
    /// Ask the recognizer for interim (non-final) results.
    pub interim_results: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 0,
            language: "en-US".to_string(),
            interim_results: true,
        }
    }
}

/// Speech synthesis parameters shared by every speaking surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Playback rate, 1.0 is normal speed.
    pub rate: f32,
    /// Voice pitch, 1.0 is the voice default.
    pub pitch: f32,
    /// Volume between 0.0 and 1.0.
    pub volume: f32,
    /// Pacing used by the terminal synthesizer to estimate utterance length.
    pub words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            words_per_minute: 170,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AcademyConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.assistant.response_delay_ms, 1000);
        assert_eq!(config.lab.response_delay_ms, 600);
        assert!(config.lab.speak_responses);
        assert_eq!(config.voice.response_delay_ms, 0);
        assert_eq!(config.voice.language, "en-US");
        assert!(config.voice.interim_results);
        assert!((config.speech.rate - 0.9).abs() < f32::EPSILON);
        assert!((config.speech.pitch - 1.0).abs() < f32::EPSILON);
        assert!((config.speech.volume - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.speech.words_per_minute, 170);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[assistant]
response_delay_ms = 250

[lab]
response_delay_ms = 100
speak_responses = false

[voice]
language = "en-GB"
interim_results = false

[speech]
rate = 1.2
volume = 0.5
"#;
        let file = create_temp_config(content);
        let config = AcademyConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.assistant.response_delay_ms, 250);
        assert_eq!(config.lab.response_delay_ms, 100);
        assert!(!config.lab.speak_responses);
        assert_eq!(config.voice.language, "en-GB");
        assert!(!config.voice.interim_results);
        assert_eq!(config.voice.response_delay_ms, 0);
        assert!((config.speech.rate - 1.2).abs() < f32::EPSILON);
        assert!((config.speech.volume - 0.5).abs() < f32::EPSILON);
        assert!((config.speech.pitch - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[lab]
speak_responses = false
"#;
        let file = create_temp_config(content);
        let config = AcademyConfig::load(file.path()).unwrap();
        assert!(!config.lab.speak_responses);
        assert_eq!(config.lab.response_delay_ms, 600);
        assert_eq!(config.assistant.response_delay_ms, 1000);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = AcademyConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.voice.language, "en-US");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = AcademyConfig::load(file.path());
        assert!(matches!(result, Err(AcademyError::Config(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AcademyConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.lab.response_delay_ms, 600);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = AcademyConfig::default();
        config.voice.language = "de-DE".to_string();
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = AcademyConfig::load(&path).unwrap();
        assert_eq!(reloaded.voice.language, "de-DE");
        assert_eq!(reloaded.speech.words_per_minute, 170);
    }
}
