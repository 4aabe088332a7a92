//! Persisted user settings: the news API key and the article language.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "newsdesk";
const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language codes accepted by the news endpoint, with display names.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ar", "Arabic"),
    ("de", "German"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("ud", "Urdu"),
    ("zh", "Chinese"),
];

/// Extra targets for translation and AI summaries that the news endpoint
/// cannot filter by.
const TRANSLATION_ONLY_LANGUAGES: &[(&str, &str)] = &[("ja", "Japanese"), ("ko", "Korean")];

fn lookup(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Name of a news endpoint language; `None` for codes it rejects.
pub fn language_name(code: &str) -> Option<&'static str> {
    lookup(LANGUAGES, code)
}

pub fn translation_language_name(code: &str) -> Option<&'static str> {
    language_name(code).or_else(|| lookup(TRANSLATION_ONLY_LANGUAGES, code))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_api_key: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_api_key: None,
            language: default_language(),
        }
    }
}

impl Settings {
    /// Missing or unreadable files fall back to defaults.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "[Settings] Failed to read settings");
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&text) {
            Ok(mut settings) => {
                settings.news_api_key = settings
                    .news_api_key
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty());
                if language_name(&settings.language).is_none() {
                    settings.language = default_language();
                }
                tracing::debug!(path = %path.display(), "[Settings] Loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "[Settings] Malformed settings file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut stored = self.clone();
        stored.news_api_key = stored
            .news_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let json = serde_json::to_string_pretty(&stored).context("Failed to encode settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "[Settings] Settings persisted");
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/newsdesk`, falling back to `$HOME/.config/newsdesk`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR)
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

pub fn logs_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("logs")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    ApiKey,
    Language,
}

/// Editable copy of the settings shown in the settings popup.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsForm {
    pub api_key: String,
    pub language: String,
    pub focus: SettingsField,
    pub reveal_key: bool,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.news_api_key.clone().unwrap_or_default(),
            language: settings.language.clone(),
            focus: SettingsField::ApiKey,
            reveal_key: false,
        }
    }

    pub fn to_settings(&self) -> Settings {
        let key = self.api_key.trim();
        Settings {
            news_api_key: (!key.is_empty()).then(|| key.to_string()),
            language: self.language.clone(),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SettingsField::ApiKey => SettingsField::Language,
            SettingsField::Language => SettingsField::ApiKey,
        };
    }

    pub fn cycle_language(&mut self, delta: isize) {
        let len = LANGUAGES.len() as isize;
        let idx = LANGUAGES
            .iter()
            .position(|(code, _)| *code == self.language)
            .unwrap_or(0) as isize;
        let next = (idx + delta).rem_euclid(len);
        self.language = LANGUAGES[next as usize].0.to_string();
    }

    pub fn push_char(&mut self, c: char) {
        if self.focus == SettingsField::ApiKey && !c.is_control() {
            self.api_key.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.focus == SettingsField::ApiKey {
            self.api_key.pop();
        }
    }

    pub fn clear_key(&mut self) {
        self.api_key.clear();
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal_key = !self.reveal_key;
    }

    /// The key as it should appear on screen.
    pub fn display_key(&self) -> String {
        if self.reveal_key {
            self.api_key.clone()
        } else {
            "•".repeat(self.api_key.chars().count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn save_then_load_keeps_key_and_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(&dir.path().join("nested"));
        let settings = Settings {
            news_api_key: Some("  abc123  ".to_string()),
            language: "de".to_string(),
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.news_api_key.as_deref(), Some("abc123"));
        assert_eq!(loaded.language, "de");
    }

    #[test]
    fn empty_key_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());
        Settings {
            news_api_key: Some("   ".to_string()),
            language: "fr".to_string(),
        }
        .save(&path)
        .unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("news_api_key"));
        assert_eq!(Settings::load(&path).news_api_key, None);
    }

    #[test]
    fn malformed_or_unknown_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());

        fs::write(&path, r#"{"language":"xx"}"#).unwrap();
        assert_eq!(Settings::load(&path).language, "en");

        fs::write(&path, r#"{"language":"ko"}"#).unwrap();
        assert_eq!(Settings::load(&path).language, "en");
    }

    #[test]
    fn news_languages_exclude_translation_only_targets() {
        assert_eq!(language_name("ud"), Some("Urdu"));
        assert_eq!(language_name("ko"), None);
        assert_eq!(language_name("ja"), None);
        assert_eq!(translation_language_name("ko"), Some("Korean"));
        assert_eq!(translation_language_name("DE"), Some("German"));
        assert_eq!(translation_language_name("xx"), None);
    }

    #[test]
    fn language_cycle_never_reaches_translation_only_codes() {
        let mut form = SettingsForm::from_settings(&Settings::default());
        form.focus = SettingsField::Language;
        for _ in 0..LANGUAGES.len() * 2 {
            form.cycle_language(1);
            assert!(language_name(&form.language).is_some(), "{}", form.language);
        }
        assert_eq!(form.language, "en");
    }

    #[test]
    fn form_edits_key_and_cycles_language() {
        let mut form = SettingsForm::from_settings(&Settings::default());
        form.push_char('k');
        form.push_char('1');
        assert_eq!(form.display_key(), "••");
        form.toggle_reveal();
        assert_eq!(form.display_key(), "k1");

        form.toggle_focus();
        form.push_char('x');
        assert_eq!(form.api_key, "k1");
        form.cycle_language(-1);
        assert_eq!(form.language, "zh");
        form.cycle_language(1);
        assert_eq!(form.language, "en");

        form.clear_key();
        assert_eq!(form.to_settings().news_api_key, None);
    }
}
