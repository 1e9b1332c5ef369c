//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dtree/dtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `DTREE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// How interactive answers are read from the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Single keypress (raw terminal mode); falls back to `line` when stdin is not a TTY
    #[default]
    Key,
    /// First non-blank character of a line
    Line,
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key" => Ok(InputMode::Key),
            "line" => Ok(InputMode::Line),
            other => Err(format!("invalid input mode: {other} (expected key or line)")),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub affirmative: Option<char>,
    pub prompt_suffix: Option<String>,
    pub input_mode: Option<InputMode>,
    pub strict_input: Option<bool>,
    pub seed: Option<u64>,
}

/// Unified configuration for dtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Character accepted as "yes" (case-insensitive)
    pub affirmative: char,
    /// Appended to every interactive question
    pub prompt_suffix: String,
    /// Keypress or line based answers
    pub input_mode: InputMode,
    /// Treat closed or failing input as an error instead of "no"
    pub strict_input: bool,
    /// Seed for random decisions (default: OS entropy)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            affirmative: 'y',
            prompt_suffix: " (Y/N)".to_string(),
            input_mode: InputMode::default(),
            strict_input: false,
            seed: None,
        }
    }
}

/// Get the XDG config directory for dtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base); overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            affirmative: overlay.affirmative.unwrap_or(self.affirmative),
            prompt_suffix: overlay
                .prompt_suffix
                .clone()
                .unwrap_or_else(|| self.prompt_suffix.clone()),
            input_mode: overlay.input_mode.unwrap_or(self.input_mode),
            strict_input: overlay.strict_input.unwrap_or(self.strict_input),
            seed: overlay.seed.or(self.seed),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply DTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("affirmative") {
            settings.affirmative = parse_affirmative(&val)?;
        }
        if let Ok(val) = config.get_string("prompt_suffix") {
            settings.prompt_suffix = val;
        }
        if let Ok(val) = config.get_string("input_mode") {
            settings.input_mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        match config.get_bool("strict_input") {
            Ok(val) => settings.strict_input = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => {
                return Err(ApplicationError::Config {
                    message: format!("DTREE_STRICT_INPUT: {e}"),
                })
            }
        }
        if let Ok(val) = config.get_string("seed") {
            settings.seed = Some(val.trim().parse().map_err(|e| ApplicationError::Config {
                message: format!("DTREE_SEED: {e}"),
            })?);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dtree/dtree.toml
#   File:   dtree --config <file>
#   Env:    DTREE_* environment variables (e.g. DTREE_SEED=42)

# Character accepted as "yes" (case-insensitive); anything else means "no"
# affirmative = "y"

# Appended to every question
# prompt_suffix = " (Y/N)"

# "key" reads a single keypress, "line" reads a whole line
# input_mode = "key"

# Fail instead of answering "no" when input is closed or unreadable
# strict_input = false

# Seed for random decisions (omit for OS entropy)
# seed = 42
"#
        .to_string()
    }
}

fn parse_affirmative(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("affirmative must be a single character, got {value:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_match_classic_prompt() {
        let settings = Settings::default();
        assert_eq!(settings.affirmative, 'y');
        assert_eq!(settings.prompt_suffix, " (Y/N)");
        assert_eq!(settings.input_mode, InputMode::Key);
        assert!(!settings.strict_input);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            seed: Some(7),
            input_mode: Some(InputMode::Line),
            ..Default::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.seed, Some(7));
        assert_eq!(merged.input_mode, InputMode::Line);
        assert_eq!(merged.affirmative, 'y');
        assert_eq!(merged.prompt_suffix, " (Y/N)");
    }

    #[test]
    fn given_multi_char_affirmative_when_parsing_then_config_error() {
        assert_eq!(parse_affirmative(" j ").unwrap(), 'j');
        assert!(matches!(
            parse_affirmative("yes"),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_input_mode_strings_when_parsing_then_case_insensitive() {
        assert_eq!("KEY".parse::<InputMode>().unwrap(), InputMode::Key);
        assert_eq!("line".parse::<InputMode>().unwrap(), InputMode::Line);
        assert!("mouse".parse::<InputMode>().is_err());
    }

    #[test]
    fn given_settings_when_rendering_toml_then_roundtrips_through_raw() {
        let settings = Settings {
            seed: Some(42),
            ..Default::default()
        };
        let rendered = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&rendered).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.affirmative.is_none());
    }
}
