//! Configuration loading and typed config structures for a contest run.
//!
//! The configuration lives in `contest-config.yaml` at the project root.
//! Every section is optional; a missing section takes its defaults.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level contest configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContestConfig {
    /// The contest itself.
    #[serde(default)]
    pub contest: ContestSection,

    /// People taking part, in enrollment order.
    #[serde(default)]
    pub participants: Vec<ParticipantEntry>,

    /// Where ratings come from during the voting session.
    #[serde(default)]
    pub ratings: RatingsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ContestConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `CONTEST_TOPIC` overrides `contest.topic`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::var("CONTEST_TOPIC").ok());
    }

    /// Apply an explicit topic override, if any.
    pub fn apply_overrides(&mut self, topic: Option<String>) {
        if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
            self.contest.topic = topic;
        }
    }

    /// Entries that register before applications close.
    pub fn on_time(&self) -> impl Iterator<Item = &ParticipantEntry> {
        self.participants
            .iter()
            .filter(|e| e.register && !e.late)
    }

    /// Entries that try to register after applications closed.
    pub fn late(&self) -> impl Iterator<Item = &ParticipantEntry> {
        self.participants.iter().filter(|e| e.register && e.late)
    }
}

/// Contest-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContestSection {
    /// The contest topic.
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl Default for ContestSection {
    fn default() -> Self {
        Self {
            topic: default_topic(),
        }
    }
}

/// One participant as written in the config file.
///
/// Contact details go either in `email`/`phone` or in a single free-form
/// `contact` string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParticipantEntry {
    /// Display name.
    pub name: String,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number, in any common formatting.
    #[serde(default)]
    pub phone: Option<String>,

    /// Free-form contact; an email if it contains `@`, a phone otherwise.
    #[serde(default)]
    pub contact: Option<String>,

    /// Artifact identifier to submit after registering.
    #[serde(default)]
    pub artifact: Option<String>,

    /// Whether the participant registers at all.
    #[serde(default = "default_register")]
    pub register: bool,

    /// Whether the participant only tries to register after applications
    /// have closed.
    #[serde(default)]
    pub late: bool,
}

/// Which rating source the voting session reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingSourceKind {
    /// Use `ratings.values`, in order.
    #[default]
    Scripted,
    /// Prompt on stdout and read one line per rating from stdin.
    Stdin,
}

/// Rating input configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RatingsConfig {
    /// The source kind.
    #[serde(default)]
    pub source: RatingSourceKind,

    /// Raw values handed out by the scripted source.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_topic() -> String {
    "Photo contest".to_owned()
}

const fn default_register() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ContestConfig::default();
        assert_eq!(config.contest.topic, "Photo contest");
        assert!(config.participants.is_empty());
        assert_eq!(config.ratings.source, RatingSourceKind::Scripted);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
contest:
  topic: "Mountains"

participants:
  - name: Ann
    email: ann@mail.ru
    artifact: peak.jpg
  - name: Bob
    contact: "8 (922) 422-44-21"
  - name: Cid
    register: false
  - name: Dee
    late: true

ratings:
  source: stdin
  values: ["3", "5"]

logging:
  level: debug
"#;
        let config = ContestConfig::parse(yaml).unwrap();
        assert_eq!(config.participants.len(), 4);

        let ann = config.participants.first().unwrap();
        assert_eq!(ann.email.as_deref(), Some("ann@mail.ru"));
        assert_eq!(ann.artifact.as_deref(), Some("peak.jpg"));
        assert!(ann.register);
        assert!(!ann.late);

        assert_eq!(config.ratings.source, RatingSourceKind::Stdin);
        assert_eq!(config.ratings.values, vec!["3".to_owned(), "5".to_owned()]);
        assert_eq!(config.logging.level, "debug");

        let on_time: Vec<&str> = config.on_time().map(|e| e.name.as_str()).collect();
        assert_eq!(on_time, vec!["Ann", "Bob"]);
        let late: Vec<&str> = config.late().map(|e| e.name.as_str()).collect();
        assert_eq!(late, vec!["Dee"]);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = ContestConfig::parse("logging:\n  level: warn\n").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(config.participants.is_empty());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(ContestConfig::parse("").is_ok());
    }

    #[test]
    fn unknown_rating_source_is_rejected() {
        let result = ContestConfig::parse("ratings:\n  source: oracle\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn participant_without_name_is_rejected() {
        let result = ContestConfig::parse("participants:\n  - email: a@b.ru\n");
        assert!(result.is_err());
    }

    #[test]
    fn topic_override_replaces_configured_topic() {
        let mut config = ContestConfig::default();
        config.apply_overrides(Some("Lakes".to_owned()));
        assert_eq!(config.contest.topic, "Lakes");
        config.apply_overrides(Some("   ".to_owned()));
        assert_eq!(config.contest.topic, "Lakes");
        config.apply_overrides(None);
        assert_eq!(config.contest.topic, "Lakes");
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("contest-config.yaml");
        if path.exists() {
            let config = ContestConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ContestConfig::from_file(Path::new("/nonexistent/contest-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
