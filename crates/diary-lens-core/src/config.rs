use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_dir: PathBuf,
    pub extract: ExtractConfig,
    pub frontmatter: FrontmatterConfig,
    pub classifier: ClassifierConfig,
    pub store: StoreConfig,
    pub dashboard: DashboardConfig,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("diary"),
            extract: ExtractConfig::default(),
            frontmatter: FrontmatterConfig::default(),
            classifier: ClassifierConfig::default(),
            store: StoreConfig::default(),
            dashboard: DashboardConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// What to do with a diary file that does not split into enough segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the whole run on the first malformed file.
    #[default]
    Abort,
    /// Log the file and continue with the rest.
    Skip,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub delimiter: String,
    pub previous_entry_marker: String,
    pub on_malformed: MalformedPolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            delimiter: "---".to_string(),
            previous_entry_marker: "昨日のエントリ".to_string(),
            on_malformed: MalformedPolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontmatterConfig {
    pub workout_menu_key: String,
    pub created_at_key: String,
}

impl Default for FrontmatterConfig {
    fn default() -> Self {
        Self {
            workout_menu_key: "ジムメニュー".to_string(),
            created_at_key: "作成日時".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Offline keyword model, no model files needed.
    Lexicon,
    #[default]
    Onnx,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub backend: ClassifierBackend,
    pub max_tokens: usize,
    pub model_path: PathBuf,
    pub tokenizer_path: PathBuf,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::Onnx,
            max_tokens: 512,
            model_path: PathBuf::from("models/multilingual-sentiment/model.onnx"),
            tokenizer_path: PathBuf::from("models/multilingual-sentiment/tokenizer.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub staging_path: PathBuf,
    pub csv_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("output/diary.sqlite3"),
            staging_path: PathBuf::from("output/raw_contents.json"),
            csv_path: PathBuf::from("output/raw_contents.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Month numbers (1-12) dropped from every dashboard aggregation.
    pub excluded_months: Vec<u32>,
    /// Start of the overall completion span. Derived from the data when unset.
    pub summary_start: Option<NaiveDate>,
    /// End (inclusive) of the overall completion span. Derived from the data when unset.
    pub summary_end: Option<NaiveDate>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            excluded_months: vec![1, 8],
            summary_start: None,
            summary_end: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive. `TRACING_LEVEL` takes precedence when set.
    pub level: String,
    pub file_path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: PathBuf::from("logs/diary-lens.log"),
        }
    }
}

/// Load configuration from an optional `Config.toml` in the working directory,
/// overridden by `DIARY__*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("DIARY")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("dashboard.excluded_months"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_diary_layout() {
        let config = AppConfig::default();
        assert_eq!(config.extract.delimiter, "---");
        assert_eq!(config.extract.on_malformed, MalformedPolicy::Abort);
        assert_eq!(config.classifier.max_tokens, 512);
        assert_eq!(config.classifier.backend, ClassifierBackend::Onnx);
        assert_eq!(config.dashboard.excluded_months, vec![1, 8]);
        assert!(config.dashboard.summary_start.is_none());
        assert_eq!(config.log.file_path, PathBuf::from("logs/diary-lens.log"));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                r#"
                source_dir = "/tmp/diary"

                [extract]
                on_malformed = "skip"

                [classifier]
                backend = "lexicon"

                [log]
                file_path = "/var/log/diary.log"

                [dashboard]
                excluded_months = []
                summary_start = "2024-09-01"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.source_dir, PathBuf::from("/tmp/diary"));
        assert_eq!(config.extract.on_malformed, MalformedPolicy::Skip);
        assert_eq!(config.classifier.backend, ClassifierBackend::Lexicon);
        assert_eq!(config.classifier.max_tokens, 512);
        assert_eq!(config.extract.previous_entry_marker, "昨日のエントリ");
        assert!(config.dashboard.excluded_months.is_empty());
        assert_eq!(config.log.file_path, PathBuf::from("/var/log/diary.log"));
        assert_eq!(config.log.level, "info");
        assert_eq!(
            config.dashboard.summary_start,
            NaiveDate::from_ymd_opt(2024, 9, 1)
        );
        assert_eq!(config.store.csv_path, PathBuf::from("output/raw_contents.csv"));
    }
}
