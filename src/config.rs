//! Configuration management for innsync.
//!
//! Configuration is optional. A missing config file means defaults, which
//! point at the Wandering Inn table of contents and word-count service and
//! write into the current directory.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Application name used for config directory.
const APP_NAME: &str = "innsync";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the data comes from.
    pub sources: SourcesConfig,

    /// HTTP client settings.
    pub http: HttpConfig,

    /// Where the data goes.
    pub output: OutputConfig,
}

/// Source endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// HTML table-of-contents page.
    pub table_of_contents_url: String,

    /// JSON word-count endpoint.
    pub word_count_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            table_of_contents_url:
                "https://wanderinginn.com/table-of-contents/?compare=audio,ebook".to_string(),
            word_count_url: "https://innwords.pallandor.com/components/wordcount?min_chapter=1.00&max_chapter=Latest&format=json".to_string(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with both requests.
    pub user_agent: String,

    /// Per-request timeout in seconds. 0 disables the timeout.
    pub timeout_sec: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            timeout_sec: 60,
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory both files are written to.
    pub directory: PathBuf,

    /// File name of the chapter index.
    pub chapters_file: String,

    /// File name of the word-count map.
    pub word_count_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            chapters_file: "wandering-inn-chapters.json".to_string(),
            word_count_file: "wandering-inn-wordcount.json".to_string(),
        }
    }
}

impl OutputConfig {
    /// Full path of the chapter index.
    pub fn chapters_path(&self) -> PathBuf {
        self.directory.join(&self.chapters_file)
    }

    /// Full path of the word-count map.
    pub fn word_count_path(&self) -> PathBuf {
        self.directory.join(&self.word_count_file)
    }
}

impl Config {
    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// Without a config file the defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(
            "sources.table_of_contents_url",
            &self.sources.table_of_contents_url,
        )?;
        validate_url("sources.word_count_url", &self.sources.word_count_url)?;

        for (key, name) in [
            ("output.chapters_file", &self.output.chapters_file),
            ("output.word_count_file", &self.output.word_count_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.output.chapters_file == self.output.word_count_file {
            return Err(ConfigError::InvalidValue {
                key: "output.word_count_file".to_string(),
                message: "must differ from output.chapters_file".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http.timeout_sec, 60);
        assert_eq!(
            config.output.chapters_path(),
            PathBuf::from("./wandering-inn-chapters.json")
        );
        assert!(config.sources.table_of_contents_url.contains("table-of-contents"));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [output]
            directory = "data"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.directory, PathBuf::from("data"));
        assert_eq!(config.output.word_count_file, "wandering-inn-wordcount.json");
        assert_eq!(config.http.timeout_sec, 60);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[sources]\nword_count_url = \"http://localhost:8080/words\"\n[http]\ntimeout_sec = 0"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.sources.word_count_url, "http://localhost:8080/words");
        assert_eq!(config.http.timeout_sec, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output\ndirectory = ").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = Config::default();
        config.sources.table_of_contents_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "sources.table_of_contents_url"
        ));

        let mut config = Config::default();
        config.sources.word_count_url = "ftp://example.com/words".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_files_must_differ() {
        let mut config = Config::default();
        config.output.word_count_file = config.output.chapters_file.clone();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.chapters_file = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
