//! Application configuration loaded from TOML

use crate::error::{FxProfitError, Result};
use crate::types::DEFAULT_BASE_CURRENCY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default central bank daily feed; `{date}` becomes `dd/mm/yyyy`
pub const DEFAULT_CBR_URL_FORMAT: &str =
    "https://www.cbr.ru/scripts/XML_daily_eng.asp?date_req={date}";

/// Top level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registry key of the rate source to use
    #[serde(default = "default_source")]
    pub source: String,
    /// Name printed after money amounts
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Append diagnostics to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub cbr: CbrConfig,
    #[serde(default)]
    pub csv: CsvConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CbrConfig {
    #[serde(default = "default_cbr_url_format")]
    pub url_format: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_source() -> String {
    "cbr".to_string()
}

fn default_base_currency() -> String {
    DEFAULT_BASE_CURRENCY.to_string()
}

fn default_cbr_url_format() -> String {
    DEFAULT_CBR_URL_FORMAT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            base_currency: default_base_currency(),
            log_file: None,
            cbr: CbrConfig::default(),
            csv: CsvConfig::default(),
        }
    }
}

impl Default for CbrConfig {
    fn default() -> Self {
        Self {
            url_format: default_cbr_url_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| FxProfitError::ConfigError(e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| FxProfitError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Load `explicit` if given (it must exist and parse), otherwise
    /// `fallback` when it exists, otherwise defaults.
    ///
    /// A broken fallback file does not fail the load: defaults are returned
    /// together with the error that made the file unusable. Configuration is
    /// read before logging is set up, so reporting it is left to the caller.
    pub fn load(
        explicit: Option<&Path>,
        fallback: Option<&Path>,
    ) -> Result<(Self, Option<FxProfitError>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, None));
        }

        match fallback {
            Some(path) if path.exists() => match Self::from_file(path) {
                Ok(config) => Ok((config, None)),
                Err(e) => Ok((Self::default(), Some(e))),
            },
            _ => Ok((Self::default(), None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source, "cbr");
        assert_eq!(config.base_currency, "RUB");
        assert_eq!(config.cbr.timeout_secs, 30);
        assert!(config.cbr.url_format.contains("{date}"));
        assert!(config.csv.path.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            source = "csv"

            [csv]
            path = "rates.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.source, "csv");
        assert_eq!(config.csv.path, Some(PathBuf::from("rates.csv")));
        assert_eq!(config.base_currency, "RUB");
        assert_eq!(config.cbr, CbrConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml("source = [").unwrap_err();
        assert!(matches!(err, FxProfitError::ConfigError(_)));
    }

    #[test]
    fn test_load_precedence() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_currency = \"USD\"").unwrap();

        let (explicit, ignored) = AppConfig::load(Some(file.path()), None).unwrap();
        assert_eq!(explicit.base_currency, "USD");
        assert!(ignored.is_none());

        let (fallback, ignored) = AppConfig::load(None, Some(file.path())).unwrap();
        assert_eq!(fallback.base_currency, "USD");
        assert!(ignored.is_none());

        let missing = Path::new("/definitely/not/here.toml");
        assert!(AppConfig::load(Some(missing), None).is_err());
        let (config, ignored) = AppConfig::load(None, Some(missing)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(ignored.is_none());
    }

    #[test]
    fn test_broken_fallback_reports_its_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "source = [").unwrap();

        let (config, ignored) = AppConfig::load(None, Some(file.path())).unwrap();
        assert_eq!(config, AppConfig::default());
        let err = ignored.expect("broken fallback should be reported");
        assert!(matches!(err, FxProfitError::ConfigError(_)));
        assert!(err.to_string().contains(&file.path().display().to_string()));

        assert!(AppConfig::load(Some(file.path()), None).is_err());
    }
}
