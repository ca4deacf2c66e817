//! Exchange rate sources
//!
//! - **cbr**: Central Bank of Russia daily XML feed (feature `cbr`)
//! - **csv_file**: offline CSV file of daily quotes
//! - **in_memory**: preloaded series, for tests and embedding
//! - **exploding**: testing stub that panics when fetched
//!
//! Sources are looked up by key in a [`SourceRegistry`] built at startup.

#[cfg(feature = "cbr")]
pub mod cbr;
pub mod csv_file;
pub mod exploding;
pub mod in_memory;

#[cfg(feature = "cbr")]
pub use cbr::CbrRateSource;
pub use csv_file::CsvRateSource;
pub use exploding::ExplodingRateSource;
pub use in_memory::InMemoryRateSource;

use crate::config::AppConfig;
use crate::error::{FxProfitError, Result};
use crate::series::RateSeries;
use crate::types::TradeDate;
use hashbrown::HashMap;
use std::sync::Arc;

/// A provider of daily rate series
pub trait RateSource: Send + Sync {
    /// Fetch one series per currency covering every day in `[start, end]`.
    ///
    /// Malformed entries are skipped, not reported. An `Err` means the source
    /// itself could not be reached or read.
    fn fetch(&self, start: TradeDate, end: TradeDate) -> Result<Vec<RateSeries>>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Registry mapping configuration keys to rate sources
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn RateSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Registry with every source `config` enables
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut registry = Self::new();

        #[cfg(feature = "cbr")]
        registry.register("cbr", CbrRateSource::from_config(&config.cbr)?);

        if let Some(path) = &config.csv.path {
            registry.register("csv", CsvRateSource::new(path));
        }

        Ok(registry)
    }

    /// Register a source under `key`, replacing any previous one
    pub fn register<S: RateSource + 'static>(&mut self, key: impl Into<String>, source: S) {
        self.sources.insert(key.into(), Arc::new(source));
    }

    /// Get a registered source
    pub fn get(&self, key: &str) -> Option<Arc<dyn RateSource>> {
        self.sources.get(key).cloned()
    }

    /// Get a registered source or explain which keys exist
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn RateSource>> {
        self.get(key).ok_or_else(|| {
            FxProfitError::ConfigError(format!(
                "Unknown rate source '{}' (available: {})",
                key,
                self.keys().join(", ")
            ))
        })
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sources.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
