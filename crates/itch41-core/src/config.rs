//! Configuration parsing for feed consumers.
//!
//! Settings come from a single JSON config file describing where the
//! captured feed lives and how to read it.
//!
//! # Example config
//!
//! ```json
//! {
//!   "source": "11092013.NASDAQ_ITCH41",
//!   "chunk_size": 1024,
//!   "message_types": ["A", "T"],
//!   "output": "Itch.dat",
//!   "fatal_errors": false,
//!   "log_level": "info",
//!   "log_dir": "/tmp/itch-logs"
//! }
//! ```

use serde::Deserialize;

/// Default read chunk size for the frame reader's buffered refills.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Feed-consumer configuration, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Path of the captured feed file to read.
    pub source: String,

    /// Read chunk size in bytes (default: 1024).
    pub chunk_size: Option<usize>,

    /// Allow-list of message type codes to retain (e.g. `["A", "F"]`).
    /// Absent means keep everything.
    pub message_types: Option<Vec<String>>,

    /// Optional path for re-serialized output.
    pub output: Option<String>,

    /// Abort the whole run on the first frame error instead of skipping.
    pub fatal_errors: Option<bool>,

    /// Stop after this many delivered messages.
    pub limit: Option<u64>,

    /// Default log level when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Optional directory for daily-rotating log files.
    pub log_dir: Option<String>,
}

impl FeedConfig {
    /// Effective chunk size, falling back to [`DEFAULT_CHUNK_SIZE`].
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    pub fn is_fatal_errors(&self) -> bool {
        self.fatal_errors.unwrap_or(false)
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<FeedConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: FeedConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config: FeedConfig = serde_json::from_str(r#"{ "source": "feed.dat" }"#).unwrap();
        assert_eq!(config.source, "feed.dat");
        assert_eq!(config.effective_chunk_size(), DEFAULT_CHUNK_SIZE);
        assert!(!config.is_fatal_errors());
        assert!(config.message_types.is_none());
    }

    #[test]
    fn full_config() {
        let config: FeedConfig = serde_json::from_str(
            r#"{
                "source": "feed.dat",
                "chunk_size": 64,
                "message_types": ["A", "F"],
                "output": "out.dat",
                "fatal_errors": true,
                "limit": 100
            }"#,
        )
        .unwrap();
        assert_eq!(config.effective_chunk_size(), 64);
        assert!(config.is_fatal_errors());
        assert_eq!(config.message_types.as_deref(), Some(&["A".to_string(), "F".to_string()][..]));
        assert_eq!(config.limit, Some(100));
    }
}
