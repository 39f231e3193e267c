//! Configuration module for corenlp-models
//!
//! Loads config from an explicit `--config` path, or from
//! `$XDG_CONFIG_HOME/corenlp-models/config.toml` (`~/.config/...` on Linux).
//! Falls back to embedded defaults if the file doesn't exist.
//! Partial configs are merged with defaults using serde's default attributes.
//!
//! # Example
//!
//! ```no_run
//! use corenlp_models::config::Config;
//!
//! let config = Config::load(None).expect("Failed to load config");
//! println!("Timeout: {}s", config.download.timeout_secs);
//! ```

pub mod schema;

pub use schema::{Config, DownloadConfig, ProgressMode};
