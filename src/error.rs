use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the CoreNLP data manager
#[derive(Error, Debug)]
pub enum DataManagerError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Unsupported language code '{code}'{hint}\n\nSupported codes: {supported}")]
    UnknownLanguage {
        code: String,
        hint: String,
        supported: String,
    },

    #[error("Failed to create target directory {}: {source}\n\nTroubleshooting:\n- Check write permissions on the parent directory\n- Verify the path is not an existing regular file", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download error: {0}\n\nTroubleshooting:\n- Check internet connection\n- Verify that repo1.maven.org is reachable\n- Try increasing download.timeout_secs in config")]
    Download(String),

    #[error("Failed to write data manager output {}: {source}\n\nTroubleshooting:\n- Check write permissions on the output directory\n- Downloaded archives were kept and will be reused on the next run", .path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/corenlp-models/config.toml\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DataManagerError>;
