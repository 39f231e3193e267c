use crate::models::manager::DownloadRequest;
use crate::models::registry::ModelInfo;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "corenlp-models")]
#[command(version, about = "Download and register CoreNLP language models", long_about = None)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .multiple(true)
        .args(["language", "common_models"])
))]
pub struct Cli {
    /// Language code of a model to download (can be specified multiple times)
    #[arg(long, value_name = "CODE", value_parser = parse_language)]
    pub language: Vec<&'static ModelInfo>,

    /// Download the common models JAR (required for coreference)
    #[arg(long)]
    pub common_models: bool,

    /// Directory to store the downloaded model JARs
    #[arg(long, value_name = "DIR")]
    pub target_directory: PathBuf,

    /// JSON output file for the Galaxy data manager
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Existing data table file, used to skip already registered models
    #[arg(long, value_name = "FILE")]
    pub data_table: Option<PathBuf>,

    /// Config file (defaults to ~/.config/corenlp-models/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    #[must_use]
    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest {
            common_models: self.common_models,
            languages: self.language.clone(),
            target_dir: self.target_directory.clone(),
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_language(code: &str) -> Result<&'static ModelInfo, String> {
    ModelInfo::lookup(code).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const REQUIRED: [&str; 5] = [
        "corenlp-models",
        "--target-directory",
        "/data/corenlp",
        "--output",
        "out.json",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(REQUIRED.iter().chain(extra))
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_languages_keep_order() {
        let cli = parse(&["--language", "fr", "--language", "en", "--common-models"]).unwrap();
        let codes: Vec<&str> = cli.language.iter().map(|m| m.code).collect();
        assert_eq!(codes, vec!["fr", "en"]);

        let request = cli.download_request();
        assert!(request.common_models);
        assert_eq!(request.languages.len(), 2);
        assert_eq!(request.target_dir, PathBuf::from("/data/corenlp"));
    }

    #[test]
    fn test_common_models_alone() {
        let cli = parse(&["--common-models"]).unwrap();
        assert!(cli.language.is_empty());
        assert!(cli.data_table.is_none());
    }

    #[test]
    fn test_requires_a_selection() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_rejects_unknown_language() {
        let err = parse(&["--language", "xx"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Unsupported language code 'xx'"));
    }

    #[test]
    fn test_requires_target_and_output() {
        let err = Cli::try_parse_from(["corenlp-models", "--common-models"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["--common-models"]).unwrap().log_level(), "warn");
        assert_eq!(parse(&["--common-models", "-vv"]).unwrap().log_level(), "debug");
        assert_eq!(parse(&["--common-models", "-vvvv"]).unwrap().log_level(), "trace");
    }
}
