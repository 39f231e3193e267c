use crate::error::{DataManagerError, Result};
use crate::models::download::ModelFetcher;
use crate::models::existing::ExistingEntries;
use crate::models::manifest::{DataManagerOutput, DataTableEntry};
use crate::models::registry::ModelInfo;
use std::fs;
use std::path::{Path, PathBuf};

const BANNER_WIDTH: usize = 60;

/// What to download and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub common_models: bool,
    pub languages: Vec<&'static ModelInfo>,
    pub target_dir: PathBuf,
}

impl DownloadRequest {
    /// Reject requests that select nothing
    pub fn validate(&self) -> Result<()> {
        if !self.common_models && self.languages.is_empty() {
            return Err(DataManagerError::Usage(
                "At least one of --language or --common-models must be specified".to_string(),
            ));
        }
        Ok(())
    }
}

/// What happened to one requested identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Listed in the existing data table; nothing fetched or registered
    AlreadyRegistered,
    /// JAR was already on disk; registered without fetching
    AlreadyPresent,
    Downloaded,
    /// Fetch failed but the entry was registered anyway (common models)
    DownloadFailedRegistered,
    /// Fetch failed and no entry was produced (languages)
    DownloadFailedOmitted,
}

impl Outcome {
    #[must_use]
    pub const fn is_registered(self) -> bool {
        matches!(
            self,
            Self::AlreadyPresent | Self::Downloaded | Self::DownloadFailedRegistered
        )
    }
}

/// Entries registered during a run, plus the per-identifier outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub entries: Vec<DataTableEntry>,
    pub outcomes: Vec<(&'static str, Outcome)>,
}

impl RunReport {
    /// Outcome for an identifier, if it was requested
    #[must_use]
    pub fn outcome(&self, code: &str) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, o)| *o)
    }

    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }

    #[must_use]
    pub fn into_output(self) -> DataManagerOutput {
        DataManagerOutput::new(self.entries)
    }
}

/// How a failed fetch is treated
///
/// Common models are registered even when their download fails, languages
/// are dropped. Kept as-is so existing Galaxy installs see the same tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnFailure {
    Register,
    Omit,
}

/// Downloads requested models and collects their data table entries
pub struct ModelManager<F> {
    fetcher: F,
    existing: ExistingEntries,
}

impl<F: ModelFetcher> ModelManager<F> {
    /// Create new model manager
    pub fn new(fetcher: F, existing: ExistingEntries) -> Self {
        Self { fetcher, existing }
    }

    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Process common models first, then languages in request order
    pub async fn run(&self, request: &DownloadRequest) -> Result<RunReport> {
        request.validate()?;
        ensure_target_dir(&request.target_dir)?;

        let mut report = RunReport::default();

        if request.common_models {
            self.process(ModelInfo::common(), &request.target_dir, OnFailure::Register, &mut report)
                .await?;
        }

        for model in request.languages.iter().copied() {
            self.process(model, &request.target_dir, OnFailure::Omit, &mut report)
                .await?;
        }

        tracing::info!(
            "Registered {} of {} requested models",
            report.entries.len(),
            report.outcomes.len()
        );

        Ok(report)
    }

    async fn process(
        &self,
        model: &'static ModelInfo,
        target_dir: &Path,
        on_failure: OnFailure,
        report: &mut RunReport,
    ) -> Result<()> {
        if self.existing.contains(model.code) {
            tracing::info!("{} already registered, skipping", model.code);
            banner(&format!("Skipping {} - already in data table", model.name));
            report.outcomes.push((model.code, Outcome::AlreadyRegistered));
            return Ok(());
        }

        let label = label(model);
        banner(&format!("Processing {label}..."));

        let jar_path = model.target_path(target_dir);
        let outcome = if jar_path.exists() {
            tracing::info!("{} already on disk, not downloading", jar_path.display());
            println!("Model already exists at {}", jar_path.display());
            Outcome::AlreadyPresent
        } else if self.fetcher.fetch(model.url, &jar_path).await {
            println!("Successfully downloaded {}", model.name);
            Outcome::Downloaded
        } else {
            tracing::warn!("Failed to download {label} from {}", model.url);
            eprintln!("WARNING: Failed to download {label}");
            match on_failure {
                OnFailure::Register => Outcome::DownloadFailedRegistered,
                OnFailure::Omit => Outcome::DownloadFailedOmitted,
            }
        };

        report.outcomes.push((model.code, outcome));
        if !outcome.is_registered() {
            return Ok(());
        }

        let entry = DataTableEntry::for_model(model, &jar_path)?;
        println!("Successfully registered {label}");
        println!("  Value: {}", entry.value);
        println!("  Language code: {}", entry.lang_code);
        println!("  Path: {}", entry.models_path);
        report.entries.push(entry);

        Ok(())
    }
}

/// Create the target directory and any missing parents
pub fn ensure_target_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| DataManagerError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}

/// Print a line framed by `=` rules
pub fn banner(message: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!("\n{rule}");
    println!("{message}");
    println!("{rule}");
}

fn label(model: &ModelInfo) -> String {
    if model.is_common() {
        model.name.to_string()
    } else {
        format!("{} model", model.name)
    }
}
