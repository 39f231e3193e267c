use crate::config::{DownloadConfig, ProgressMode};
use crate::error::{DataManagerError, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

/// Bytes transferred so far, and the advertised length if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub downloaded: u64,
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Percentage complete, capped at 100; 0 when the length is unknown
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        match self.total {
            Some(total) if total > 0 => (self.downloaded as f64 / total as f64 * 100.0).min(100.0),
            _ => 0.0,
        }
    }
}

/// Called synchronously after every chunk written to disk
pub type ProgressCallback<'a> = &'a (dyn Fn(DownloadProgress) + Send + Sync);

/// Fetches a model archive to a local path
///
/// Failures are reported, never raised: `false` means the destination may
/// hold a partial file and must not be trusted.
#[async_trait]
pub trait ModelFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> bool;
}

/// Streaming HTTP downloader with progress reporting
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    progress: ProgressMode,
}

impl HttpFetcher {
    /// Create new downloader from config
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            progress: config.progress,
        })
    }

    /// Stream `url` into `dest`, overwriting it, and return the byte count
    pub async fn download_with_callback(
        &self,
        url: &str,
        dest: &Path,
        callback: ProgressCallback<'_>,
    ) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataManagerError::Download(format!("GET {url}: {e}")))?;

        let status = response.status();
        tracing::debug!("GET {url} -> {status}");
        if !status.is_success() {
            return Err(DataManagerError::Download(format!("GET {url}: HTTP {status}")));
        }

        let total = response.content_length();
        let mut file = tokio::fs::File::create(dest).await?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                DataManagerError::Download(format!(
                    "transfer interrupted after {}: {e}",
                    format_bytes(downloaded)
                ))
            })?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            callback(DownloadProgress { downloaded, total });
        }

        file.flush().await?;

        if let Some(total) = total.filter(|t| downloaded < *t) {
            return Err(DataManagerError::Download(format!(
                "connection closed after {} of {}",
                format_bytes(downloaded),
                format_bytes(total)
            )));
        }

        Ok(downloaded)
    }
}

#[async_trait]
impl ModelFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> bool {
        println!("Downloading from {url}");
        println!("Saving to {}", dest.display());

        let reporter = ProgressReporter::new(self.progress);
        let result = self
            .download_with_callback(url, dest, &|p| reporter.update(p))
            .await;

        match result {
            Ok(bytes) => {
                reporter.finish();
                tracing::info!("Downloaded {} to {}", format_bytes(bytes), dest.display());
                println!("Download complete!");
                true
            }
            Err(e) => {
                reporter.abandon();
                tracing::error!("Download of {url} failed: {e}");
                eprintln!("Error downloading file: {e}");
                false
            }
        }
    }
}

/// Renders [`DownloadProgress`] according to the configured mode
enum ProgressReporter {
    Bar(ProgressBar),
    Log { last_step: AtomicU64 },
    Silent,
}

/// Log mode granularity when the length is unknown
const LOG_STEP_BYTES: u64 = 10 * 1024 * 1024;

impl ProgressReporter {
    fn new(mode: ProgressMode) -> Self {
        Self::for_terminal(mode, std::io::stderr().is_terminal())
    }

    /// indicatif hides bars without a terminal, so Galaxy jobs get log lines
    fn for_terminal(mode: ProgressMode, stderr_is_tty: bool) -> Self {
        match mode {
            ProgressMode::Bar if !stderr_is_tty => Self::Log {
                last_step: AtomicU64::new(0),
            },
            ProgressMode::Bar => {
                let pb = ProgressBar::new(0);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {bytes}/{total_bytes} ({bytes_per_sec})")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓░"),
                );
                Self::Bar(pb)
            }
            ProgressMode::Log => Self::Log {
                last_step: AtomicU64::new(0),
            },
            ProgressMode::Silent => Self::Silent,
        }
    }

    fn update(&self, progress: DownloadProgress) {
        match self {
            Self::Bar(pb) => {
                if let Some(total) = progress.total {
                    if pb.length() != Some(total) {
                        pb.set_length(total);
                    }
                }
                pb.set_position(progress.downloaded);
            }
            Self::Log { .. } => {
                if let Some(line) = self.progress_line(progress) {
                    println!("{line}");
                }
            }
            Self::Silent => {}
        }
    }

    /// Log mode line for `progress`, once per step
    fn progress_line(&self, progress: DownloadProgress) -> Option<String> {
        let Self::Log { last_step } = self else {
            return None;
        };

        let step = log_step(progress);
        if step <= last_step.load(Ordering::Relaxed) {
            return None;
        }
        last_step.store(step, Ordering::Relaxed);

        Some(format!(
            "Progress: {:.1}% ({})",
            progress.percent(),
            format_bytes(progress.downloaded)
        ))
    }

    fn finish(&self) {
        if let Self::Bar(pb) = self {
            pb.finish();
        }
    }

    fn abandon(&self) {
        if let Self::Bar(pb) = self {
            pb.abandon();
        }
    }
}

/// Which reporting step `progress` falls in: tenths of the total, or
/// fixed-size byte blocks when the total is unknown
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn log_step(progress: DownloadProgress) -> u64 {
    match progress.total {
        Some(total) if total > 0 => (progress.percent() / 10.0) as u64,
        _ => progress.downloaded / LOG_STEP_BYTES,
    }
}

/// Format bytes as human-readable string
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
