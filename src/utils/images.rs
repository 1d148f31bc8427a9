use crate::error::{Error, Result};
use crate::sku::table::Table;
use crate::sku::DownloadTask;
use crate::utils::files::{ensure_output_dir, write_atomically};
use crate::utils::http::fetch_bytes;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Pause after every fetch attempt so the remote host is not hammered
pub const DEFAULT_DELAY: Duration = Duration::from_millis(10);

/// What to do when a row cannot be parsed or an image cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Stop the run at the first failure
    #[default]
    Abort,
    /// Log the failure and move on to the next image
    Continue,
}

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,
    pub delay: Duration,
    pub policy: FailurePolicy,
}

impl DownloadOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            delay: DEFAULT_DELAY,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Result of a single download task
#[derive(Debug)]
pub enum TaskOutcome {
    Downloaded { path: PathBuf, bytes: usize },
    SkippedBlank,
    SkippedExisting { path: PathBuf },
    Failed(Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped_blank: usize,
    pub skipped_existing: usize,
    pub failed: usize,
    pub malformed_rows: usize,
    pub bytes: usize,
}

/// Run one task: skip blanks and existing targets, otherwise fetch and write.
///
/// Never returns early with an error; failures come back as
/// [`TaskOutcome::Failed`] so the caller decides whether to stop.
pub async fn fetch_task(
    client: &reqwest::Client,
    task: &DownloadTask<'_>,
    options: &DownloadOptions,
) -> TaskOutcome {
    if task.is_blank() {
        return TaskOutcome::SkippedBlank;
    }

    let target = options.output_dir.join(task.file_name());
    if target.is_file() {
        return TaskOutcome::SkippedExisting { path: target };
    }

    let result = fetch_bytes(client, task.request_url())
        .await
        .and_then(|bytes| write_atomically(&target, &bytes).map(|()| bytes.len()));

    tokio::time::sleep(options.delay).await;

    match result {
        Ok(bytes) => TaskOutcome::Downloaded {
            path: target,
            bytes,
        },
        Err(e) => TaskOutcome::Failed(e),
    }
}

/// Download every image of every record in `table`, one at a time
pub async fn download_images(
    client: &reqwest::Client,
    table: &Table,
    options: &DownloadOptions,
) -> Result<DownloadSummary> {
    ensure_output_dir(&options.output_dir)?;

    tracing::info!(
        rows = table.len(),
        output = %options.output_dir.display(),
        "downloading images from {}",
        table.path().display()
    );

    let pb = ProgressBar::new(table.len() as u64);
    pb.set_style(progress_style());

    let mut summary = DownloadSummary::default();

    for record in table.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => match options.policy {
                FailurePolicy::Abort => {
                    pb.abandon();
                    return Err(e);
                }
                FailurePolicy::Continue => {
                    tracing::warn!("Skipping row: {}", e);
                    summary.malformed_rows += 1;
                    pb.inc(1);
                    continue;
                }
            },
        };

        for task in record.tasks() {
            if !task.is_blank() {
                let name = task.file_name();
                pb.suspend(|| println!("{}", name));
            }

            match fetch_task(client, &task, options).await {
                TaskOutcome::Downloaded { path, bytes } => {
                    tracing::debug!(path = %path.display(), bytes, "downloaded");
                    summary.downloaded += 1;
                    summary.bytes += bytes;
                }
                TaskOutcome::SkippedBlank => {
                    tracing::debug!(
                        row = task.row_index,
                        image = task.image_index,
                        "blank URL"
                    );
                    summary.skipped_blank += 1;
                }
                TaskOutcome::SkippedExisting { path } => {
                    tracing::debug!(path = %path.display(), "already exists");
                    summary.skipped_existing += 1;
                }
                TaskOutcome::Failed(e) => {
                    summary.failed += 1;
                    match options.policy {
                        FailurePolicy::Abort => {
                            pb.abandon();
                            return Err(e);
                        }
                        FailurePolicy::Continue => tracing::warn!("{}", e),
                    }
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Download complete!");
    Ok(summary)
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}
