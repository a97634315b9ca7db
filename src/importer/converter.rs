// ==========================================
// Container Scan Reconciliation - Conversion Job Runner
// ==========================================
// Flow per submission:
//   1. stage the uploaded files into <temp_root>/<date>/
//   2. run the configured external conversion command with the
//      date and staged directory as arguments
//   3. read the @@@DONE:YYYY-MM-DD completion marker from stdout
//   4. remove the staged directory on every exit path
//
// The marker, not the exit status alone, decides success: the
// pipeline signals which output date it actually wrote.
// ==========================================

use crate::importer::error::{ImporterError, ImporterResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};

const DONE_MARKER: &str = "@@@DONE:";

/// Seam for the external conversion pipeline.
#[async_trait]
pub trait OrderFileConverter: Send + Sync {
    /// Run the conversion for `date` over the staged upload files.
    /// Returns the date the pipeline reports having written.
    async fn convert(&self, date: NaiveDate, staged_dir: &Path) -> ImporterResult<NaiveDate>;
}

/// Converter that shells out to a configured command, e.g.
/// `node run-all.js <date> <staged_dir>`.
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl OrderFileConverter for CommandConverter {
    async fn convert(&self, date: NaiveDate, staged_dir: &Path) -> ImporterResult<NaiveDate> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(date.format("%Y-%m-%d").to_string())
            .arg(staged_dir)
            .output()
            .await
            .map_err(|e| ImporterError::SpawnError(e.to_string()))?;

        if !output.status.success() {
            return Err(ImporterError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_done_marker(&stdout).ok_or(ImporterError::MissingCompletionMarker)
    }
}

/// Extract the completed date from conversion output.
pub fn parse_done_marker(stdout: &str) -> Option<NaiveDate> {
    let start = stdout.find(DONE_MARKER)? + DONE_MARKER.len();
    let raw = stdout.get(start..start + 10)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Stage uploaded files into a per-date temp directory, run the
/// converter, and clean the staging directory up afterwards whether
/// the job succeeded or not.
pub async fn stage_and_convert(
    converter: &dyn OrderFileConverter,
    date: NaiveDate,
    files: &[PathBuf],
    temp_root: &Path,
) -> ImporterResult<NaiveDate> {
    let staged_dir = temp_root.join(date.format("%Y-%m-%d").to_string());
    stage_files(files, &staged_dir)?;

    let result = converter.convert(date, &staged_dir).await;
    cleanup_staged(&staged_dir);

    match &result {
        Ok(done_date) => info!(date = %done_date, "order file conversion finished"),
        Err(e) => warn!(date = %date, error = %e, "order file conversion failed"),
    }
    result
}

fn stage_files(files: &[PathBuf], staged_dir: &Path) -> ImporterResult<()> {
    std::fs::create_dir_all(staged_dir)
        .map_err(|e| ImporterError::StagingError(e.to_string()))?;

    for file in files {
        let name = file
            .file_name()
            .ok_or_else(|| ImporterError::FileNotFound(file.display().to_string()))?;
        std::fs::copy(file, staged_dir.join(name)).map_err(|e| {
            ImporterError::StagingError(format!("{}: {}", file.display(), e))
        })?;
    }
    Ok(())
}

fn cleanup_staged(staged_dir: &Path) {
    if let Err(e) = std::fs::remove_dir_all(staged_dir) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(dir = %staged_dir.display(), error = %e, "failed to remove staging dir");
        }
    }
}
