use crate::error::{Result, StripError};
use crate::stripper::pattern::DocCommentPattern;
use crate::ui::GracefulShutdown;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Rewritten { replacements: usize },
    WouldRewrite { replacements: usize },
    Unchanged,
}

/// A file that could not be processed, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Per-file notification handed to the caller while a run progresses.
#[derive(Debug)]
pub enum FileEvent<'a> {
    Processed { path: &'a Path, replacements: usize },
    WouldProcess { path: &'a Path, replacements: usize },
    Failed(&'a FileFailure),
}

#[derive(Debug, Clone, Serialize)]
pub struct StripReport {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub files_unchanged: usize,
    pub replacements: usize,
    pub errors: Vec<FileFailure>,
    pub cancelled: bool,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl StripReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            files_scanned: 0,
            files_rewritten: 0,
            files_unchanged: 0,
            replacements: 0,
            errors: Vec::new(),
            cancelled: false,
            dry_run,
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Rewritten { replacements } | FileOutcome::WouldRewrite { replacements } => {
                self.files_rewritten += 1;
                self.replacements += replacements;
            }
            FileOutcome::Unchanged => self.files_unchanged += 1,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Reads, rewrites and conditionally saves qualifying files, one at a time.
pub struct Stripper {
    pattern: DocCommentPattern,
    dry_run: bool,
}

impl Stripper {
    pub fn new(pattern: DocCommentPattern) -> Self {
        Self {
            pattern,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Processes a single file. The file is written back only when the
    /// substitution changed its text, so untouched files keep their mtime.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let bytes = fs::read(path).map_err(|source| StripError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let original = String::from_utf8(bytes).map_err(|source| StripError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let stripped = self.pattern.strip(&original);
        if !stripped.is_changed(&original) {
            return Ok(FileOutcome::Unchanged);
        }

        let replacements = stripped.replacements;
        if self.dry_run {
            return Ok(FileOutcome::WouldRewrite { replacements });
        }

        fs::write(path, stripped.content.as_bytes()).map_err(|source| StripError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(FileOutcome::Rewritten { replacements })
    }

    /// Drives the whole run. Failures are reported and recorded but never stop
    /// the loop; a shutdown request stops it before the next file is opened.
    pub fn run<I, F>(&self, files: I, shutdown: &GracefulShutdown, mut observer: F) -> StripReport
    where
        I: IntoIterator<Item = PathBuf>,
        F: FnMut(FileEvent<'_>),
    {
        let start = Instant::now();
        let mut report = StripReport::new(self.dry_run);

        for path in files {
            if !shutdown.is_running() {
                report.cancelled = true;
                break;
            }

            report.files_scanned += 1;
            match self.process_file(&path) {
                Ok(outcome) => {
                    report.record(outcome);
                    match outcome {
                        FileOutcome::Rewritten { replacements } => {
                            observer(FileEvent::Processed {
                                path: &path,
                                replacements,
                            })
                        }
                        FileOutcome::WouldRewrite { replacements } => {
                            observer(FileEvent::WouldProcess {
                                path: &path,
                                replacements,
                            })
                        }
                        FileOutcome::Unchanged => {}
                    }
                }
                Err(err) => {
                    let failure = FileFailure {
                        message: err.to_string(),
                        path,
                    };
                    observer(FileEvent::Failed(&failure));
                    report.errors.push(failure);
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}
