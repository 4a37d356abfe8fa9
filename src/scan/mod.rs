//! Scanning files with a shared automaton.
//!
//! The automaton is immutable once built, so one instance serves every
//! worker: files are memory-mapped and searched in parallel on a rayon pool,
//! each search producing its own match list.

pub mod walker;

pub use walker::{WalkOptions, collect_files};

use crate::automaton::{Automaton, SearchError, StateIndex};
use crate::utils::{AppConfig, LineIndex, is_binary};
use anyhow::{Context, Result};
use memmap2::Mmap;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// Options for a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,
    /// Skip files that look binary
    pub skip_binary: bool,
    /// Worker threads
    pub threads: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ScanOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            skip_binary: config.skip_binary,
            threads: config.effective_threads(),
        }
    }
}

/// A match located within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileMatch {
    /// Pattern identifier
    pub pattern: usize,
    /// Byte offset of the first byte of the occurrence
    pub start: usize,
    /// Byte offset of the last byte of the occurrence
    pub end: usize,
    /// 1-based line of the last byte
    pub line: usize,
}

/// Why a file was not searched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooLarge(u64),
    Binary,
    Unreadable(String),
}

/// Result of scanning one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub matches: Vec<FileMatch>,
    pub skipped: Option<SkipReason>,
}

impl FileReport {
    fn skipped(path: &Path, reason: SkipReason) -> Self {
        Self {
            path: path.to_path_buf(),
            matches: Vec::new(),
            skipped: Some(reason),
        }
    }
}

/// Totals over a set of reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files_searched: usize,
    pub files_matched: usize,
    pub files_skipped: usize,
    pub files_unreadable: usize,
    pub matches: usize,
}

impl ScanSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match &report.skipped {
                None => {
                    summary.files_searched += 1;
                    if !report.matches.is_empty() {
                        summary.files_matched += 1;
                    }
                    summary.matches += report.matches.len();
                }
                Some(SkipReason::Unreadable(_)) => summary.files_unreadable += 1,
                Some(_) => summary.files_skipped += 1,
            }
        }
        summary
    }
}

/// Searches content with one automaton
pub struct Scanner<'a, S: StateIndex = u32> {
    automaton: &'a Automaton<S>,
    options: ScanOptions,
}

impl<'a, S: StateIndex> Scanner<'a, S> {
    pub fn new(automaton: &'a Automaton<S>, options: ScanOptions) -> Self {
        Self { automaton, options }
    }

    pub fn automaton(&self) -> &'a Automaton<S> {
        self.automaton
    }

    /// Search `content` and attach line numbers to each match
    pub fn scan_bytes(&self, content: &[u8]) -> Result<Vec<FileMatch>, SearchError> {
        let matches = self.automaton.search(content)?;
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let lines = LineIndex::new(content);
        let mut located = Vec::new();
        located.try_reserve_exact(matches.len())?;
        located.extend(matches.iter().map(|m| FileMatch {
            pattern: m.pattern,
            start: self.automaton.span(m).start,
            end: m.end,
            line: lines.line_of(m.end),
        }));
        Ok(located)
    }

    /// Read `reader` to the end and scan it
    pub fn scan_reader<R: Read>(&self, label: &Path, mut reader: R) -> Result<FileReport> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .context("Failed to read input")?;
        let matches = self.scan_bytes(&content)?;
        Ok(FileReport {
            path: label.to_path_buf(),
            matches,
            skipped: None,
        })
    }

    /// Scan one file, mapping it into memory
    pub fn scan_file(&self, path: &Path) -> FileReport {
        match self.try_scan_file(path) {
            Ok(report) => report,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not scan file");
                FileReport::skipped(path, SkipReason::Unreadable(format!("{:#}", e)))
            }
        }
    }

    fn try_scan_file(&self, path: &Path) -> Result<FileReport> {
        let file = File::open(path).context("Failed to open file")?;
        let size = file.metadata().context("Failed to read metadata")?.len();

        if size > self.options.max_file_size {
            trace!(path = %path.display(), size, "skipping large file");
            return Ok(FileReport::skipped(path, SkipReason::TooLarge(size)));
        }

        // Zero-length files cannot be mapped on every platform
        let mmap;
        let content: &[u8] = if size == 0 {
            &[]
        } else {
            // SAFETY: the map is read-only and dropped before this function returns.
            // Concurrent truncation by another process is outside our control,
            // the same caveat every mmap-based search tool carries.
            mmap = unsafe { Mmap::map(&file) }.context("Failed to map file")?;
            &mmap[..]
        };

        if self.options.skip_binary && is_binary(content) {
            trace!(path = %path.display(), "skipping binary file");
            return Ok(FileReport::skipped(path, SkipReason::Binary));
        }

        let matches = self.scan_bytes(content)?;
        trace!(path = %path.display(), matches = matches.len(), "scanned file");

        Ok(FileReport {
            path: path.to_path_buf(),
            matches,
            skipped: None,
        })
    }

    /// Scan files in parallel. Reports come back in the order of `files`.
    pub fn scan_files(&self, files: &[PathBuf]) -> Result<Vec<FileReport>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .build()
            .context("Failed to start worker threads")?;

        Ok(pool.install(|| files.par_iter().map(|path| self.scan_file(path)).collect()))
    }
}
