//! File discovery for directory scans.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Options controlling which files a walk yields
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Descend into hidden files and directories
    pub hidden: bool,
    /// Only yield files whose path relative to the walk root matches one of these
    pub globs: Vec<String>,
}

/// Compile glob patterns into a single matcher, `None` if there are none
fn build_glob_set(globs: &[String]) -> Result<Option<GlobSet>> {
    if globs.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        builder.add(Glob::new(glob).with_context(|| format!("Invalid glob: {}", glob))?);
    }
    Ok(Some(builder.build().context("Failed to compile globs")?))
}

/// Collect the files under `roots`, honoring .gitignore files.
///
/// A root that is itself a file is yielded as-is, without glob filtering.
/// Output is sorted per root so repeated scans report in the same order.
pub fn collect_files(roots: &[PathBuf], options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let globs = build_glob_set(&options.globs)?;
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.exists() {
            anyhow::bail!("No such file or directory: {}", root.display());
        }

        let walker = WalkBuilder::new(root)
            .hidden(!options.hidden)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        let mut found: Vec<PathBuf> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| matches_globs(globs.as_ref(), root, path))
            .collect();
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn matches_globs(globs: Option<&GlobSet>, root: &Path, path: &Path) -> bool {
    let Some(globs) = globs else {
        return true;
    };
    let rel_path = path.strip_prefix(root).unwrap_or(path);
    globs.is_match(rel_path)
}
