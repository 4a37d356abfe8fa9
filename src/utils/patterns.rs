use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Split a pattern file into patterns: one per line, `\r\n` tolerated,
/// blank lines skipped
pub fn parse_pattern_lines(content: &[u8]) -> Vec<Vec<u8>> {
    content
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| line.to_vec())
        .collect()
}

/// Gather patterns from command-line expressions followed by an optional file
pub fn load_patterns(expressions: &[String], file: Option<&Path>) -> Result<Vec<Vec<u8>>> {
    let mut patterns: Vec<Vec<u8>> = expressions.iter().map(|e| e.as_bytes().to_vec()).collect();

    if let Some(path) = file {
        let content = fs::read(path)
            .with_context(|| format!("Failed to read pattern file {}", path.display()))?;
        patterns.extend(parse_pattern_lines(&content));
    }

    if patterns.is_empty() {
        anyhow::bail!("No patterns given. Use -e PATTERN or -f FILE.");
    }

    Ok(patterns)
}
