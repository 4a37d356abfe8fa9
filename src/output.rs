//! Output formatting for scan results

use crate::automaton::{Automaton, StateIndex};
use crate::scan::{FileMatch, FileReport};
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// How a matched pattern is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternLabel {
    /// The pattern's bytes, lossily decoded as UTF-8
    Text,
    /// The pattern's identifier
    Id,
}

fn pattern_text<S: StateIndex>(automaton: &Automaton<S>, id: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(automaton.pattern(id).unwrap_or_default())
}

/// Print matches as `path:line:end:pattern`, one per line
pub fn print_matches<W: WriteColor, S: StateIndex>(
    out: &mut W,
    automaton: &Automaton<S>,
    reports: &[FileReport],
    label: PatternLabel,
) -> io::Result<()> {
    for report in reports {
        for m in &report.matches {
            print_match_line(out, automaton, &report.path.display().to_string(), m, label)?;
        }
    }
    Ok(())
}

fn print_match_line<W: WriteColor, S: StateIndex>(
    out: &mut W,
    automaton: &Automaton<S>,
    path: &str,
    m: &FileMatch,
    label: PatternLabel,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(out, "{}", path)?;
    out.reset()?;
    write!(out, ":")?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", m.line)?;
    out.reset()?;
    write!(out, ":{}:", m.end)?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    match label {
        PatternLabel::Text => write!(out, "{}", pattern_text(automaton, m.pattern))?,
        PatternLabel::Id => write!(out, "{}", m.pattern)?,
    }
    out.reset()?;

    writeln!(out)
}

/// One match as emitted by `--json`
#[derive(Debug, Serialize)]
struct JsonMatch<'a> {
    path: &'a str,
    pattern_id: usize,
    pattern: Cow<'a, str>,
    start: usize,
    end: usize,
    line: usize,
}

/// Print matches as JSON lines
pub fn print_json<W: Write, S: StateIndex>(
    out: &mut W,
    automaton: &Automaton<S>,
    reports: &[FileReport],
) -> io::Result<()> {
    for report in reports {
        let path = report.path.to_string_lossy();
        for m in &report.matches {
            let record = JsonMatch {
                path: &path,
                pattern_id: m.pattern,
                pattern: pattern_text(automaton, m.pattern),
                start: m.start,
                end: m.end,
                line: m.line,
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Total matches per pattern, indexed by pattern id
pub fn count_by_pattern<S: StateIndex>(automaton: &Automaton<S>, reports: &[FileReport]) -> Vec<usize> {
    let mut counts = vec![0usize; automaton.pattern_count()];
    for m in reports.iter().flat_map(|r| &r.matches) {
        counts[m.pattern] += 1;
    }
    counts
}

/// Print `pattern:count` for every pattern that matched at least once
pub fn print_counts<W: WriteColor, S: StateIndex>(
    out: &mut W,
    automaton: &Automaton<S>,
    reports: &[FileReport],
    label: PatternLabel,
) -> io::Result<()> {
    let counts = count_by_pattern(automaton, reports);

    for (id, count) in counts.into_iter().enumerate().filter(|(_, c)| *c > 0) {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        match label {
            PatternLabel::Text => write!(out, "{}", pattern_text(automaton, id))?,
            PatternLabel::Id => write!(out, "{}", id)?,
        }
        out.reset()?;
        write!(out, ":")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", count)?;
        out.reset()?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build;
    use crate::scan::{ScanOptions, Scanner};
    use std::path::{Path, PathBuf};
    use termcolor::NoColor;

    fn reports(ac: &Automaton, text: &[u8]) -> Vec<FileReport> {
        let scanner = Scanner::new(ac, ScanOptions::default());
        vec![scanner.scan_reader(Path::new("input.txt"), text).unwrap()]
    }

    fn render(f: impl FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_print_matches_text_and_ids() {
        let ac = build(["his", "hers"]).unwrap();
        let reports = reports(&ac, b"ahishers");

        let text = render(|out| print_matches(out, &ac, &reports, PatternLabel::Text));
        assert_eq!(text, "input.txt:1:3:his\ninput.txt:1:7:hers\n");

        let ids = render(|out| print_matches(out, &ac, &reports, PatternLabel::Id));
        assert_eq!(ids, "input.txt:1:3:0\ninput.txt:1:7:1\n");
    }

    #[test]
    fn test_print_json() {
        let ac = build(["b"]).unwrap();
        let reports = vec![FileReport {
            path: PathBuf::from("a.txt"),
            matches: vec![FileMatch { pattern: 0, start: 1, end: 1, line: 1 }],
            skipped: None,
        }];

        let mut out = Vec::new();
        print_json(&mut out, &ac, &reports).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "path": "a.txt",
                "pattern_id": 0,
                "pattern": "b",
                "start": 1,
                "end": 1,
                "line": 1
            })
        );
    }

    #[test]
    fn test_print_counts() {
        let ac = build(["a", "b", "zzz"]).unwrap();
        let reports = reports(&ac, b"abab a");

        assert_eq!(count_by_pattern(&ac, &reports), vec![3, 2, 0]);
        let text = render(|out| print_counts(out, &ac, &reports, PatternLabel::Text));
        assert_eq!(text, "a:3\nb:2\n");
    }
}
