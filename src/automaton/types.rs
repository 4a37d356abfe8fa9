use serde::{Deserialize, Serialize};

/// One occurrence of a pattern in a searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    /// Identifier of the matched pattern (its position in the pattern set)
    pub pattern: usize,
    /// Index of the last byte of the occurrence
    pub end: usize,
}

/// Owned copy of the pattern set, indexed by pattern identifier.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Box<[Box<[u8]>]>,
}

impl PatternSet {
    pub(crate) fn new(patterns: Vec<Box<[u8]>>) -> Self {
        Self {
            patterns: patterns.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&[u8]> {
        self.patterns.get(id).map(|p| &p[..])
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.patterns.iter().map(|p| &p[..])
    }

    /// Length of the longest pattern
    pub fn max_len(&self) -> usize {
        self.patterns.iter().map(|p| p.len()).max().unwrap_or(0)
    }

    /// Total bytes across all patterns
    pub fn total_bytes(&self) -> usize {
        self.patterns.iter().map(|p| p.len()).sum()
    }
}

/// Size figures for a built automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonStats {
    /// Number of patterns
    pub patterns: usize,
    /// Number of states, including the root
    pub states: usize,
    /// Distinct bytes used by the patterns (table width)
    pub alphabet_len: usize,
    /// Cells in the transition table (states x alphabet)
    pub table_cells: usize,
    /// Cells holding an explicit transition
    pub filled_cells: usize,
    /// Width of one state identifier in bytes
    pub index_bytes: usize,
    /// Pattern ids across all output sets, inherited ones included
    pub output_entries: usize,
    /// Largest output set of any state
    pub max_outputs: usize,
    /// Length of the longest pattern in bytes
    pub max_pattern_len: usize,
    /// Approximate heap usage of table, failure function and outputs
    pub memory_bytes: usize,
}
