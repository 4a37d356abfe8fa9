//! Aho-Corasick automaton over byte strings.
//!
//! ## Architecture
//!
//! - `alphabet`: maps the bytes used by the patterns to dense table columns
//! - `builder`: trie insertion, failure function and output propagation
//! - `search`: the single-pass scan
//! - `index`: integer widths for state identifiers
//! - `error`: construction and search errors
//!
//! ## Layout
//!
//! The transition table is one contiguous array of `state_count * alphabet_len`
//! cells. Row 0 is the root, whose row is complete (missing bytes loop back to
//! the root). All other rows hold only trie edges; anything else is resolved
//! through the failure function at scan time.
//!
//! A built [`Automaton`] is immutable. It is `Send + Sync`, so any number of
//! threads may search through a shared reference at once.

pub mod alphabet;
pub mod builder;
pub mod error;
pub mod index;
pub mod search;
pub mod types;

pub use alphabet::Alphabet;
pub use builder::AutomatonBuilder;
pub use error::{BuildError, ErrorKind, SearchError};
pub use index::{Slot, StateIndex};
pub use search::FindIter;
pub use types::{AutomatonStats, Match, PatternSet};

use std::ops::Range;

/// Build an automaton with the default `u32` state width.
pub fn build<I, P>(patterns: I) -> Result<Automaton, BuildError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    AutomatonBuilder::<u32>::new().build(patterns)
}

/// A built, immutable Aho-Corasick automaton.
#[derive(Debug, Clone)]
pub struct Automaton<S: StateIndex = u32> {
    pub(crate) alphabet: Alphabet,
    /// Row-major transition table, one row of `alphabet.len()` cells per state
    pub(crate) table: Box<[Slot<S>]>,
    /// Failure link per state; the root links to itself
    pub(crate) failure: Box<[S]>,
    /// Pattern ids reported on entering each state, inherited ones included
    pub(crate) outputs: Box<[Box<[S]>]>,
    pub(crate) patterns: PatternSet,
}

impl<S: StateIndex> Automaton<S> {
    /// Number of states, including the root.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.failure.len()
    }

    /// Number of table columns.
    #[inline]
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// The bytes of pattern `id`.
    pub fn pattern(&self, id: usize) -> Option<&[u8]> {
        self.patterns.get(id)
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The table cell for `state` on `byte`.
    ///
    /// `None` if the byte has no column or the cell is empty. On the root,
    /// every byte with a column answers, possibly with the root itself.
    pub fn transition(&self, state: usize, byte: u8) -> Option<usize> {
        let column = self.alphabet.column(byte)?;
        if state >= self.state_count() {
            return None;
        }
        self.table[state * self.alphabet.len() + column]
            .get()
            .map(S::as_usize)
    }

    /// Failure link of `state`. The root reports itself.
    pub fn failure(&self, state: usize) -> Option<usize> {
        self.failure.get(state).map(|s| s.as_usize())
    }

    /// Pattern ids completed on entering `state`.
    pub fn outputs(&self, state: usize) -> &[S] {
        self.outputs.get(state).map(|o| &o[..]).unwrap_or(&[])
    }

    /// Byte range of a match in the text it was found in.
    ///
    /// `m` is expected to come from this automaton. For a hand-built match
    /// whose pattern would start before offset 0, the range is clamped to 0.
    pub fn span(&self, m: &Match) -> Range<usize> {
        let len = self.patterns.get(m.pattern).map_or(0, |p| p.len());
        let end = m.end + 1;
        end.saturating_sub(len)..end
    }

    pub fn stats(&self) -> AutomatonStats {
        let index_bytes = std::mem::size_of::<S>();
        let output_entries: usize = self.outputs.iter().map(|o| o.len()).sum();
        let memory_bytes = self.table.len() * index_bytes
            + self.failure.len() * index_bytes
            + self.outputs.len() * std::mem::size_of::<Box<[S]>>()
            + output_entries * index_bytes
            + self.patterns.total_bytes();

        AutomatonStats {
            patterns: self.pattern_count(),
            states: self.state_count(),
            alphabet_len: self.alphabet_len(),
            table_cells: self.table.len(),
            filled_cells: self.table.iter().filter(|c| !c.is_empty()).count(),
            index_bytes,
            output_entries,
            max_outputs: self.outputs.iter().map(|o| o.len()).max().unwrap_or(0),
            max_pattern_len: self.patterns.max_len(),
            memory_bytes,
        }
    }
}
