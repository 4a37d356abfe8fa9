//! Scanning text with a built automaton.
//!
//! The scan keeps a single current state. For each byte it resolves the next
//! state through the failure chain and reports the outputs of that state, so
//! matches come out in ascending order of their end index.

use super::Automaton;
use super::error::SearchError;
use super::index::StateIndex;
use super::types::Match;

const ROOT: usize = 0;

impl<S: StateIndex> Automaton<S> {
    /// State reached from `state` on `byte`.
    ///
    /// Bytes outside the alphabet restart at the root. Otherwise the failure
    /// chain is followed until a state with an explicit transition is found;
    /// the root always has one.
    #[inline]
    pub(crate) fn next_state(&self, mut state: usize, byte: u8) -> usize {
        let Some(column) = self.alphabet.column(byte) else {
            return ROOT;
        };
        let width = self.alphabet.len();
        loop {
            if let Some(next) = self.table[state * width + column].get() {
                return next.as_usize();
            }
            state = self.failure[state].as_usize();
        }
    }

    /// Every occurrence of every pattern in `text`.
    ///
    /// Matches are ordered by end index. Matches sharing an end index follow
    /// the state's output set: patterns ending exactly there in insertion
    /// order, then those inherited through failure links.
    pub fn search(&self, text: &[u8]) -> Result<Vec<Match>, SearchError> {
        let mut matches = Vec::new();
        for m in self.find_iter(text) {
            matches.try_reserve(1)?;
            matches.push(m);
        }
        Ok(matches)
    }

    /// Lazily iterate over the matches [`Automaton::search`] would return.
    pub fn find_iter<'a, 't>(&'a self, text: &'t [u8]) -> FindIter<'a, 't, S> {
        FindIter {
            automaton: self,
            text,
            pos: 0,
            state: ROOT,
            pending: &[],
        }
    }

    /// Whether any pattern occurs in `text`.
    pub fn is_match(&self, text: &[u8]) -> bool {
        let mut state = ROOT;
        for &byte in text {
            state = self.next_state(state, byte);
            if !self.outputs[state].is_empty() {
                return true;
            }
        }
        false
    }
}

/// Iterator over the matches in one text. See [`Automaton::find_iter`].
#[derive(Debug, Clone)]
pub struct FindIter<'a, 't, S: StateIndex> {
    automaton: &'a Automaton<S>,
    text: &'t [u8],
    /// Index of the next byte to consume
    pos: usize,
    state: usize,
    /// Outputs of the current state not yet yielded
    pending: &'a [S],
}

impl<S: StateIndex> Iterator for FindIter<'_, '_, S> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            if let Some((&pattern, rest)) = self.pending.split_first() {
                self.pending = rest;
                return Some(Match {
                    pattern: pattern.as_usize(),
                    end: self.pos - 1,
                });
            }

            let &byte = self.text.get(self.pos)?;
            self.state = self.automaton.next_state(self.state, byte);
            self.pending = &self.automaton.outputs[self.state];
            self.pos += 1;
        }
    }
}
