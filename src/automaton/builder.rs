//! Automaton construction.
//!
//! Building happens in three passes over a growable trie:
//! 1. Insert every pattern, allocating one state per new prefix
//! 2. Point every missing root transition back at the root
//! 3. Walk the trie breadth-first, computing each state's failure link and
//!    copying the failure target's outputs into the state
//!
//! Missing transitions below the root stay empty. The scan resolves them
//! through the failure chain, which keeps the table at one row per trie node.

use super::Automaton;
use super::alphabet::Alphabet;
use super::error::BuildError;
use super::index::{Slot, StateIndex};
use super::types::PatternSet;
use std::collections::VecDeque;
use std::marker::PhantomData;
use tracing::debug;

const ROOT: usize = 0;

/// Builds an [`Automaton`] whose states are numbered with `S`.
///
/// `u32` is the default and fits any realistic pattern set. Narrower widths
/// shrink the table at the cost of a lower capacity.
#[derive(Debug, Clone, Copy)]
pub struct AutomatonBuilder<S = u32> {
    _index: PhantomData<S>,
}

impl<S: StateIndex> Default for AutomatonBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateIndex> AutomatonBuilder<S> {
    pub fn new() -> Self {
        Self {
            _index: PhantomData,
        }
    }

    /// Build an automaton matching `patterns`.
    ///
    /// Pattern identifiers are positions in the input sequence. Fails if the
    /// set is empty, contains an empty pattern, or needs more patterns or
    /// states than `S` can number.
    pub fn build<I, P>(&self, patterns: I) -> Result<Automaton<S>, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let patterns = collect_patterns::<S, _, _>(patterns)?;
        let alphabet = Alphabet::from_patterns(patterns.iter());

        let mut trie = Trie::<S>::new(alphabet.len())?;
        for (id, pattern) in patterns.iter().enumerate() {
            trie.insert(&alphabet, pattern, S::from_usize(id))?;
        }

        trie.complete_root();
        let failure = trie.link_failures()?;

        let automaton = Automaton {
            alphabet,
            table: trie.table.into_boxed_slice(),
            failure: failure.into_boxed_slice(),
            outputs: trie
                .outputs
                .into_iter()
                .map(Vec::into_boxed_slice)
                .collect(),
            patterns,
        };

        debug!(
            patterns = automaton.pattern_count(),
            states = automaton.state_count(),
            alphabet = automaton.alphabet_len(),
            "built automaton"
        );

        Ok(automaton)
    }
}

/// Copy the caller's patterns, rejecting sets the automaton cannot represent.
fn collect_patterns<S, I, P>(patterns: I) -> Result<PatternSet, BuildError>
where
    S: StateIndex,
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut owned: Vec<Box<[u8]>> = Vec::new();
    for (index, pattern) in patterns.into_iter().enumerate() {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Err(BuildError::EmptyPattern { index });
        }
        owned.try_reserve(1)?;
        owned.push(Box::from(pattern));
    }

    if owned.is_empty() {
        return Err(BuildError::EmptyPatternSet);
    }
    if owned.len() >= S::limit() {
        return Err(BuildError::TooManyPatterns {
            count: owned.len(),
            limit: S::limit(),
        });
    }

    Ok(PatternSet::new(owned))
}

/// Trie under construction. Row `s` of `table` holds the transitions of state `s`.
struct Trie<S> {
    width: usize,
    table: Vec<Slot<S>>,
    outputs: Vec<Vec<S>>,
}

impl<S: StateIndex> Trie<S> {
    /// A trie holding only the root.
    fn new(width: usize) -> Result<Self, BuildError> {
        let mut trie = Self {
            width,
            table: Vec::new(),
            outputs: Vec::new(),
        };
        trie.add_state()?;
        Ok(trie)
    }

    #[inline]
    fn state_count(&self) -> usize {
        self.outputs.len()
    }

    #[inline]
    fn cell(&self, state: usize, column: usize) -> Slot<S> {
        self.table[state * self.width + column]
    }

    /// Append an empty row and return its state id.
    fn add_state(&mut self) -> Result<S, BuildError> {
        let id = self.state_count();
        // The state count itself must stay below the sentinel
        if id + 1 >= S::limit() {
            return Err(BuildError::TooManyStates { limit: S::limit() });
        }

        self.table.try_reserve(self.width)?;
        self.table.resize(self.table.len() + self.width, Slot::EMPTY);
        self.outputs.try_reserve(1)?;
        self.outputs.push(Vec::new());

        Ok(S::from_usize(id))
    }

    /// Follow or create the path for `pattern` and record `id` at its end.
    fn insert(&mut self, alphabet: &Alphabet, pattern: &[u8], id: S) -> Result<(), BuildError> {
        let mut state = ROOT;
        for &byte in pattern {
            let Some(column) = alphabet.column(byte) else {
                unreachable!("alphabet is derived from the pattern set");
            };
            let index = state * self.width + column;
            state = match self.table[index].get() {
                Some(next) => next.as_usize(),
                None => {
                    let next = self.add_state()?;
                    self.table[index] = Slot::to(next);
                    next.as_usize()
                }
            };
        }

        let outputs = &mut self.outputs[state];
        outputs.try_reserve(1)?;
        outputs.push(id);
        Ok(())
    }

    /// Loop every column without a root transition back to the root.
    fn complete_root(&mut self) {
        for cell in &mut self.table[..self.width] {
            if cell.is_empty() {
                *cell = Slot::to(S::ZERO);
            }
        }
    }

    /// Compute the failure function breadth-first and propagate outputs.
    ///
    /// Requires [`Trie::complete_root`] to have run, which is what bounds the
    /// fallback loop: the root answers every column.
    fn link_failures(&mut self) -> Result<Vec<S>, BuildError> {
        let states = self.state_count();

        let mut failure = Vec::new();
        failure.try_reserve_exact(states)?;
        failure.resize(states, S::ZERO);

        // Every non-root state is queued exactly once
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.try_reserve(states)?;

        for column in 0..self.width {
            let child = self.cell(ROOT, column).get().map(S::as_usize);
            if let Some(child) = child.filter(|&c| c != ROOT) {
                failure[child] = S::ZERO;
                queue.push_back(child);
            }
        }

        while let Some(state) = queue.pop_front() {
            for column in 0..self.width {
                let Some(child) = self.cell(state, column).get() else {
                    continue;
                };
                let child = child.as_usize();

                // Longest proper suffix of the child's path that is also a trie path
                let mut fallback = failure[state].as_usize();
                let target = loop {
                    if let Some(next) = self.cell(fallback, column).get() {
                        break next;
                    }
                    fallback = failure[fallback].as_usize();
                };

                failure[child] = target;
                self.inherit_outputs(child, target.as_usize())?;
                queue.push_back(child);
            }
        }

        Ok(failure)
    }

    /// Append the outputs of `src` to those of `dst`.
    fn inherit_outputs(&mut self, dst: usize, src: usize) -> Result<(), BuildError> {
        debug_assert_ne!(dst, src, "a state never fails to itself");
        if self.outputs[src].is_empty() {
            return Ok(());
        }

        let (dst, src) = if src < dst {
            let (left, right) = self.outputs.split_at_mut(dst);
            (&mut right[0], &left[src])
        } else {
            let (left, right) = self.outputs.split_at_mut(src);
            (&mut left[dst], &right[0])
        };

        dst.try_reserve(src.len())?;
        dst.extend_from_slice(src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::ErrorKind;

    /// Follow explicit transitions from the root.
    fn walk<S: StateIndex>(automaton: &Automaton<S>, path: &[u8]) -> usize {
        path.iter().fold(0, |state, &byte| {
            automaton
                .transition(state, byte)
                .unwrap_or_else(|| panic!("no transition on {:?}", byte as char))
        })
    }

    fn outputs<S: StateIndex>(automaton: &Automaton<S>, state: usize) -> Vec<usize> {
        automaton.outputs(state).iter().map(|s| s.as_usize()).collect()
    }

    #[test]
    fn test_state_per_trie_node() {
        let ac = AutomatonBuilder::<u32>::new()
            .build(["he", "she", "his", "hers"])
            .unwrap();
        // root, h, he, her, hers, hi, his, s, sh, she
        assert_eq!(ac.state_count(), 10);
        assert_eq!(ac.alphabet_len(), 5);
        assert_eq!(ac.pattern_count(), 4);
    }

    #[test]
    fn test_shared_prefixes_share_states() {
        let ac = AutomatonBuilder::<u32>::new()
            .build(["abc", "abd", "ab", "abc"])
            .unwrap();
        // root, a, ab, abc, abd
        assert_eq!(ac.state_count(), 5);
        let abc = walk(&ac, b"abc");
        assert_eq!(outputs(&ac, abc), vec![0, 3]);
    }

    #[test]
    fn test_failure_links() {
        let ac = AutomatonBuilder::<u32>::new()
            .build(["he", "she", "his", "hers"])
            .unwrap();

        let h = walk(&ac, b"h");
        let he = walk(&ac, b"he");
        let she = walk(&ac, b"she");
        let sh = walk(&ac, b"sh");
        let his = walk(&ac, b"his");
        let s = walk(&ac, b"s");

        assert_eq!(ac.failure(h), Some(0));
        assert_eq!(ac.failure(sh), Some(h));
        assert_eq!(ac.failure(she), Some(he));
        assert_eq!(ac.failure(his), Some(s));
        assert_eq!(ac.failure(0), Some(0));
    }

    #[test]
    fn test_outputs_inherited_through_failure() {
        let ac = AutomatonBuilder::<u32>::new()
            .build(["he", "she", "his", "hers"])
            .unwrap();

        // "she" also ends "he"; own pattern first, inherited after
        assert_eq!(outputs(&ac, walk(&ac, b"she")), vec![1, 0]);
        assert_eq!(outputs(&ac, walk(&ac, b"hers")), vec![3]);
        assert!(outputs(&ac, walk(&ac, b"sh")).is_empty());
    }

    #[test]
    fn test_inheritance_chains() {
        let ac = AutomatonBuilder::<u32>::new()
            .build(["c", "bc", "abc"])
            .unwrap();
        assert_eq!(outputs(&ac, walk(&ac, b"abc")), vec![2, 1, 0]);
        assert_eq!(outputs(&ac, walk(&ac, b"bc")), vec![1, 0]);
    }

    #[test]
    fn test_root_completion() {
        let ac = AutomatonBuilder::<u32>::new().build(["ab", "b"]).unwrap();
        // 'a' and 'b' leave the root explicitly; nothing else has a column
        assert_ne!(ac.transition(0, b'a'), Some(0));
        assert_eq!(ac.transition(0, b'z'), None);

        let ac = AutomatonBuilder::<u32>::new().build(["ab"]).unwrap();
        // 'b' has a column but no root edge, so it loops
        assert_eq!(ac.transition(0, b'b'), Some(0));
        // Below the root missing edges stay empty
        let a = walk(&ac, b"a");
        assert_eq!(ac.transition(a, b'a'), None);
    }

    #[test]
    fn test_empty_pattern_set() {
        let err = AutomatonBuilder::<u32>::new()
            .build(Vec::<&[u8]>::new())
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyPatternSet);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = AutomatonBuilder::<u32>::new()
            .build(["a", "", "b"])
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyPattern { index: 1 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_too_many_patterns_for_width() {
        let patterns = vec!["a"; 255];
        let err = AutomatonBuilder::<u8>::new().build(&patterns).unwrap_err();
        assert_eq!(
            err,
            BuildError::TooManyPatterns {
                count: 255,
                limit: 255
            }
        );
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

        // One fewer fits: all duplicates share a single extra state
        let ac = AutomatonBuilder::<u8>::new().build(&patterns[..254]).unwrap();
        assert_eq!(ac.state_count(), 2);
    }

    #[test]
    fn test_too_many_states_for_width() {
        // 100 patterns sharing no prefix need 300 states besides the root
        let patterns: Vec<[u8; 3]> = (0..100u8).map(|b| [b, b, b]).collect();
        let err = AutomatonBuilder::<u8>::new().build(&patterns).unwrap_err();
        assert_eq!(err, BuildError::TooManyStates { limit: 255 });
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

        // The same set fits comfortably in u16
        let ac = AutomatonBuilder::<u16>::new().build(&patterns).unwrap();
        assert_eq!(ac.pattern_count(), 100);
        assert_eq!(ac.state_count(), 301);
    }

    #[test]
    fn test_state_limit_boundary() {
        // 253 single-byte patterns: root + 253 states = 254 < 255
        let patterns: Vec<[u8; 1]> = (0..253u8).map(|b| [b]).collect();
        let ac = AutomatonBuilder::<u8>::new().build(&patterns).unwrap();
        assert_eq!(ac.state_count(), 254);

        // One more state would make the count equal the sentinel
        let patterns: Vec<[u8; 1]> = (0..254u8).map(|b| [b]).collect();
        let err = AutomatonBuilder::<u8>::new().build(&patterns).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = AutomatonBuilder::<u32>::new()
            .build(["zeta", "alpha", "phi"])
            .unwrap();
        let b = AutomatonBuilder::<u32>::new()
            .build(["zeta", "alpha", "phi"])
            .unwrap();
        assert_eq!(a.stats(), b.stats());
        for state in 0..a.state_count() {
            assert_eq!(a.failure(state), b.failure(state));
            assert_eq!(outputs(&a, state), outputs(&b, state));
        }
    }
}
