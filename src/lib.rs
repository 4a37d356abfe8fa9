//! # acmatch - Multi-pattern Byte Matching
//!
//! acmatch finds every occurrence of every pattern from a fixed set in a
//! single linear pass over the input, using an Aho-Corasick automaton.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`automaton`] - Automaton construction and scanning
//! - [`scan`] - Parallel scanning of files and directory trees
//! - [`output`] - Match rendering (text, JSON, counts)
//! - [`utils`] - Configuration, pattern loading, content detection
//!
//! ## Quick Start
//!
//! ```
//! let ac = acmatch::build(["he", "she", "his", "hers"]).unwrap();
//!
//! for m in ac.search(b"ahishers").unwrap() {
//!     let pattern = ac.pattern(m.pattern).unwrap();
//!     println!("{} ends at {}", String::from_utf8_lossy(pattern), m.end);
//! }
//! ```
//!
//! ## Memory
//!
//! The transition table only has columns for bytes that occur in the
//! patterns, and only rows for trie nodes. Transitions missing below the root
//! are resolved through failure links during the scan instead of being
//! precomputed.

pub mod automaton;
pub mod output;
pub mod scan;
pub mod utils;

pub use automaton::{
    Automaton, AutomatonBuilder, BuildError, ErrorKind, FindIter, Match, SearchError, build,
};
