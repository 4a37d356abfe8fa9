//! Integer widths for state and pattern identifiers.
//!
//! The automaton stores every state reference in the transition table and
//! failure function, so the width of that integer is the main memory knob.
//! The largest value of each width is reserved as the "no transition" marker
//! in [`Slot`]; construction refuses pattern sets whose pattern count or
//! state count would reach it.

use std::fmt::Debug;
use std::hash::Hash;

/// An unsigned integer type usable as a state or pattern identifier.
pub trait StateIndex: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Reserved value marking an empty table cell. Never a valid identifier.
    const SENTINEL: Self;

    /// The root state.
    const ZERO: Self;

    /// Exclusive upper bound on identifiers, as a `usize`.
    fn limit() -> usize;

    /// Convert from `usize`. Callers check against [`StateIndex::limit`] first.
    fn from_usize(value: usize) -> Self;

    /// Widen to `usize` for indexing.
    fn as_usize(self) -> usize;
}

macro_rules! impl_state_index {
    ($($ty:ty),*) => {
        $(
            impl StateIndex for $ty {
                const SENTINEL: Self = <$ty>::MAX;
                const ZERO: Self = 0;

                #[inline]
                fn limit() -> usize {
                    // On targets where usize is narrower than the index type
                    // the address space is the tighter bound.
                    usize::try_from(<$ty>::MAX).unwrap_or(usize::MAX)
                }

                #[inline]
                fn from_usize(value: usize) -> Self {
                    debug_assert!(value < Self::limit());
                    value as $ty
                }

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_state_index!(u8, u16, u32, u64, usize);

/// One cell of the transition table: an explicit transition, or nothing.
///
/// Stored as a bare integer with [`StateIndex::SENTINEL`] meaning empty, so a
/// table of `Slot<u32>` costs four bytes per cell. The accessors only speak
/// `Option`, and construction keeps every state id strictly below the
/// sentinel, so the two can never be confused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Slot<S>(S);

impl<S: StateIndex> Slot<S> {
    /// A cell with no transition.
    pub const EMPTY: Self = Slot(S::SENTINEL);

    /// A cell pointing at `state`.
    #[inline]
    pub fn to(state: S) -> Self {
        debug_assert_ne!(state, S::SENTINEL);
        Slot(state)
    }

    /// The target state, if any.
    #[inline]
    pub fn get(self) -> Option<S> {
        if self.0 == S::SENTINEL {
            None
        } else {
            Some(self.0)
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == S::SENTINEL
    }
}

impl<S: StateIndex> Default for Slot<S> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<S: StateIndex> Debug for Slot<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(state) => write!(f, "Slot({:?})", state),
            None => write!(f, "Slot(-)"),
        }
    }
}
