//! Byte alphabet compression.
//!
//! Only bytes that occur somewhere in the pattern set get a column in the
//! transition table. Every other byte can never extend a match, so the scan
//! sends it straight back to the root without touching the table.

/// Bitset over all 256 byte values.
#[derive(Clone, Copy, Default)]
struct ByteSet {
    bits: [u64; 4],
}

impl ByteSet {
    #[inline]
    fn insert(&mut self, byte: u8) {
        self.bits[(byte >> 6) as usize] |= 1u64 << (byte & 63);
    }

    #[inline]
    fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }

    fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Mapping from byte value to a dense table column.
///
/// Columns are assigned in ascending byte order, so the same pattern set
/// always produces the same mapping.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    columns: [Option<u8>; 256],
    len: usize,
}

impl Alphabet {
    /// Scan every byte of every pattern and number the bytes that occur.
    pub fn from_patterns<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut present = ByteSet::default();
        for pattern in patterns {
            for &byte in pattern.as_ref() {
                present.insert(byte);
            }
        }

        let mut columns = [None; 256];
        let mut next = 0usize;
        for byte in 0..=255u8 {
            if present.contains(byte) {
                // At most 256 bytes are present, so columns run 0..=255
                columns[byte as usize] = Some(next as u8);
                next += 1;
            }
        }
        debug_assert_eq!(next, present.len());

        Self { columns, len: next }
    }

    /// Column for `byte`, or `None` if no pattern contains it.
    #[inline]
    pub fn column(&self, byte: u8) -> Option<usize> {
        self.columns[byte as usize].map(usize::from)
    }

    /// Number of columns (distinct bytes across all patterns).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes that have a column, in column order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(|&b| self.columns[b as usize].is_some())
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alphabet")
            .field("len", &self.len)
            .field("bytes", &String::from_utf8_lossy(&self.bytes().collect::<Vec<_>>()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_byte_order() {
        let alphabet = Alphabet::from_patterns(["she", "he", "hers"]);
        // Present bytes: e h r s
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.column(b'e'), Some(0));
        assert_eq!(alphabet.column(b'h'), Some(1));
        assert_eq!(alphabet.column(b'r'), Some(2));
        assert_eq!(alphabet.column(b's'), Some(3));
        assert_eq!(alphabet.column(b'a'), None);
        assert_eq!(alphabet.bytes().collect::<Vec<_>>(), b"ehrs".to_vec());
    }

    #[test]
    fn test_pattern_order_does_not_matter() {
        let a = Alphabet::from_patterns(["zyx", "abc"]);
        let b = Alphabet::from_patterns(["abc", "zyx"]);
        assert!(a == b);
    }

    #[test]
    fn test_full_byte_range() {
        let all: Vec<u8> = (0..=255u8).collect();
        let alphabet = Alphabet::from_patterns([&all]);
        assert_eq!(alphabet.len(), 256);
        assert_eq!(alphabet.column(0), Some(0));
        assert_eq!(alphabet.column(255), Some(255));
    }

    #[test]
    fn test_byte_set() {
        let mut set = ByteSet::default();
        assert!(!set.contains(0));
        set.insert(0);
        set.insert(63);
        set.insert(64);
        set.insert(255);
        set.insert(255);
        assert!(set.contains(0) && set.contains(63) && set.contains(64) && set.contains(255));
        assert!(!set.contains(128));
        assert_eq!(set.len(), 4);
    }
}
