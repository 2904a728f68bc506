//! FIRST sets over token-kind ordinals

use std::fmt;

/// Set of token-kind ordinals (0..128) that can begin a derivation.
///
/// Stored as two 64-bit words. When the set holds exactly one kind the
/// membership test compares against that ordinal directly.
#[derive(Clone, Copy, Default)]
pub struct FirstSet {
    low: u64,
    high: u64,
    single: Option<u8>,
}

impl FirstSet {
    /// Create an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self {
            low: 0,
            high: 0,
            single: None,
        }
    }

    /// Create a set holding one ordinal.
    pub fn single(ordinal: u8) -> Self {
        let mut set = Self::new();
        set.insert(ordinal);
        set.seal();
        set
    }

    /// Add an ordinal. Ordinals of 128 and above are ignored.
    pub fn insert(&mut self, ordinal: u8) {
        match ordinal {
            0..=63 => self.low |= 1u64 << ordinal,
            64..=127 => self.high |= 1u64 << (ordinal - 64),
            _ => {}
        }
        self.single = None;
    }

    /// Add every ordinal of `other`.
    pub fn union_with(&mut self, other: &FirstSet) {
        self.low |= other.low;
        self.high |= other.high;
        self.single = None;
    }

    /// Recompute the singleton fast path after the set stops changing.
    pub fn seal(&mut self) {
        self.single = if self.count() == 1 {
            if self.low != 0 {
                Some(self.low.trailing_zeros() as u8)
            } else {
                Some(self.high.trailing_zeros() as u8 + 64)
            }
        } else {
            None
        };
    }

    /// Check membership of an ordinal.
    #[inline]
    pub fn contains(&self, ordinal: u8) -> bool {
        if let Some(only) = self.single {
            return only == ordinal;
        }
        match ordinal {
            0..=63 => self.low & (1u64 << ordinal) != 0,
            64..=127 => self.high & (1u64 << (ordinal - 64)) != 0,
            _ => false,
        }
    }

    /// Check if this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// Count the number of ordinals in this set.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.low.count_ones() + self.high.count_ones()
    }

    /// Iterate over the ordinals in ascending order.
    pub fn ordinals(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..128).filter(move |&ordinal| self.contains(ordinal))
    }
}

impl PartialEq for FirstSet {
    fn eq(&self, other: &Self) -> bool {
        self.low == other.low && self.high == other.high
    }
}

impl Eq for FirstSet {}

impl fmt::Debug for FirstSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ordinals()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = FirstSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_single_fast_path_low_and_high() {
        let low = FirstSet::single(5);
        assert!(low.contains(5));
        assert!(!low.contains(6));

        let high = FirstSet::single(100);
        assert!(high.contains(100));
        assert!(!high.contains(36));
    }

    #[test]
    fn test_union_spans_both_words() {
        let mut set = FirstSet::single(1);
        set.union_with(&FirstSet::single(64));
        set.insert(127);
        set.seal();
        assert_eq!(set.count(), 3);
        assert!(set.contains(1) && set.contains(64) && set.contains(127));
        assert_eq!(set.ordinals().collect::<Vec<_>>(), vec![1, 64, 127]);
    }

    #[test]
    fn test_ordinal_zero_is_a_regular_member() {
        let set = FirstSet::single(0);
        assert!(set.contains(0));
        assert!(!set.contains(1));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut set = FirstSet::new();
        set.insert(200);
        assert!(set.is_empty());
        assert!(!set.contains(200));
    }
}
