//! Growable bit vector used as a component signature

use fixedbitset::FixedBitSet;
use std::fmt;

/// Growable set of non-negative integers.
///
/// Bit `i` is set iff component type `i` is present. Storage grows on demand
/// and never shrinks.
#[derive(Clone, Default)]
pub struct BitSet {
    bits: FixedBitSet,
}

impl BitSet {
    /// Create an empty bit set
    pub fn new() -> Self {
        Self { bits: FixedBitSet::new() }
    }

    /// Create an empty bit set able to hold `bits` without growing
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(bits),
        }
    }

    /// Number of bits the current storage can hold
    pub fn len_bits(&self) -> usize {
        self.bits.len()
    }

    /// Set bit `index`, growing the storage if needed
    pub fn set(&mut self, index: usize) {
        if index >= self.bits.len() {
            self.bits.grow((self.bits.len() * 2).max(index + 1));
        }
        self.bits.insert(index);
    }

    /// Clear bit `index`; out-of-range indices are already clear
    pub fn clear(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Clear every bit, keeping the storage
    pub fn clear_all(&mut self) {
        self.bits.clear();
    }

    /// Check bit `index`
    pub fn get(&self, index: usize) -> bool {
        self.bits.contains(index)
    }

    /// True when no bit is set
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Index of the first set bit at or after `from`
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        if from >= self.bits.len() {
            return None;
        }
        self.bits.ones().find(|&index| index >= from)
    }

    /// True when both sets share at least one bit
    pub fn intersects(&self, other: &BitSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    /// True when every bit of `other` is also set here
    pub fn contains_all(&self, other: &BitSet) -> bool {
        self.bits.is_superset(&other.bits)
    }

    /// Iterate over set bit indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }
}

// FixedBitSet equality also compares lengths
impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for BitSet {}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bits = Self::new();
        for index in iter {
            bits.set(index);
        }
        bits
    }
}
