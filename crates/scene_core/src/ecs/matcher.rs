//! Component signature matching
//!
//! A [`Matcher`] is a compiled query over entity signatures: every type in
//! the all-set must be present, no type in the exclusion set may be present,
//! and when the one-set is non-empty at least one of its types must be present.

use super::{BitSet, ComponentType, ComponentTypeManager, Entity};
use std::fmt;

/// All-of / none-of / any-of predicate over component signatures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matcher {
    all_set: BitSet,
    exclusion_set: BitSet,
    one_set: BitSet,
}

impl Matcher {
    /// Create a matcher that accepts every signature
    pub fn empty() -> Self {
        Self {
            all_set: BitSet::new(),
            exclusion_set: BitSet::new(),
            one_set: BitSet::new(),
        }
    }

    /// Require every listed type
    #[must_use]
    pub fn all(mut self, types: &[ComponentType]) -> Self {
        for component_type in types {
            self.all_set.set(component_type.index());
        }
        self
    }

    /// Reject signatures containing any listed type
    #[must_use]
    pub fn exclude(mut self, types: &[ComponentType]) -> Self {
        for component_type in types {
            self.exclusion_set.set(component_type.index());
        }
        self
    }

    /// Require at least one of the listed types
    #[must_use]
    pub fn one(mut self, types: &[ComponentType]) -> Self {
        for component_type in types {
            self.one_set.set(component_type.index());
        }
        self
    }

    /// Types that must all be present
    pub const fn all_set(&self) -> &BitSet {
        &self.all_set
    }

    /// Types that must all be absent
    pub const fn exclusion_set(&self) -> &BitSet {
        &self.exclusion_set
    }

    /// Types of which at least one must be present
    pub const fn one_set(&self) -> &BitSet {
        &self.one_set
    }

    /// Test a component signature
    pub fn is_interested(&self, component_bits: &BitSet) -> bool {
        if !self.all_set.is_empty() {
            let mut next = self.all_set.next_set_bit(0);
            while let Some(index) = next {
                if !component_bits.get(index) {
                    return false;
                }
                next = self.all_set.next_set_bit(index + 1);
            }
        }

        if !self.exclusion_set.is_empty() && self.exclusion_set.intersects(component_bits) {
            return false;
        }

        if !self.one_set.is_empty() && !self.one_set.intersects(component_bits) {
            return false;
        }

        true
    }

    /// Test an entity's current signature
    pub fn is_interested_in(&self, entity: &Entity) -> bool {
        self.is_interested(entity.component_bits())
    }

    /// Describe this matcher with type names from `types`
    pub const fn display<'a>(&'a self, types: &'a ComponentTypeManager) -> MatcherDisplay<'a> {
        MatcherDisplay { matcher: self, types }
    }
}

/// Human readable matcher description, see [`Matcher::display`]
pub struct MatcherDisplay<'a> {
    matcher: &'a Matcher,
    types: &'a ComponentTypeManager,
}

impl MatcherDisplay<'_> {
    fn write_types(&self, f: &mut fmt::Formatter<'_>, header: &str, bits: &BitSet) -> fmt::Result {
        f.write_str(header)?;
        for (i, component_type) in self.types.types_from_bits(bits).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(self.types.name(component_type).unwrap_or("?"))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for MatcherDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matcher:")?;
        self.write_types(f, " -  Requires the components: ", &self.matcher.all_set)?;
        self.write_types(f, " -  Has none of the components: ", &self.matcher.exclusion_set)?;
        self.write_types(f, " -  Has at least one of the components: ", &self.matcher.one_set)
    }
}
