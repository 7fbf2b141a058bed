//! Bound type for constraint boundaries

use std::fmt;

use crate::Version;

/// One edge (lower or upper) of a ranged constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    version: Version,
    is_inclusive: bool,
}

impl Bound {
    /// Create a new bound
    pub fn new(version: Version, is_inclusive: bool) -> Self {
        Bound {
            version,
            is_inclusive,
        }
    }

    /// Get the version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check if the bound is inclusive
    pub fn is_inclusive(&self) -> bool {
        self.is_inclusive
    }

    /// Treating both bounds as lower edges, check that nothing admitted by
    /// `other` falls below `self`.
    pub fn admits_lower(&self, other: &Bound) -> bool {
        if self.is_inclusive || !other.is_inclusive {
            return other.version >= self.version;
        }

        // an included point cannot sit on an excluded edge
        other.version > self.version
    }

    /// Treating both bounds as upper edges, check that nothing admitted by
    /// `other` falls above `self`.
    pub fn admits_upper(&self, other: &Bound) -> bool {
        if self.is_inclusive || !other.is_inclusive {
            return self.version >= other.version;
        }

        self.version > other.version
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.is_inclusive {
                "inclusive"
            } else {
                "exclusive"
            }
        )
    }
}
