//! Single version range constraint (e.g. ">=1.2.3,<4.5.6")

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use thiserror::Error;

use super::Bound;
use crate::Version;

lazy_static! {
    // >=1.2.3,<4.5.6
    static ref CLOSED_RANGE_RE: Regex = Regex::new(
        r"^\s*>(=?)\s*((?:[0-9]+\.)*[0-9]+)\s*,\s*<(=?)\s*((?:[0-9]+\.)*[0-9]+)\s*$"
    ).unwrap();

    // <=4.5.6
    static ref LEFT_OPEN_RE: Regex = Regex::new(r"^\s*<(=?)\s*((?:[0-9]+\.)*[0-9]+)\s*$").unwrap();

    // >=1.2.3
    static ref RIGHT_OPEN_RE: Regex = Regex::new(r"^\s*>(=?)\s*((?:[0-9]+\.)*[0-9]+)\s*$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Cannot merge constraint \"{left}\" with \"{right}\": they neither contain nor overlap each other")]
    Unmergeable { left: String, right: String },
    #[error("Constraint \"{left}\" does not overlap with \"{right}\"")]
    NotOverlapping { left: String, right: String },
}

/// Shape of a constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A single interval; a missing bound is unbounded on that side
    Ranged {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
    /// Text that is not a simple range, kept verbatim
    Opaque(String),
}

/// A version range constraint as found in advisory "affected versions" data
///
/// Instances are immutable. They are created by [`VersionConstraint::from_string`]
/// or as the result of [`VersionConstraint::merge_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    kind: ConstraintKind,
}

impl VersionConstraint {
    /// Parse a constraint. Never fails: text that is not a simple range
    /// becomes an opaque constraint.
    pub fn from_string(text: &str) -> Self {
        if let Some(caps) = CLOSED_RANGE_RE.captures(text) {
            if let (Some(lower), Some(upper)) = (bound_from(&caps, 1, 2), bound_from(&caps, 3, 4)) {
                return Self::ranged(Some(lower), Some(upper));
            }
        } else if let Some(caps) = LEFT_OPEN_RE.captures(text) {
            if let Some(upper) = bound_from(&caps, 1, 2) {
                return Self::ranged(None, Some(upper));
            }
        } else if let Some(caps) = RIGHT_OPEN_RE.captures(text) {
            if let Some(lower) = bound_from(&caps, 1, 2) {
                return Self::ranged(Some(lower), None);
            }
        }

        VersionConstraint {
            kind: ConstraintKind::Opaque(text.to_string()),
        }
    }

    pub(crate) fn ranged(lower: Option<Bound>, upper: Option<Bound>) -> Self {
        VersionConstraint {
            kind: ConstraintKind::Ranged { lower, upper },
        }
    }

    /// Get the shape of this constraint
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Check if this constraint is a structured range rather than opaque text
    pub fn is_simple_range(&self) -> bool {
        matches!(self.kind, ConstraintKind::Ranged { .. })
    }

    /// Canonical string: opaque text verbatim, or the rendered range
    pub fn constraint_string(&self) -> String {
        self.to_string()
    }

    pub fn lower(&self) -> Option<&Bound> {
        match &self.kind {
            ConstraintKind::Ranged { lower, .. } => lower.as_ref(),
            ConstraintKind::Opaque(_) => None,
        }
    }

    pub fn upper(&self) -> Option<&Bound> {
        match &self.kind {
            ConstraintKind::Ranged { upper, .. } => upper.as_ref(),
            ConstraintKind::Opaque(_) => None,
        }
    }

    pub fn lower_bound(&self) -> Option<&Version> {
        self.lower().map(Bound::version)
    }

    pub fn is_lower_bound_included(&self) -> bool {
        self.lower().is_some_and(Bound::is_inclusive)
    }

    pub fn upper_bound(&self) -> Option<&Version> {
        self.upper().map(Bound::version)
    }

    pub fn is_upper_bound_included(&self) -> bool {
        self.upper().is_some_and(Bound::is_inclusive)
    }

    /// Check if every version matched by `other` is also matched by `self`.
    /// Always false when either side is opaque.
    pub fn contains(&self, other: &VersionConstraint) -> bool {
        if !self.is_simple_range() || !other.is_simple_range() {
            return false;
        }

        let lower_ok = match (self.lower(), other.lower()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(mine), Some(theirs)) => mine.admits_lower(theirs),
        };

        let upper_ok = match (self.upper(), other.upper()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(mine), Some(theirs)) => mine.admits_upper(theirs),
        };

        lower_ok && upper_ok
    }

    /// Check if the two ranges intersect without one containing the other.
    /// Always false when either side is opaque.
    pub fn overlaps_with(&self, other: &VersionConstraint) -> bool {
        if !self.is_simple_range() || !other.is_simple_range() {
            return false;
        }

        if self.contains(other) || other.contains(self) {
            return false;
        }

        self.strictly_contains(other.lower_bound()) ^ self.strictly_contains(other.upper_bound())
    }

    pub fn can_merge_with(&self, other: &VersionConstraint) -> bool {
        self.contains(other)
            || other.contains(self)
            || self.overlaps_with(other)
            || other.overlaps_with(self)
    }

    /// Produce the union of two constraints that contain or overlap each other.
    ///
    /// Callers are expected to check [`can_merge_with`](Self::can_merge_with)
    /// first; any other pair yields [`MergeError::Unmergeable`].
    pub fn merge_with(&self, other: &VersionConstraint) -> Result<VersionConstraint, MergeError> {
        if self.contains(other) {
            log::trace!("\"{}\" contains \"{}\"", self, other);
            return Ok(self.clone());
        }

        if other.contains(self) {
            log::trace!("\"{}\" contains \"{}\"", other, self);
            return Ok(other.clone());
        }

        if self.overlaps_with(other) {
            return Self::merge_overlapping(self, other);
        }

        if other.overlaps_with(self) {
            return Self::merge_overlapping(other, self);
        }

        Err(MergeError::Unmergeable {
            left: self.to_string(),
            right: other.to_string(),
        })
    }

    fn merge_overlapping(
        a: &VersionConstraint,
        b: &VersionConstraint,
    ) -> Result<VersionConstraint, MergeError> {
        if !a.overlaps_with(b) {
            return Err(MergeError::NotOverlapping {
                left: a.to_string(),
                right: b.to_string(),
            });
        }

        // b sticks out past a's upper edge when its lower edge lies inside a
        let merged = if a.strictly_contains(b.lower_bound()) {
            Self::ranged(a.lower().cloned(), b.upper().cloned())
        } else {
            Self::ranged(b.lower().cloned(), a.upper().cloned())
        };

        log::trace!("\"{}\" overlaps \"{}\", merged into \"{}\"", a, b, merged);

        Ok(merged)
    }

    /// Check if a version lies strictly between this range's edges,
    /// regardless of edge inclusivity.
    fn strictly_contains(&self, version: Option<&Version>) -> bool {
        let Some(version) = version else {
            return false;
        };

        match (self.lower_bound(), self.upper_bound()) {
            (None, None) => self.is_simple_range(),
            (None, Some(upper)) => upper > version,
            (Some(lower), None) => version > lower,
            (Some(lower), Some(upper)) => version > lower && upper > version,
        }
    }
}

fn bound_from(caps: &Captures<'_>, operator_group: usize, version_group: usize) -> Option<Bound> {
    let inclusive = caps.get(operator_group).is_some_and(|m| m.as_str() == "=");
    let version = caps.get(version_group)?.as_str().parse::<Version>().ok()?;
    Some(Bound::new(version, inclusive))
}

impl FromStr for VersionConstraint {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_string(s))
    }
}

impl From<&str> for VersionConstraint {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lower, upper) = match &self.kind {
            ConstraintKind::Opaque(text) => return f.write_str(text),
            ConstraintKind::Ranged { lower, upper } => (lower, upper),
        };

        // no bounds at all: every version matches
        if lower.is_none() && upper.is_none() {
            return f.write_str(">=0");
        }

        if let Some(lower) = lower {
            write!(f, ">{}{}", if lower.is_inclusive() { "=" } else { "" }, lower.version())?;
        }

        if let Some(upper) = upper {
            if lower.is_some() {
                f.write_str(",")?;
            }
            write!(f, "<{}{}", if upper.is_inclusive() { "=" } else { "" }, upper.version())?;
        }

        Ok(())
    }
}
