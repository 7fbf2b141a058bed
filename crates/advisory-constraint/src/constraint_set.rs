//! ConstraintSet - folds many constraints into the fewest equivalent ones

use std::cmp::Ordering;
use std::fmt;

use crate::constraint::{Bound, MergeError, VersionConstraint};

/// A disjunction of version constraints kept in merged form
///
/// Every inserted constraint is merged with any member it can be merged
/// with, so no two members of the set are mergeable.
/// `[>=1,<2] | [>=1.5,<3] | [>=2.5,<4]` becomes `[>=1,<4]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<VersionConstraint>,
}

impl ConstraintSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set by inserting each constraint in turn
    pub fn from_constraints<I>(constraints: I) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = VersionConstraint>,
    {
        let mut set = Self::new();
        for constraint in constraints {
            set.insert(constraint)?;
        }
        Ok(set)
    }

    /// Add a constraint, merging it with every member it overlaps or contains
    pub fn insert(&mut self, constraint: VersionConstraint) -> Result<(), MergeError> {
        if !constraint.is_simple_range() {
            if !self.constraints.contains(&constraint) {
                self.constraints.push(constraint);
            }
            return Ok(());
        }

        let mut merged = constraint;
        while let Some(pos) = self.constraints.iter().position(|c| c.can_merge_with(&merged)) {
            let existing = self.constraints.remove(pos);
            let combined = existing.merge_with(&merged)?;
            log::debug!("Merged \"{}\" and \"{}\" into \"{}\"", existing, merged, combined);
            merged = combined;
        }

        self.constraints.push(merged);
        Ok(())
    }

    /// Get the members in insertion order
    pub fn constraints(&self) -> &[VersionConstraint] {
        &self.constraints
    }

    pub fn into_constraints(self) -> Vec<VersionConstraint> {
        self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Get the members sorted by range, opaque constraints last
    pub fn sorted(&self) -> Vec<&VersionConstraint> {
        let mut sorted: Vec<&VersionConstraint> = self.constraints.iter().collect();
        sorted.sort_by(|a, b| compare_constraints(a, b));
        sorted
    }

    /// Composer-style conflict string, members joined with `|`
    pub fn conflict_string(&self) -> String {
        self.sorted()
            .iter()
            .map(|c| c.constraint_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.conflict_string())
    }
}

fn compare_constraints(a: &VersionConstraint, b: &VersionConstraint) -> Ordering {
    match (a.is_simple_range(), b.is_simple_range()) {
        (true, true) => compare_lower(a.lower(), b.lower())
            .then_with(|| compare_upper(a.upper(), b.upper())),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

// unbounded first, inclusive before exclusive
fn compare_lower(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .version()
            .cmp(b.version())
            .then_with(|| b.is_inclusive().cmp(&a.is_inclusive())),
    }
}

// unbounded last, exclusive before inclusive
fn compare_upper(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a
            .version()
            .cmp(b.version())
            .then_with(|| a.is_inclusive().cmp(&b.is_inclusive())),
    }
}
