//! Constraint types for version ranges

mod bound;
mod version_constraint;

pub use bound::Bound;
pub use version_constraint::{ConstraintKind, MergeError, VersionConstraint};
