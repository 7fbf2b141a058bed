//! Version range constraints for security advisories
//!
//! This crate models a single "affected versions" range such as
//! `>=1.2.3,<4.5.6`, decides whether two ranges can be combined, and
//! produces their union. Text that is not a simple range is kept verbatim
//! as an opaque constraint that never merges with anything.

pub mod constraint;
mod constraint_set;
#[cfg(feature = "serde")]
mod serde_impl;
mod version;

pub use constraint::{Bound, ConstraintKind, MergeError, VersionConstraint};
pub use constraint_set::ConstraintSet;
pub use version::{Version, VersionError};
