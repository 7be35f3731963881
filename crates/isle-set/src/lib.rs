//! # isle-set
//!
//! Integer sets for the isle polyhedral containers.
//!
//! This crate provides:
//! - [`Constraint`]: an affine equality or inequality with integer coefficients
//! - [`BasicSet`]: a conjunction of constraints
//! - [`Set`]: a finite union of basic sets in one space
//! - [`UnionSet`]: sets living in different spaces that share parameters
//!
//! Emptiness and equality are *plain*: they are decided syntactically on the
//! normalized constraints and never by solving. A set reported empty is
//! empty, but a set not reported empty may still have no integer points.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod basic_set;
pub mod constraint;
pub mod set;
pub mod union_set;

#[cfg(test)]
mod proptests;

pub use basic_set::BasicSet;
pub use constraint::{Constraint, ConstraintKind};
pub use set::Set;
pub use union_set::UnionSet;
