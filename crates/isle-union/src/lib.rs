//! # isle-union
//!
//! The union container: piecewise expressions over differently shaped
//! domains that share one parameter space.
//!
//! This crate provides:
//! - [`Part`]: the capabilities a piecewise payload offers to a union
//! - [`Union`]: at most one part per domain shape, shared copy-on-write
//! - The union algebra: sums, differences, domain restriction, scaling,
//!   structural equality and parameter transforms
//!
//! ## Families
//!
//! One generic container serves every payload family. A family is
//! configured at compile time through its [`Part`] implementation:
//!
//! - [`Part::DEFAULT_IS_ZERO`]: whether an absent domain means zero
//! - [`Part::Tag`]: `()` or a [`Fold`] direction
//! - [`SubPart`]: whether subtraction is offered
//!
//! ## Sharing
//!
//! Cloning a [`Union`] aliases its table. The first mutation of a shared
//! union duplicates the table, so every clone keeps observing the value it
//! was cloned from.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod algebra;
mod align;
mod domain;
mod lookup;
pub mod part;
mod transform;
pub mod union;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod proptests;

pub use part::{Fold, FoldTag, Part, SubPart};
pub use union::Union;
