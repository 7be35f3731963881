//! # isle-space
//!
//! Spaces and parameter alignment for the isle polyhedral containers.
//!
//! This crate provides:
//! - The shared [`Error`] type and [`Result`] alias
//! - Named identifiers ([`Id`]) with an optional user tag
//! - [`Space`]: parameters plus optional input and output tuples
//! - [`Reordering`]: the permutation that aligns one parameter list to another
//!
//! ## Space Kinds
//!
//! ```text
//! params  [N, M] -> { }
//! set     [N, M] -> { S[i, j] }
//! map     [N, M] -> { S[i, j] -> [o] }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod reordering;
pub mod space;

#[cfg(test)]
mod proptests;

pub use error::{Error, Result};
pub use id::Id;
pub use reordering::{parameter_alignment, Reordering};
pub use space::{DimType, ShapeKey, Space, Tuple};
