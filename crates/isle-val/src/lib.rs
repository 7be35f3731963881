//! # isle-val
//!
//! Exact values for the isle polyhedral containers.
//!
//! This crate wraps `dashu` rationals in a [`Val`] that can additionally
//! represent positive and negative infinity and NaN. Scale factors of union
//! containers are `Val`s, and only their rational members are accepted.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod val;

#[cfg(test)]
mod proptests;

pub use val::Val;

/// Re-exported `dashu` number types used throughout the workspace.
pub use dashu::integer::{IBig, UBig};
pub use dashu::rational::RBig;
