//! # isle-pw
//!
//! Piecewise payloads for the isle union containers.
//!
//! This crate provides:
//! - [`Aff`]: rational affine forms, undefined outside their pieces
//! - [`QPolynomial`]: sparse rational polynomials, zero outside their pieces
//! - [`QPolynomialFold`]: minima, maxima and lists of polynomials
//! - [`Pw`]: a piecewise expression over one domain, implementing
//!   [`Part`](isle_union::Part)
//!
//! ## Families
//!
//! | alias                      | absent domain | tag    | `sub` |
//! |----------------------------|---------------|--------|-------|
//! | [`UnionPwAff`]             | undefined     | `()`   | yes   |
//! | [`UnionPwQPolynomial`]     | zero          | `()`   | yes   |
//! | [`UnionPwQPolynomialFold`] | zero          | `Fold` | no    |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aff;
pub mod expr;
pub mod fold;
pub mod pw;
pub mod qpolynomial;

#[cfg(test)]
mod proptests;

pub use aff::Aff;
pub use expr::{PieceExpr, PieceSub};
pub use fold::QPolynomialFold;
pub use pw::Pw;
pub use qpolynomial::QPolynomial;

use isle_union::Union;

/// A piecewise affine expression.
pub type PwAff = Pw<Aff>;
/// A piecewise quasi-polynomial.
pub type PwQPolynomial = Pw<QPolynomial>;
/// A piecewise fold of quasi-polynomials.
pub type PwQPolynomialFold = Pw<QPolynomialFold>;

/// A union of piecewise affine expressions.
pub type UnionPwAff = Union<PwAff>;
/// A union of piecewise quasi-polynomials.
pub type UnionPwQPolynomial = Union<PwQPolynomial>;
/// A union of piecewise folds of quasi-polynomials.
pub type UnionPwQPolynomialFold = Union<PwQPolynomialFold>;
