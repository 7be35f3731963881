//! The expressions a piecewise payload holds on each piece.

use dashu::rational::RBig;
use isle_space::{Reordering, Result};
use isle_union::FoldTag;
use isle_val::Val;
use std::fmt;

/// An expression over the columns `[params.., domain dims..]`.
///
/// Expressions are values: every operation returns a new one.
pub trait PieceExpr: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// The direction tag of the family, `()` for untagged families.
    type Tag: FoldTag;

    /// Whether a domain point without a piece evaluates to zero.
    const DEFAULT_IS_ZERO: bool;

    /// Returns the direction tag.
    fn tag(&self) -> Self::Tag;

    /// Returns the number of columns the expression ranges over.
    fn n_cols(&self) -> usize;

    /// Returns true if the expression is identically zero.
    fn is_zero(&self) -> bool;

    /// Sums both expressions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if the
    /// expressions have different columns or tags.
    fn add(&self, other: &Self) -> Result<Self>;

    /// Combines both expressions where the domains of two pieces overlap
    /// in a sum over the union of domains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if the
    /// expressions have different columns or tags.
    fn union_combine(&self, other: &Self) -> Result<Self> {
        self.add(other)
    }

    /// Multiplies by a rational factor.
    #[must_use]
    fn scale(&self, f: &RBig) -> Self;

    /// Moves the columns according to `r`.
    #[must_use]
    fn realign(&self, r: &Reordering) -> Self;

    /// Removes `n` columns starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if the
    /// expression depends on a removed column.
    fn drop_cols(&self, first: usize, n: usize) -> Result<Self>;

    /// Evaluates the expression at an integer point.
    fn eval(&self, point: &[i64]) -> Val;
}

/// An expression family that offers subtraction.
pub trait PieceSub: PieceExpr {
    /// Subtracts `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if the
    /// expressions have different columns.
    fn sub(&self, other: &Self) -> Result<Self>;
}
