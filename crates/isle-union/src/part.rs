//! The capabilities a piecewise payload offers to a [`Union`](crate::Union).

use dashu::integer::IBig;
use isle_set::Set;
use isle_space::{parameter_alignment, DimType, Reordering, Result, Space};
use isle_val::Val;
use std::fmt;

/// A direction tag carried by a union and its parts.
///
/// Untagged families use `()`.
pub trait FoldTag: Copy + Eq + fmt::Debug {
    /// The tag of the negated expression.
    #[must_use]
    fn negate(self) -> Self;
}

impl FoldTag for () {
    fn negate(self) -> Self {}
}

/// The direction in which a fold combines its expressions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Fold {
    /// Keep the smallest value.
    Min,
    /// Keep the largest value.
    Max,
    /// Keep every value.
    List,
}

impl FoldTag for Fold {
    fn negate(self) -> Self {
        match self {
            Fold::Min => Fold::Max,
            Fold::Max => Fold::Min,
            Fold::List => Fold::List,
        }
    }
}

impl fmt::Display for Fold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fold::Min => f.write_str("min"),
            Fold::Max => f.write_str("max"),
            Fold::List => f.write_str("list"),
        }
    }
}

/// A piecewise expression over one domain shape.
///
/// Every operation consumes `self`; the union hands out clones when it
/// needs to keep the original. Operations taking a [`Set`] expect it to
/// have the parameters of the part (the union aligns them first).
pub trait Part: Clone + fmt::Debug {
    /// The direction tag, `()` for untagged families.
    type Tag: FoldTag;

    /// Whether a domain without a part means the zero expression.
    ///
    /// Decides whether [`Union::add`](crate::Union::add) sums over the
    /// union or over the intersection of the operand domains.
    const DEFAULT_IS_ZERO: bool;

    /// Returns the space of the part.
    fn space(&self) -> &Space;

    /// Returns the direction tag.
    fn tag(&self) -> Self::Tag;

    /// The zero element (the part without pieces) over `space`.
    fn zero(space: Space, tag: Self::Tag) -> Self;

    /// Returns true for the zero element.
    fn is_zero(&self) -> bool;

    /// Sums on the shared domain and keeps either operand elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the operands live in different spaces.
    fn union_add(self, other: Self) -> Result<Self>;

    /// Sums on the shared domain only.
    ///
    /// # Errors
    ///
    /// Returns an error if the operands live in different spaces.
    fn add(self, other: Self) -> Result<Self>;

    /// Returns the domain on which the part is defined.
    ///
    /// # Errors
    ///
    /// Returns an error if the pieces cannot be combined into one set.
    fn domain(&self) -> Result<Set>;

    /// Moves the parameters according to `r`, a reordering of the domain
    /// space of the part.
    ///
    /// # Errors
    ///
    /// Returns an error if `r` does not fit the part.
    fn realign_domain(self, r: &Reordering) -> Result<Self>;

    /// Aligns the parameters with those of `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if either
    /// space repeats a parameter.
    fn align_params(self, model: &Space) -> Result<Self> {
        if self.space().has_equal_params(model) {
            return Ok(self);
        }
        let r = parameter_alignment(self.space(), model)?;
        let r = r.extend_space(&self.space().domain())?;
        self.realign_domain(&r)
    }

    /// Restricts the domain to the parameter values in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` is not a parameter set.
    fn intersect_params(self, set: &Set) -> Result<Self>;

    /// Simplifies assuming the parameter values in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` is not a parameter set.
    fn gist_params(self, set: &Set) -> Result<Self>;

    /// Restricts the domain to `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` does not live in the domain space.
    fn intersect_domain(self, set: &Set) -> Result<Self>;

    /// Simplifies assuming the domain points in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` does not live in the domain space.
    fn gist(self, set: &Set) -> Result<Self>;

    /// Removes `set` from the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` does not live in the domain space.
    fn subtract_domain(self, set: &Set) -> Result<Self>;

    /// Simplifies the representation without changing the value.
    ///
    /// # Errors
    ///
    /// Returns an error if simplification fails.
    fn coalesce(self) -> Result<Self>;

    /// Multiplies by an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the family cannot be scaled.
    fn mul_int(self, v: &IBig) -> Result<Self>;

    /// Multiplies by a rational value.
    ///
    /// # Errors
    ///
    /// Returns an error if `v` is not rational.
    fn scale_val(self, v: &Val) -> Result<Self>;

    /// Divides by a non-zero rational value.
    ///
    /// # Errors
    ///
    /// Returns an error if `v` is zero or not rational.
    fn scale_down_val(self, v: &Val) -> Result<Self>;

    /// Syntactic equality, after normalization of both operands.
    fn plain_is_equal(&self, other: &Self) -> bool;

    /// Removes `n` dimensions of kind `ty` starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds or a removed
    /// dimension is still referenced.
    fn drop_dims(self, ty: DimType, first: usize, n: usize) -> Result<Self>;

    /// Renames dimension `pos` of kind `ty`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of bounds.
    fn set_dim_name(self, ty: DimType, pos: usize, name: &str) -> Result<Self>;

    /// Removes the user tags of all identifiers.
    #[must_use]
    fn reset_user(self) -> Self;
}

/// A part family that offers subtraction.
pub trait SubPart: Part {
    /// Subtracts on the shared domain only.
    ///
    /// # Errors
    ///
    /// Returns an error if the operands live in different spaces.
    fn sub(self, other: Self) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_negate() {
        assert_eq!(Fold::Min.negate(), Fold::Max);
        assert_eq!(Fold::Max.negate(), Fold::Min);
        assert_eq!(Fold::List.negate(), Fold::List);
        assert_eq!(Fold::Max.negate().negate(), Fold::Max);
    }

    #[test]
    fn test_fold_display() {
        assert_eq!(Fold::Min.to_string(), "min");
        assert_eq!(Fold::List.to_string(), "list");
    }
}
