//! Scaling, structural equality and parameter transforms.

use crate::part::{FoldTag, Part};
use crate::union::Union;
use dashu::integer::IBig;
use isle_space::{DimType, Error, Result};
use isle_val::Val;

impl<P: Part> Union<P> {
    /// Flips the direction tag if `negative`, then scales every part
    /// with `f`.
    fn scale_parts<F>(mut self, negative: bool, f: F) -> Result<Self>
    where
        F: FnMut(P) -> Result<P>,
    {
        let inner = self.cow()?;
        if negative {
            inner.tag = inner.tag.negate();
        }
        self.map_parts(f)
    }

    /// Multiplies every part by the integer `v`.
    ///
    /// Multiplying by one returns `self` untouched. In families where a
    /// missing domain means zero, multiplying by zero gives the empty
    /// union.
    ///
    /// # Errors
    ///
    /// Returns the first error of a part.
    pub fn mul_int(self, v: &IBig) -> Result<Self> {
        if *v == IBig::ONE {
            return Ok(self);
        }
        if P::DEFAULT_IS_ZERO && *v == IBig::ZERO {
            return Ok(Self::zero(self.space(), self.tag()));
        }
        self.scale_parts(*v < IBig::ZERO, |part| part.mul_int(v))
    }

    /// Multiplies every part by the rational value `v`.
    ///
    /// Multiplying by one returns `self` untouched. In families where a
    /// missing domain means zero, multiplying by zero gives the empty
    /// union. A negative factor flips the direction tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `v` is not rational.
    pub fn scale_val(self, v: &Val) -> Result<Self> {
        if v.is_one() {
            return Ok(self);
        }
        if P::DEFAULT_IS_ZERO && v.is_zero() {
            return Ok(Self::zero(self.space(), self.tag()));
        }
        if !v.is_rat() {
            return Err(Error::invalid("expecting rational factor"));
        }
        self.scale_parts(v.is_neg(), |part| part.scale_val(v))
    }

    /// Divides every part by the rational value `v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `v` is zero or not rational.
    pub fn scale_down_val(self, v: &Val) -> Result<Self> {
        if v.is_one() {
            return Ok(self);
        }
        if !v.is_rat() {
            return Err(Error::invalid("expecting rational factor"));
        }
        if v.is_zero() {
            return Err(Error::invalid("cannot scale down by zero"));
        }
        self.scale_parts(v.is_neg(), |part| part.scale_down_val(v))
    }

    /// Returns true if both unions hold the same parts, compared
    /// syntactically after parameter alignment.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters cannot be aligned.
    pub fn plain_is_equal(&self, other: &Self) -> Result<bool> {
        if self.ptr_eq(other) {
            return Ok(true);
        }
        if self.n_part() != other.n_part() {
            return Ok(false);
        }
        let u1 = self.clone().align_params(other.space())?;
        let u2 = other.clone().align_params(u1.space())?;
        let eq = u1.parts().all(|part| {
            u2.find_part(part.space())
                .is_some_and(|part2| part.plain_is_equal(part2))
        });
        Ok(eq)
    }

    /// Removes `n` parameters starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] unless `ty` is [`DimType::Param`], or if
    /// the range is out of bounds.
    pub fn drop_dims(self, ty: DimType, first: usize, n: usize) -> Result<Self> {
        if ty != DimType::Param {
            return Err(Error::invalid("can only project out parameters"));
        }
        let space = self.space().drop_dims(ty, first, n)?;
        self.rebuild(&space, |part| part.drop_dims(ty, first, n).map(Some))
    }

    /// Renames parameter `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] unless `ty` is [`DimType::Param`], or if
    /// `pos` is out of bounds.
    pub fn set_dim_name(self, ty: DimType, pos: usize, name: &str) -> Result<Self> {
        if ty != DimType::Param {
            return Err(Error::invalid("can only set parameter names"));
        }
        let space = self.space().set_dim_name(ty, pos, name)?;
        self.rebuild(&space, |part| part.set_dim_name(ty, pos, name).map(Some))
    }

    /// Removes the user tags of all identifiers in the union and its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the parts cannot be reinserted.
    pub fn reset_user(self) -> Result<Self> {
        let space = self.space().reset_user();
        self.rebuild(&space, |part| Ok(Some(part.reset_user())))
    }
}
