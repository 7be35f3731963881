//! A small part used to exercise the union on its own.
//!
//! A mock part is an affine function of the parameters, constant over a
//! one-dimensional domain, that is either defined everywhere or nowhere.

use crate::part::{Fold, FoldTag, Part, SubPart};
use dashu::integer::IBig;
use isle_set::Set;
use isle_space::{DimType, Error, Id, Reordering, Result, Space, Tuple};
use isle_val::Val;

#[derive(Clone, PartialEq, Debug)]
pub(crate) struct MockPart<T: FoldTag, const Z: bool> {
    space: Space,
    tag: T,
    defined: bool,
    coeffs: Vec<i64>,
    constant: i64,
}

pub(crate) type ZeroMock = MockPart<(), true>;
pub(crate) type AffMock = MockPart<(), false>;
pub(crate) type FoldMock = MockPart<Fold, true>;

fn ids(params: &[&str]) -> Vec<Id> {
    params.iter().map(|p| Id::new(p)).collect()
}

/// `[params] -> { name[i0, ..] }`
pub(crate) fn domain_space(params: &[&str], name: &str, n: usize) -> Space {
    Space::set(ids(params), Tuple::named(name, n))
}

/// `[params] -> { dom[i0] -> ran[o0] }`
pub(crate) fn map_space(params: &[&str], dom: &str, ran: &str) -> Space {
    Space::map(ids(params), Tuple::named(dom, 1), Tuple::named(ran, 1))
}

fn to_i64(v: IBig) -> Result<i64> {
    i64::try_from(v).map_err(|_| Error::invalid("mock factor out of range"))
}

impl<T: FoldTag, const Z: bool> MockPart<T, Z> {
    pub(crate) fn linear_in(space: Space, tag: T, coeffs: Vec<i64>, constant: i64) -> Self {
        assert_eq!(coeffs.len(), space.n_param());
        Self {
            space,
            tag,
            defined: true,
            coeffs,
            constant,
        }
    }

    pub(crate) fn tagged(params: &[&str], name: &str, value: i64, tag: T) -> Self {
        let space = domain_space(params, name, 1).from_domain().unwrap();
        let n = space.n_param();
        Self::linear_in(space, tag, vec![0; n], value)
    }

    pub(crate) fn value(&self) -> i64 {
        self.constant
    }

    pub(crate) fn param_coeff(&self, name: &str) -> i64 {
        let pos = self.space.find_dim_by_name(DimType::Param, name).unwrap();
        self.coeffs[pos]
    }

    fn check_space(&self, other: &Self) -> Result<()> {
        if self.space.is_equal(&other.space) {
            Ok(())
        } else {
            Err(Error::invalid("spaces don't match"))
        }
    }

    fn combine(self, other: &Self, sign: i64) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(a, b)| a + sign * b)
            .collect();
        Self {
            coeffs,
            constant: self.constant + sign * other.constant,
            ..self
        }
    }

    fn undefined(self) -> Self {
        Self::zero(self.space, self.tag)
    }

    fn times(mut self, k: i64) -> Self {
        for c in &mut self.coeffs {
            *c *= k;
        }
        self.constant *= k;
        self
    }
}

impl<const Z: bool> MockPart<(), Z> {
    pub(crate) fn constant(params: &[&str], name: &str, value: i64) -> Self {
        Self::tagged(params, name, value, ())
    }

    pub(crate) fn constant_in(space: Space, value: i64) -> Self {
        let n = space.n_param();
        Self::linear_in(space, (), vec![0; n], value)
    }
}

impl<T: FoldTag, const Z: bool> Part for MockPart<T, Z> {
    type Tag = T;
    const DEFAULT_IS_ZERO: bool = Z;

    fn space(&self) -> &Space {
        &self.space
    }

    fn tag(&self) -> T {
        self.tag
    }

    fn zero(space: Space, tag: T) -> Self {
        let n = space.n_param();
        Self {
            space,
            tag,
            defined: false,
            coeffs: vec![0; n],
            constant: 0,
        }
    }

    fn is_zero(&self) -> bool {
        !self.defined || (Z && self.constant == 0 && self.coeffs.iter().all(|&c| c == 0))
    }

    fn union_add(self, other: Self) -> Result<Self> {
        self.check_space(&other)?;
        Ok(match (self.defined, other.defined) {
            (_, false) => self,
            (false, true) => other,
            (true, true) => self.combine(&other, 1),
        })
    }

    fn add(self, other: Self) -> Result<Self> {
        self.check_space(&other)?;
        if self.defined && other.defined {
            Ok(self.combine(&other, 1))
        } else {
            Ok(self.undefined())
        }
    }

    fn domain(&self) -> Result<Set> {
        let space = self.space.domain();
        Ok(if self.defined {
            Set::universe(space)
        } else {
            Set::empty(space)
        })
    }

    fn realign_domain(self, r: &Reordering) -> Result<Self> {
        let mut row = self.coeffs.clone();
        row.resize(r.src_len(), 0);
        let mut coeffs = r.apply(&row, &0);
        coeffs.truncate(r.space().n_param());
        Ok(Self {
            space: self.space.with_params(r.space().params().to_vec()),
            coeffs,
            ..self
        })
    }

    fn intersect_params(self, set: &Set) -> Result<Self> {
        if !set.is_params() {
            return Err(Error::invalid("expecting parameter set"));
        }
        Ok(if set.plain_is_empty() { self.undefined() } else { self })
    }

    fn gist_params(self, set: &Set) -> Result<Self> {
        if !set.is_params() {
            return Err(Error::invalid("expecting parameter set"));
        }
        Ok(self)
    }

    fn intersect_domain(self, set: &Set) -> Result<Self> {
        Ok(if set.plain_is_empty() { self.undefined() } else { self })
    }

    fn gist(self, _set: &Set) -> Result<Self> {
        Ok(self)
    }

    fn subtract_domain(self, set: &Set) -> Result<Self> {
        Ok(if set.plain_is_universe() { self.undefined() } else { self })
    }

    fn coalesce(self) -> Result<Self> {
        Ok(self)
    }

    fn mul_int(self, v: &IBig) -> Result<Self> {
        Ok(self.times(to_i64(v.clone())?))
    }

    fn scale_val(self, v: &Val) -> Result<Self> {
        match v.numerator() {
            Some(n) if v.is_int() => Ok(self.times(to_i64(n)?)),
            _ => Err(Error::invalid("mock parts only scale by integers")),
        }
    }

    fn scale_down_val(self, v: &Val) -> Result<Self> {
        let k = match v.numerator() {
            Some(n) if v.is_int() => to_i64(n)?,
            _ => return Err(Error::invalid("mock parts only scale by integers")),
        };
        if k == 0 || self.constant % k != 0 || self.coeffs.iter().any(|c| c % k != 0) {
            return Err(Error::invalid("inexact mock division"));
        }
        let mut part = self;
        for c in &mut part.coeffs {
            *c /= k;
        }
        part.constant /= k;
        Ok(part)
    }

    fn plain_is_equal(&self, other: &Self) -> bool {
        self == other
    }

    fn drop_dims(self, ty: DimType, first: usize, n: usize) -> Result<Self> {
        let space = self.space.drop_dims(ty, first, n)?;
        if ty != DimType::Param {
            return Err(Error::invalid("mock parts only drop parameters"));
        }
        if self.coeffs[first..first + n].iter().any(|&c| c != 0) {
            return Err(Error::invalid("cannot drop parameters that are used"));
        }
        let mut coeffs = self.coeffs;
        coeffs.drain(first..first + n);
        Ok(Self {
            space,
            coeffs,
            ..self
        })
    }

    fn set_dim_name(self, ty: DimType, pos: usize, name: &str) -> Result<Self> {
        Ok(Self {
            space: self.space.set_dim_name(ty, pos, name)?,
            ..self
        })
    }

    fn reset_user(self) -> Self {
        Self {
            space: self.space.reset_user(),
            ..self
        }
    }
}

impl<const Z: bool> SubPart for MockPart<(), Z> {
    fn sub(self, other: Self) -> Result<Self> {
        self.check_space(&other)?;
        if self.defined && other.defined {
            Ok(self.combine(&other, -1))
        } else {
            Ok(self.undefined())
        }
    }
}
