//! Exact values that may also be infinite or undefined.
//!
//! A [`Val`] is either an arbitrary precision rational or one of the three
//! special values `infty`, `-infty` and `NaN`. Only rational values are
//! accepted as scale factors by the union containers.

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg};

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Rat(RBig),
    PosInfty,
    NegInfty,
    NaN,
}

/// A rational value, positive or negative infinity, or NaN.
///
/// Rationals are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Val(Repr);

impl Val {
    /// Creates an integer value.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self(Repr::Rat(RBig::from(IBig::from(value))))
    }

    /// Creates the value `numerator / denominator`.
    ///
    /// A zero denominator yields NaN.
    #[must_use]
    pub fn rat(numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Self::nan();
        }
        let num = IBig::from(numerator) * IBig::from(denominator.signum());
        let den = UBig::from(denominator.unsigned_abs());
        Self(Repr::Rat(RBig::from_parts(num, den)))
    }

    /// Wraps an existing rational.
    #[must_use]
    pub fn from_rational(r: RBig) -> Self {
        Self(Repr::Rat(r))
    }

    /// The value 0.
    #[must_use]
    pub fn zero() -> Self {
        Self(Repr::Rat(RBig::ZERO))
    }

    /// The value 1.
    #[must_use]
    pub fn one() -> Self {
        Self(Repr::Rat(RBig::ONE))
    }

    /// The value -1.
    #[must_use]
    pub fn neg_one() -> Self {
        Self::int(-1)
    }

    /// Positive infinity.
    #[must_use]
    pub fn infinity() -> Self {
        Self(Repr::PosInfty)
    }

    /// Negative infinity.
    #[must_use]
    pub fn neg_infinity() -> Self {
        Self(Repr::NegInfty)
    }

    /// Not a number.
    #[must_use]
    pub fn nan() -> Self {
        Self(Repr::NaN)
    }

    /// Returns true for rational values (finite and not NaN).
    #[must_use]
    pub fn is_rat(&self) -> bool {
        matches!(self.0, Repr::Rat(_))
    }

    /// Returns true for rational values with denominator 1.
    #[must_use]
    pub fn is_int(&self) -> bool {
        match &self.0 {
            Repr::Rat(r) => r.denominator().is_one(),
            _ => false,
        }
    }

    /// Returns true if this is NaN.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self.0, Repr::NaN)
    }

    /// Returns true if this is positive infinity.
    #[must_use]
    pub fn is_infty(&self) -> bool {
        matches!(self.0, Repr::PosInfty)
    }

    /// Returns true if this is negative infinity.
    #[must_use]
    pub fn is_neg_infty(&self) -> bool {
        matches!(self.0, Repr::NegInfty)
    }

    /// Returns true if this is the rational 0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.0, Repr::Rat(r) if *r == RBig::ZERO)
    }

    /// Returns true if this is the rational 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(&self.0, Repr::Rat(r) if *r == RBig::ONE)
    }

    /// Returns true if this is strictly negative (including `-infty`).
    #[must_use]
    pub fn is_neg(&self) -> bool {
        self.signum() == Some(-1)
    }

    /// Returns true if this is strictly positive (including `infty`).
    #[must_use]
    pub fn is_pos(&self) -> bool {
        self.signum() == Some(1)
    }

    /// Returns the sign: -1, 0 or 1, or `None` for NaN.
    #[must_use]
    pub fn signum(&self) -> Option<i8> {
        match &self.0 {
            Repr::Rat(r) => Some(if *r == RBig::ZERO {
                0
            } else if DashuSigned::is_positive(r) {
                1
            } else {
                -1
            }),
            Repr::PosInfty => Some(1),
            Repr::NegInfty => Some(-1),
            Repr::NaN => None,
        }
    }

    /// Returns the rational if this value is one.
    #[must_use]
    pub fn as_rational(&self) -> Option<&RBig> {
        match &self.0 {
            Repr::Rat(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the numerator of a rational value.
    #[must_use]
    pub fn numerator(&self) -> Option<IBig> {
        self.as_rational().map(|r| r.numerator().clone())
    }

    /// Returns the denominator of a rational value.
    #[must_use]
    pub fn denominator(&self) -> Option<IBig> {
        self.as_rational()
            .map(|r| IBig::from(r.denominator().clone()))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        match &self.0 {
            Repr::Rat(r) => Self(Repr::Rat(r.clone().abs())),
            Repr::PosInfty | Repr::NegInfty => Self::infinity(),
            Repr::NaN => Self::nan(),
        }
    }

    /// Returns the reciprocal.
    ///
    /// The reciprocal of zero and of NaN is NaN, that of an infinity is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        match &self.0 {
            Repr::Rat(r) if *r == RBig::ZERO => Self::nan(),
            Repr::Rat(r) => Self(Repr::Rat(r.clone().inv())),
            Repr::PosInfty | Repr::NegInfty => Self::zero(),
            Repr::NaN => Self::nan(),
        }
    }

    fn signed_infinity(sign: i8) -> Self {
        match sign {
            1 => Self::infinity(),
            -1 => Self::neg_infinity(),
            _ => Self::nan(),
        }
    }
}

impl Default for Val {
    fn default() -> Self {
        Self::zero()
    }
}

impl Neg for Val {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.0 {
            Repr::Rat(r) => Self(Repr::Rat(-r)),
            Repr::PosInfty => Self::neg_infinity(),
            Repr::NegInfty => Self::infinity(),
            Repr::NaN => Self::nan(),
        }
    }
}

impl Mul for &Val {
    type Output = Val;

    fn mul(self, rhs: Self) -> Self::Output {
        match (&self.0, &rhs.0) {
            (Repr::NaN, _) | (_, Repr::NaN) => Val::nan(),
            (Repr::Rat(a), Repr::Rat(b)) => Val(Repr::Rat(a * b)),
            _ => match (self.signum(), rhs.signum()) {
                (Some(a), Some(b)) => Val::signed_infinity(a * b),
                _ => Val::nan(),
            },
        }
    }
}

impl Mul for Val {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Add for &Val {
    type Output = Val;

    fn add(self, rhs: Self) -> Self::Output {
        match (&self.0, &rhs.0) {
            (Repr::NaN, _) | (_, Repr::NaN) => Val::nan(),
            (Repr::Rat(a), Repr::Rat(b)) => Val(Repr::Rat(a + b)),
            (Repr::PosInfty, Repr::NegInfty) | (Repr::NegInfty, Repr::PosInfty) => Val::nan(),
            (Repr::PosInfty, _) | (_, Repr::PosInfty) => Val::infinity(),
            (Repr::NegInfty, _) | (_, Repr::NegInfty) => Val::neg_infinity(),
        }
    }
}

impl Add for Val {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Zero for Val {
    fn zero() -> Self {
        Val::zero()
    }

    fn is_zero(&self) -> bool {
        Val::is_zero(self)
    }
}

impl One for Val {
    fn one() -> Self {
        Val::one()
    }

    fn is_one(&self) -> bool {
        Val::is_one(self)
    }
}

impl From<i64> for Val {
    fn from(n: i64) -> Self {
        Self::int(n)
    }
}

impl From<IBig> for Val {
    fn from(n: IBig) -> Self {
        Self(Repr::Rat(RBig::from(n)))
    }
}

impl From<RBig> for Val {
    fn from(r: RBig) -> Self {
        Self::from_rational(r)
    }
}

impl fmt::Debug for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Val({self})")
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Rat(r) if r.denominator().is_one() => write!(f, "{}", r.numerator()),
            Repr::Rat(r) => write!(f, "{}/{}", r.numerator(), r.denominator()),
            Repr::PosInfty => write!(f, "infty"),
            Repr::NegInfty => write!(f, "-infty"),
            Repr::NaN => write!(f, "NaN"),
        }
    }
}
