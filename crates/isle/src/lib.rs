//! # isle
//!
//! Unions of piecewise expressions over integer sets.
//!
//! A union holds at most one piecewise expression per domain shape, all
//! sharing one parameter space. Cloning a union is cheap; the first
//! mutation of a shared union duplicates it. Operands built over different
//! parameter lists are aligned before every binary operation.
//!
//! ## Quick Start
//!
//! ```rust
//! use isle::prelude::*;
//!
//! let domain = Space::set(vec![Id::new("N")], Tuple::named("S", 1));
//! let pw = Pw::from_expr(domain.clone(), QPolynomial::from_i64(3, 2)).unwrap();
//! let u = UnionPwQPolynomial::from_part(pw).unwrap();
//!
//! let doubled = u.clone().add(u).unwrap();
//! let part = doubled.extract_part(&domain.from_domain().unwrap()).unwrap();
//! assert_eq!(part.eval(&[0, 5]), Val::int(6));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use isle_pw as pw;
pub use isle_set as set;
pub use isle_space as space;
pub use isle_union as union;
pub use isle_val as val;


/// Prelude module for convenient imports.
pub mod prelude {
    pub use isle_pw::{
        Aff, PieceExpr, PieceSub, Pw, PwAff, PwQPolynomial, PwQPolynomialFold, QPolynomial,
        QPolynomialFold, UnionPwAff, UnionPwQPolynomial, UnionPwQPolynomialFold,
    };
    pub use isle_set::{BasicSet, Constraint, Set, UnionSet};
    pub use isle_space::{DimType, Error, Id, Result, Space, Tuple};
    pub use isle_union::{Fold, FoldTag, Part, SubPart, Union};
    pub use isle_val::Val;
}
