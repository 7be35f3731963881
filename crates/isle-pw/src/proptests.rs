//! Property-based tests for piecewise expressions.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Aff, PieceExpr, Pw, QPolynomial};
    use isle_set::{Constraint, Set};
    use isle_space::{Id, Space, Tuple};
    use isle_union::{Part, SubPart};
    use isle_val::Val;

    fn dom() -> Space {
        Space::set(vec![Id::new("N")], Tuple::named("S", 1))
    }

    fn range(lo: i64, hi: i64) -> Set {
        Set::from_constraints(
            dom(),
            vec![
                Constraint::ineq_i64(&[0, 1], -lo),
                Constraint::ineq_i64(&[0, -1], hi),
            ],
        )
        .unwrap()
    }

    // Strategy for generating polynomials `c0 * N + c1 * i + c2` on an interval
    fn pw_qp() -> impl Strategy<Value = Pw<QPolynomial>> {
        (0i64..8, 0i64..8, -3i64..4, -3i64..4, -5i64..6).prop_map(|(lo, len, a, b, c)| {
            let n = QPolynomial::var(0, 2).unwrap().scale(&from_i64(a));
            let i = QPolynomial::var(1, 2).unwrap().scale(&from_i64(b));
            let qp = n.add(&i).unwrap().add(&QPolynomial::from_i64(c, 2)).unwrap();
            Pw::alloc(range(lo, lo + len), qp).unwrap()
        })
    }

    fn pw_aff() -> impl Strategy<Value = Pw<Aff>> {
        (0i64..8, 0i64..8, -3i64..4, -5i64..6).prop_map(|(lo, len, a, c)| {
            Pw::alloc(range(lo, lo + len), Aff::from_i64(&[0, a], c)).unwrap()
        })
    }

    fn from_i64(v: i64) -> dashu::rational::RBig {
        dashu::rational::RBig::from(dashu::integer::IBig::from(v))
    }

    fn points() -> impl Iterator<Item = [i64; 2]> {
        (-1..2).flat_map(|n| (-1..17).map(move |i| [n, i]))
    }

    proptest! {
        #[test]
        fn union_add_is_pointwise(a in pw_qp(), b in pw_qp()) {
            let sum = a.clone().union_add(b.clone()).unwrap();
            for p in points() {
                prop_assert_eq!(sum.eval(&p), a.eval(&p) + b.eval(&p));
            }
        }

        #[test]
        fn sub_then_add_round_trips(a in pw_qp(), b in pw_qp()) {
            let c = a.clone().sub(b.clone()).unwrap().add(b).unwrap();
            for p in points() {
                prop_assert_eq!(c.eval(&p), a.eval(&p));
            }
        }

        #[test]
        fn coalesce_preserves_values(a in pw_qp(), b in pw_qp()) {
            let sum = a.union_add(b).unwrap();
            let c = sum.clone().coalesce().unwrap();
            prop_assert!(c.n_piece() <= sum.n_piece());
            for p in points() {
                prop_assert_eq!(c.eval(&p), sum.eval(&p));
            }
        }

        #[test]
        fn aff_add_is_defined_on_intersection(a in pw_aff(), b in pw_aff()) {
            let sum = a.clone().add(b.clone()).unwrap();
            for p in points() {
                let (x, y) = (a.eval(&p), b.eval(&p));
                if x.is_nan() || y.is_nan() {
                    prop_assert!(sum.eval(&p).is_nan());
                } else {
                    prop_assert_eq!(sum.eval(&p), x + y);
                }
            }
        }

        #[test]
        fn scale_is_pointwise(a in pw_qp(), k in -4i64..5) {
            let scaled = a.clone().scale_val(&Val::int(k)).unwrap();
            for p in points() {
                prop_assert_eq!(scaled.eval(&p), a.eval(&p) * Val::int(k));
            }
        }

        #[test]
        fn align_preserves_values(a in pw_qp()) {
            let model = Space::named_params(&["M", "N"]);
            let aligned = a.clone().align_params(&model).unwrap();
            for p in points() {
                prop_assert_eq!(aligned.eval(&[7, p[0], p[1]]), a.eval(&p));
            }
        }
    }
}
