//! Property-based tests for the union algebra.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::mock::ZeroMock;
    use crate::{Part, Union};
    use isle_space::Space;
    use isle_val::Val;

    const TUPLES: [&str; 4] = ["A", "B", "C", "D"];

    // Strategy for generating unions with parts over a random subset of tuples
    fn union() -> impl Strategy<Value = Union<ZeroMock>> {
        prop::collection::vec((0..TUPLES.len(), -5i64..5), 0..6).prop_map(|parts| {
            parts.into_iter().fold(
                Union::zero(&Space::named_params(&["N"]), ()),
                |u, (t, v)| {
                    u.add_part_generic(ZeroMock::constant(&["N"], TUPLES[t], v), false)
                        .unwrap()
                },
            )
        })
    }

    fn value_at(u: &Union<ZeroMock>, t: usize) -> i64 {
        let space = ZeroMock::constant(&["N"], TUPLES[t], 0).space().clone();
        u.extract_part(&space).unwrap().value()
    }

    proptest! {
        #[test]
        fn add_zero_is_identity(u in union()) {
            let zero = Union::zero(u.space(), ());
            let sum = u.clone().add(zero).unwrap();
            prop_assert!(sum.plain_is_equal(&u).unwrap());
        }

        #[test]
        fn add_is_pointwise(a in union(), b in union()) {
            let sum = a.clone().add(b.clone()).unwrap();
            for t in 0..TUPLES.len() {
                prop_assert_eq!(value_at(&sum, t), value_at(&a, t) + value_at(&b, t));
            }
        }

        #[test]
        fn add_commutes(a in union(), b in union()) {
            let ab = a.clone().add(b.clone()).unwrap();
            let ba = b.add(a).unwrap();
            prop_assert!(ab.plain_is_equal(&ba).unwrap());
        }

        #[test]
        fn no_zero_parts_are_stored(a in union(), b in union()) {
            let sum = a.add(b).unwrap();
            prop_assert!(sum.parts().all(|p| !p.is_zero()));
        }

        #[test]
        fn plain_is_equal_is_symmetric(a in union(), b in union()) {
            prop_assert_eq!(a.plain_is_equal(&b).unwrap(), b.plain_is_equal(&a).unwrap());
            prop_assert!(a.plain_is_equal(&a).unwrap());
        }

        #[test]
        fn align_to_own_params_is_noop(u in union()) {
            let space = u.space().clone();
            let v = u.clone().align_params(&space).unwrap();
            prop_assert!(u.ptr_eq(&v));
        }

        #[test]
        fn scale_then_scale_down_round_trips(u in union(), k in 1i64..6) {
            let k = Val::int(k);
            let v = u.clone().scale_val(&k).unwrap().scale_down_val(&k).unwrap();
            prop_assert!(v.plain_is_equal(&u).unwrap());
        }
    }
}
