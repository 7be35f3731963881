//! Property-based tests for set operations, checked pointwise.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Constraint, Set};
    use isle_space::{Space, Tuple};

    fn space() -> Space {
        Space::set(vec![], Tuple::named("S", 1))
    }

    // Strategy for generating intervals, possibly empty
    fn interval() -> impl Strategy<Value = Set> {
        (-8i64..8, -8i64..8).prop_map(|(lo, hi)| {
            Set::from_constraints(
                space(),
                vec![Constraint::ineq_i64(&[1], -lo), Constraint::ineq_i64(&[-1], hi)],
            )
            .unwrap()
        })
    }

    // Strategy for generating unions of up to three intervals
    fn set() -> impl Strategy<Value = Set> {
        prop::collection::vec(interval(), 1..=3).prop_map(|parts| {
            parts
                .iter()
                .skip(1)
                .fold(parts[0].clone(), |acc, p| acc.union(p).unwrap())
        })
    }

    proptest! {
        #[test]
        fn intersect_is_pointwise_and(a in set(), b in set()) {
            let c = a.intersect(&b).unwrap();
            for x in -10..10 {
                prop_assert_eq!(c.contains(&[x]), a.contains(&[x]) && b.contains(&[x]));
            }
        }

        #[test]
        fn union_is_pointwise_or(a in set(), b in set()) {
            let c = a.union(&b).unwrap();
            for x in -10..10 {
                prop_assert_eq!(c.contains(&[x]), a.contains(&[x]) || b.contains(&[x]));
            }
        }

        #[test]
        fn subtract_is_pointwise_and_not(a in set(), b in set()) {
            let c = a.subtract(&b).unwrap();
            for x in -10..10 {
                prop_assert_eq!(c.contains(&[x]), a.contains(&[x]) && !b.contains(&[x]));
            }
        }

        #[test]
        fn coalesce_keeps_points(a in set()) {
            let c = a.coalesce();
            prop_assert!(c.n_basic() <= a.n_basic());
            for x in -10..10 {
                prop_assert_eq!(c.contains(&[x]), a.contains(&[x]));
            }
        }

        #[test]
        fn gist_agrees_inside_context(a in set(), ctx in set()) {
            let g = a.gist(&ctx).unwrap();
            for x in -10..10 {
                if ctx.contains(&[x]) {
                    prop_assert_eq!(g.contains(&[x]), a.contains(&[x]));
                }
            }
        }
    }
}
