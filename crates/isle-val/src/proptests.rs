//! Property-based tests for values.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::Val;

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn val_mul_commutative(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int()
        ) {
            let a = Val::rat(num_a, den_a);
            let b = Val::rat(num_b, den_b);
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn val_rat_is_canonical(num in small_int(), den in non_zero_int(), k in non_zero_int()) {
            prop_assert_eq!(Val::rat(num * k, den * k), Val::rat(num, den));
        }

        #[test]
        fn val_recip_involution(num in non_zero_int(), den in non_zero_int()) {
            let a = Val::rat(num, den);
            prop_assert_eq!(a.recip().recip(), a.clone());
            prop_assert!((&a * &a.recip()).is_one());
        }

        #[test]
        fn val_sign_matches_operands(num in non_zero_int(), den in non_zero_int()) {
            let a = Val::rat(num, den);
            prop_assert_eq!(a.is_neg(), (num < 0) != (den < 0));
            prop_assert_eq!((-a.clone()).is_neg(), !a.is_neg());
        }
    }
}
