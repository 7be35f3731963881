//! Property-based tests for parameter alignment.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{parameter_alignment, Id, Space};

    const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

    // Strategy for generating parameter lists without repetition
    fn param_list() -> impl Strategy<Value = Vec<Id>> {
        proptest::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len())
            .prop_shuffle()
            .prop_map(|names| names.into_iter().map(Id::new).collect())
    }

    proptest! {
        #[test]
        fn alignment_keeps_model_prefix(from in param_list(), model in param_list()) {
            let from = Space::params_alloc(from);
            let model = Space::params_alloc(model);
            let r = parameter_alignment(&from, &model).unwrap();

            let target = r.space().params();
            prop_assert_eq!(&target[..model.n_param()], model.params());
            for p in from.params() {
                prop_assert!(target.contains(p));
            }
        }

        #[test]
        fn alignment_moves_values_with_names(from in param_list(), model in param_list()) {
            let from = Space::params_alloc(from);
            let model = Space::params_alloc(model);
            let r = parameter_alignment(&from, &model).unwrap();

            let row: Vec<Option<Id>> = from.params().iter().cloned().map(Some).collect();
            let moved = r.apply(&row, &None);
            for (i, p) in r.space().params().iter().enumerate() {
                if let Some(id) = &moved[i] {
                    prop_assert_eq!(id, p);
                }
            }
        }

        #[test]
        fn alignment_is_idempotent(from in param_list(), model in param_list()) {
            let from = Space::params_alloc(from);
            let model = Space::params_alloc(model);
            let aligned = from.align_params(&model).unwrap();
            let again = aligned.align_params(&model).unwrap();
            prop_assert_eq!(aligned, again);
        }
    }
}
