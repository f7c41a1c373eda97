use biasprobe::{Privileged, Value, cddl, class_imbalance_per_label, kl_divergence, ks};
use polars::{df, frame::DataFrame};
use proptest::prelude::*;

/// Rows of (protected attribute, label, subgroup), each drawn from a small domain.
fn rows() -> impl Strategy<Value = Vec<(i32, i32, i32)>> {
    prop::collection::vec((0..2, 0..3, 0..3), 0..60)
}

fn frame(rows: &[(i32, i32, i32)]) -> DataFrame {
    df!(
        "attr" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "label" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "group" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
    ).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn class_imbalance_is_bounded(rows in rows()) {
        let ci = class_imbalance_per_label(&frame(&rows), "attr", &Privileged::value(1)).unwrap();
        prop_assert!((-1.0..=1.0).contains(&ci));

        let privileged = rows.iter().filter(|r| r.0 == 1).count();
        let unprivileged = rows.len() - privileged;
        prop_assert_eq!(ci == 0.0, privileged == unprivileged);
        if !rows.is_empty() {
            prop_assert_eq!(ci == -1.0, privileged == 0);
            prop_assert_eq!(ci == 1.0, unprivileged == 0);
        }
    }

    #[test]
    fn ks_is_bounded(rows in rows()) {
        let value = ks(&frame(&rows), "label", "attr", &Privileged::value(1)).unwrap();
        prop_assert!((0.0..=1.0 + 1e-12).contains(&value));
    }

    #[test]
    fn kl_is_non_negative(rows in rows()) {
        let value = kl_divergence(&frame(&rows), "label", "attr", &Privileged::value(1)).unwrap();
        prop_assert!(value >= -1e-12);
    }

    #[test]
    fn cddl_is_bounded(rows in rows()) {
        let value = cddl(&frame(&rows), "label", &Value::from(1), "attr", &Privileged::value(1), "group").unwrap();
        prop_assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&value));
    }

    #[test]
    fn identical_facets_have_no_divergence(labels in prop::collection::vec(0..4i32, 1..30)) {
        let rows = labels.iter().flat_map(|&l| [(1, l, 0), (0, l, 0)]).collect::<Vec<_>>();
        let df = frame(&rows);
        prop_assert_eq!(ks(&df, "label", "attr", &Privileged::value(1)).unwrap(), 0.0);
        prop_assert_eq!(kl_divergence(&df, "label", "attr", &Privileged::value(1)).unwrap(), 0.0);
    }
}
