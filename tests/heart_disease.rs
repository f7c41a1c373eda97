// Reference scenarios on a binary "Sex" attribute (privileged = 1) and a
// "Heart Disease" label with values "Presence" / "Absence".

use biasprobe::{Privileged, class_imbalance, class_imbalance_per_label, kl_divergence, ks};
use polars::{df, frame::DataFrame};

/// Build a frame from per-facet outcome counts.
fn heart(female_presence: usize, female_absence: usize, male_presence: usize, male_absence: usize) -> DataFrame {
    let mut sex = Vec::new();
    let mut disease = Vec::new();
    for (value, presence, absence) in [(0, female_presence, female_absence), (1, male_presence, male_absence)] {
        sex.extend(std::iter::repeat_n(value, presence + absence));
        disease.extend(std::iter::repeat_n("Presence", presence));
        disease.extend(std::iter::repeat_n("Absence", absence));
    }
    df!("Sex" => sex, "Heart Disease" => disease).unwrap()
}

fn round(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

fn male() -> Privileged { Privileged::value(1) }

#[test]
fn class_imbalance_only_female_is_minus_one() {
    let df = heart(4, 6, 0, 0);
    assert_eq!(class_imbalance_per_label(&df, "Sex", &male()).unwrap(), -1.0);
}

#[test]
fn class_imbalance_only_male_is_one() {
    let df = heart(0, 0, 3, 7);
    assert_eq!(class_imbalance_per_label(&df, "Sex", &male()).unwrap(), 1.0);
}

#[test]
fn class_imbalance_one_each_is_zero() {
    let df = heart(1, 0, 0, 1);
    assert_eq!(class_imbalance_per_label(&df, "Sex", &male()).unwrap(), 0.0);
}

#[test]
fn class_imbalance_of_binary_attribute() {
    let df = heart(3, 3, 1, 1);
    assert_eq!(class_imbalance(&df, "Sex", None).unwrap(), 0.5);
}

#[test]
fn kl_divergence_unbalanced_presence() {
    // 80% presence among women, 10% among men
    let df = heart(8, 2, 1, 9);
    assert_eq!(round(kl_divergence(&df, "Heart Disease", "Sex", &male()).unwrap(), 4), 1.1457);
}

#[test]
fn kl_divergence_same_distribution_is_zero() {
    let df = heart(3, 3, 3, 3);
    assert_eq!(kl_divergence(&df, "Heart Disease", "Sex", &male()).unwrap(), 0.0);
}

#[test]
fn kl_divergence_seventy_against_twenty() {
    let df = heart(7, 3, 2, 8);
    assert_eq!(round(kl_divergence(&df, "Heart Disease", "Sex", &male()).unwrap(), 4), 0.5341);
}

#[test]
fn kl_divergence_is_not_symmetric() {
    let df = heart(8, 2, 1, 9);
    let forward = kl_divergence(&df, "Heart Disease", "Sex", &male()).unwrap();
    let swapped = kl_divergence(&df, "Heart Disease", "Sex", &Privileged::value(0)).unwrap();
    assert_eq!(round(swapped, 4), 1.3627);
    assert!(forward != swapped);
}

#[test]
fn ks_seventy_against_twenty() {
    let df = heart(7, 3, 2, 8);
    assert_eq!(round(ks(&df, "Heart Disease", "Sex", &male()).unwrap(), 10), 0.5);
}

#[test]
fn ks_disjoint_outcomes_is_one() {
    let df = heart(10, 0, 0, 10);
    assert_eq!(ks(&df, "Heart Disease", "Sex", &male()).unwrap(), 1.0);
}

#[test]
fn ks_twenty_against_thirty() {
    let df = heart(2, 8, 3, 7);
    assert_eq!(round(ks(&df, "Heart Disease", "Sex", &male()).unwrap(), 1), 0.1);
}

#[test]
fn ks_same_distribution_is_zero() {
    let df = heart(3, 3, 3, 3);
    assert_eq!(ks(&df, "Heart Disease", "Sex", &male()).unwrap(), 0.0);
}

#[test]
fn ks_three_outcomes() {
    let df = df!(
        "Sex" => &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        "Result" => &[
            "Rejected", "Rejected", "Rejected", "Rejected", "Waitlisted",
            "Waitlisted", "Waitlisted", "Waitlisted", "Accepted", "Accepted",
            "Rejected", "Rejected", "Waitlisted", "Accepted", "Accepted",
            "Accepted", "Accepted", "Accepted", "Accepted", "Accepted",
        ],
    ).unwrap();
    assert_eq!(round(ks(&df, "Result", "Sex", &male()).unwrap(), 1), 0.5);
}

#[test]
fn missing_columns_are_named_in_errors() {
    let df = heart(1, 1, 1, 1);
    let err = kl_divergence(&df, "Outcome", "Sex", &male()).unwrap_err();
    assert!(format!("{err:#}").contains("'Outcome'"));
    let err = ks(&df, "Heart Disease", "Gender", &male()).unwrap_err();
    assert!(format!("{err:#}").contains("'Gender'"));
}

#[test]
fn boolean_sex_column_splits_on_numeric_privileged_value() {
    let df = df!(
        "Sex" => &[true, false, true, false],
        "Heart Disease" => &["Presence", "Absence", "Absence", "Absence"],
    ).unwrap();
    let male = Privileged::value(1);

    assert_eq!(class_imbalance_per_label(&df, "Sex", &male).unwrap(), 0.0);
    assert_eq!(ks(&df, "Heart Disease", "Sex", &male).unwrap(), 0.5);
    assert_eq!(kl_divergence(&df, "Heart Disease", "Sex", &male).unwrap(), f64::INFINITY);
}
