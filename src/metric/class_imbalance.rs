use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use polars::frame::DataFrame;

use crate::{common::{Value, column_values, safe_divide}, facet::{Facets, Privileged}};

/// Normalized difference between two facet sizes, `(n_a - n_d) / (n_a + n_d)`.
/// An empty dataset is balanced (`0.0`).
#[inline]
pub(crate) fn imbalance(n_a: usize, n_d: usize) -> f64 {
    safe_divide(n_a as f64 - n_d as f64, (n_a + n_d) as f64)
}

/// Class imbalance between the privileged (`a`) and unprivileged (`d`) facets of `attribute`.
///
/// Ranges over `[-1, 1]`: positive when privileged rows outnumber the rest,
/// `-1` when there are no privileged rows at all.
pub fn class_imbalance_per_label(df: &DataFrame, attribute: &str, privileged: &Privileged) -> Result<f64> {
    let facets = Facets::split(df, attribute, privileged)?;
    Ok(imbalance(facets.privileged_count(), facets.unprivileged_count()))
}

/// Class imbalance of `attribute` without a designated privileged value.
///
/// A binary attribute compares the counts of its two values, larger count first. Any other
/// attribute needs a `threshold`: rows above it are compared with rows at or below it, again
/// larger count first. Nulls take part in neither comparison.
pub fn class_imbalance(df: &DataFrame, attribute: &str, threshold: Option<f64>) -> Result<f64> {
    let values = column_values(df, attribute)?;

    let mut counts: BTreeMap<&Value, usize> = BTreeMap::new();
    for value in values.iter().filter(|value| !value.is_null()) {
        *counts.entry(value).or_default() += 1;
    }

    if counts.len() == 2 {
        let mut sizes = counts.into_values().collect::<Vec<_>>();
        sizes.sort_by(|a, b| b.cmp(a));
        return Ok(imbalance(sizes[0], sizes[1]));
    }

    let Some(threshold) = threshold else {
        bail!("[class_imbalance] attribute '{attribute}' has {} distinct values; \
            a threshold is required for non-binary attributes", counts.len());
    };

    let (mut above, mut below) = (0, 0);
    for value in values.iter().filter(|value| !value.is_null()) {
        let x = value.as_f64().with_context(|| format!(
            "[class_imbalance] attribute '{attribute}' holds non-numeric value {value:?}; \
            cannot compare against threshold {threshold}"))?;
        if x > threshold { above += 1 } else if x <= threshold { below += 1 }
    }

    Ok(imbalance(above.max(below), above.min(below)))
}
