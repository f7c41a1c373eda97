use anyhow::Result;
use polars::frame::DataFrame;
use tracing::debug;

use crate::{common::safe_divide, distribution::AlignedPmf, facet::Privileged};

/// Kullback–Leibler divergence `sum p * ln(p / q)` of an aligned pair, with `p` the
/// privileged distribution and `q` the unprivileged one.
///
/// Terms where `p = 0` contribute nothing; `p > 0` with `q = 0` makes the result `+inf`.
/// A NaN total collapses to `0.0`.
pub fn kl_divergence_pmf(pmf: &AlignedPmf) -> f64 {
    let total = pmf.iter()
        .map(|(_, p, q)| {
            let term = p * safe_divide(p, q).ln();
            if term.is_nan() { 0.0 } else { term }
        })
        .sum::<f64>();

    if total.is_nan() {
        debug!("[kl_divergence] degenerate distributions; collapsing NaN to 0");
        return 0.0;
    }
    total
}

/// Largest per-label gap between the two aligned distributions (`0.0` when empty).
pub fn ks_pmf(pmf: &AlignedPmf) -> f64 {
    (pmf.privileged() - pmf.unprivileged())
        .iter()
        .fold(0.0, |acc: f64, diff| acc.max(diff.abs()))
}

/// KL divergence of `target`'s distribution in the privileged facet of `attribute`
/// relative to the unprivileged facet. Not symmetric: the privileged facet is the base.
pub fn kl_divergence(df: &DataFrame, target: &str, attribute: &str, privileged: &Privileged) -> Result<f64> {
    Ok(kl_divergence_pmf(&AlignedPmf::from_frame(df, target, attribute, privileged)?))
}

/// Kolmogorov–Smirnov distance between `target`'s per-label probabilities in the two facets.
pub fn ks(df: &DataFrame, target: &str, attribute: &str, privileged: &Privileged) -> Result<f64> {
    Ok(ks_pmf(&AlignedPmf::from_frame(df, target, attribute, privileged)?))
}
