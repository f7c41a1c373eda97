use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use polars::frame::DataFrame;

use crate::{common::{Value, column_values, safe_divide}, facet::{Facets, Privileged}};

/// Outcome tallies for one subgroup.
#[derive(Clone, Copy, Debug, Default)]
struct SubgroupCounts {
    rows: usize,
    positive: usize,
    unprivileged_positive: usize,
    negative: usize,
    unprivileged_negative: usize,
}

impl SubgroupCounts {
    /// Demographic disparity of the subgroup: the unprivileged share of negative outcomes
    /// minus its share of positive outcomes. Empty denominators count as a zero share.
    fn disparity(&self) -> f64 {
        let accepted = safe_divide(self.unprivileged_positive as f64, self.positive as f64);
        let rejected = safe_divide(self.unprivileged_negative as f64, self.negative as f64);
        rejected - accepted
    }
}

/// Conditional demographic disparity of labels (CDDL).
///
/// For every distinct value of `group_variable`, compares the unprivileged facet's share of
/// non-`positive_outcome` rows with its share of `positive_outcome` rows, then averages the
/// per-subgroup disparities weighted by subgroup size. Positive values mean the unprivileged
/// facet is over-represented among rejections. Bounded by `[-1, 1]`.
pub fn cddl(
    df: &DataFrame,
    target: &str,
    positive_outcome: &Value,
    attribute: &str,
    privileged: &Privileged,
    group_variable: &str,
) -> Result<f64> {
    let labels = column_values(df, target)?;
    let groups = column_values(df, group_variable)?;
    let facets = Facets::split(df, attribute, privileged)?;
    ensure!(
        labels.len() == groups.len() && groups.len() == facets.len(),
        "[cddl] columns '{target}', '{group_variable}' and '{attribute}' differ in length"
    );

    let mut subgroups: BTreeMap<&Value, SubgroupCounts> = BTreeMap::new();
    for (row, (label, group)) in labels.iter().zip(&groups).enumerate() {
        let counts = subgroups.entry(group).or_default();
        let unprivileged = !facets.is_privileged(row);
        counts.rows += 1;
        if label == positive_outcome {
            counts.positive += 1;
            if unprivileged { counts.unprivileged_positive += 1 }
        } else {
            counts.negative += 1;
            if unprivileged { counts.unprivileged_negative += 1 }
        }
    }

    let (weighted, total) = subgroups.values()
        .fold((0.0, 0.0), |(weighted, total), counts| {
            let rows = counts.rows as f64;
            (weighted + rows * counts.disparity(), total + rows)
        });

    Ok(safe_divide(weighted, total))
}

/// Difference in positive proportions of labels (DPL), `q_a - q_d`: the share of
/// `positive_outcome` rows in the privileged facet minus that share in the unprivileged facet.
/// An empty facet has a share of `0.0`.
pub fn dpl(
    df: &DataFrame,
    target: &str,
    positive_outcome: &Value,
    attribute: &str,
    privileged: &Privileged,
) -> Result<f64> {
    let labels = column_values(df, target)?;
    let facets = Facets::split(df, attribute, privileged)?;
    let (privileged, unprivileged) = facets.partition(&labels)?;

    let share = |labels: &[Value]| {
        let positive = labels.iter().filter(|&label| label == positive_outcome).count();
        safe_divide(positive as f64, labels.len() as f64)
    };

    Ok(share(&privileged) - share(&unprivileged))
}
