use anyhow::Result;
use polars::{frame::DataFrame, prelude::{IdxSize, Series}};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    Metric,
    common::{Value, series},
    facet::Privileged,
    permutation::{PermutationConfig, PermutationResult},
};

/// Builds empirical null distributions for bias metrics by relabeling rows at random.
///
/// Each trial clones the dataset, replaces the metric's permuted column with a random
/// permutation of its own values, and recomputes the metric on the clone. The caller's
/// dataset is only ever read.
#[derive(Clone, Debug, Default)]
pub struct PermutationTester {
    config: PermutationConfig,
}

impl PermutationTester {
    pub fn new(config: PermutationConfig) -> Self {
        Self { config }
    }

    #[inline] pub fn config(&self) -> &PermutationConfig { &self.config }

    /// Compute `metric` on `df`, then on `repetitions` shuffled copies of it.
    pub fn run(&self, df: &DataFrame, metric: &Metric) -> Result<PermutationResult> {
        let observed = metric.compute(df)?;
        let source = series(df, metric.permuted_column())?;
        let repetitions = self.config.repetitions;

        debug!(
            metric = %metric,
            repetitions,
            parallel = self.config.parallel,
            seed = ?self.config.seed,
            observed,
            "[permutation] starting"
        );

        let trial = |repetition: usize| -> Result<f64> {
            let value = metric.compute(&self.shuffled_copy(df, source, repetition)?)?;
            trace!(repetition, value, "[permutation] trial");
            Ok(value)
        };

        let values = if self.config.parallel {
            (0..repetitions).into_par_iter().map(&trial).collect::<Result<Vec<_>>>()?
        } else {
            (0..repetitions).map(&trial).collect::<Result<Vec<_>>>()?
        };

        debug!(metric = metric.short_name(), trials = values.len(), "[permutation] finished");
        Ok(PermutationResult { values, observed })
    }

    /// Clone `df` with `source` (one of its columns) replaced by a random permutation of itself.
    fn shuffled_copy(&self, df: &DataFrame, source: &Series, repetition: usize) -> Result<DataFrame> {
        let order = match self.config.seed {
            Some(seed) => shuffled_indices(source.len(), &mut StdRng::seed_from_u64(seed.wrapping_add(repetition as u64))),
            None => shuffled_indices(source.len(), &mut rand::rng()),
        };

        let mut copy = df.clone();
        copy.with_column(source.take_slice(&order)?)?;
        Ok(copy)
    }
}

/// A uniformly random ordering of `0..len`.
fn shuffled_indices<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<IdxSize> {
    let mut order = (0..len).map(|i| i as IdxSize).collect::<Vec<_>>();
    order.shuffle(rng);
    order
}

/// Permutation values and observed statistic for [`class_imbalance`](crate::class_imbalance),
/// shuffling the attribute column.
pub fn class_imbalance_permutation_values(
    df: &DataFrame,
    attribute: &str,
    n_repetitions: usize,
    threshold: Option<f64>,
) -> Result<(Vec<f64>, f64)> {
    run_unseeded(df, &Metric::class_imbalance(attribute, threshold), n_repetitions)
}

/// Permutation values and observed statistic for [`kl_divergence`](crate::kl_divergence).
pub fn kl_divergence_permutation_values(
    df: &DataFrame,
    target: &str,
    attribute: &str,
    privileged: &Privileged,
    n_repetitions: usize,
) -> Result<(Vec<f64>, f64)> {
    run_unseeded(df, &Metric::kl_divergence(target, attribute, privileged.clone()), n_repetitions)
}

/// Permutation values and observed statistic for [`ks`](crate::ks).
pub fn ks_permutation_values(
    df: &DataFrame,
    target: &str,
    attribute: &str,
    privileged: &Privileged,
    n_repetitions: usize,
) -> Result<(Vec<f64>, f64)> {
    run_unseeded(df, &Metric::ks(target, attribute, privileged.clone()), n_repetitions)
}

/// Permutation values and observed statistic for [`cddl`](crate::cddl).
pub fn cddl_permutation_values(
    df: &DataFrame,
    target: &str,
    positive_outcome: &Value,
    attribute: &str,
    privileged: &Privileged,
    group_variable: &str,
    n_repetitions: usize,
) -> Result<(Vec<f64>, f64)> {
    let metric = Metric::cddl(target, positive_outcome.clone(), attribute, privileged.clone(), group_variable);
    run_unseeded(df, &metric, n_repetitions)
}

/// Permutation values and observed statistic for [`dpl`](crate::dpl).
pub fn dpl_permutation_values(
    df: &DataFrame,
    target: &str,
    positive_outcome: &Value,
    attribute: &str,
    privileged: &Privileged,
    n_repetitions: usize,
) -> Result<(Vec<f64>, f64)> {
    let metric = Metric::dpl(target, positive_outcome.clone(), attribute, privileged.clone());
    run_unseeded(df, &metric, n_repetitions)
}

fn run_unseeded(df: &DataFrame, metric: &Metric, n_repetitions: usize) -> Result<(Vec<f64>, f64)> {
    Ok(PermutationTester::new(PermutationConfig::new(n_repetitions)).run(df, metric)?.into_parts())
}

#[cfg(test)]
mod tests {
    use polars::df;
    use rand::{SeedableRng, rngs::StdRng};

    use super::{PermutationTester, shuffled_indices};
    use crate::{Metric, common::{Value, column_values}, facet::Privileged, permutation::PermutationConfig};

    fn frame() -> polars::frame::DataFrame {
        df!(
            "sex" => &[1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
            "result" => &["y", "y", "y", "y", "n", "n", "n", "n", "n", "y"],
            "region" => &[1, 2, 1, 2, 1, 2, 1, 2, 1, 2],
        ).unwrap()
    }

    #[test]
    fn shuffled_indices_is_a_permutation() {
        let mut order = shuffled_indices(50, &mut StdRng::seed_from_u64(3));
        order.sort();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffled_copy_leaves_source_untouched() {
        let df = frame();
        let tester = PermutationTester::new(PermutationConfig::new(1).with_seed(11));
        let source = df.column("result").unwrap().as_materialized_series();
        let copy = tester.shuffled_copy(&df, source, 0).unwrap();

        let mut original = column_values(&df, "result").unwrap();
        let mut shuffled = column_values(&copy, "result").unwrap();
        assert_eq!(column_values(&copy, "sex").unwrap(), column_values(&df, "sex").unwrap());
        assert_eq!(column_values(&copy, "region").unwrap(), column_values(&df, "region").unwrap());

        original.sort();
        shuffled.sort();
        assert_eq!(original, shuffled);
        assert_eq!(column_values(&df, "result").unwrap()[0], Value::from("y"));
    }

    #[test]
    fn returns_one_value_per_repetition() {
        let metric = Metric::ks("result", "sex", Privileged::value(1));
        let result = PermutationTester::new(PermutationConfig::new(25)).run(&frame(), &metric).unwrap();
        assert_eq!(result.len(), 25);
        assert_eq!(result.observed, metric.compute(&frame()).unwrap());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let metric = Metric::kl_divergence("result", "sex", Privileged::value(1));
        let tester = PermutationTester::new(PermutationConfig::new(30).with_seed(42));
        let first = tester.run(&frame(), &metric).unwrap();
        let second = tester.run(&frame(), &metric).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parallel_matches_sequential_when_seeded() {
        let metric = Metric::cddl("result", "y", "sex", Privileged::value(1), "region");
        let config = PermutationConfig::new(40).with_seed(5);
        let sequential = PermutationTester::new(config.clone()).run(&frame(), &metric).unwrap();
        let parallel = PermutationTester::new(config.with_parallel(true)).run(&frame(), &metric).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn zero_repetitions_still_reports_observed() {
        let metric = Metric::class_imbalance_per_label("sex", Privileged::value(1));
        let result = PermutationTester::new(PermutationConfig::new(0)).run(&frame(), &metric).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.observed, 0.0);
    }

    #[test]
    fn invalid_metric_fails_before_any_trial() {
        let metric = Metric::ks("outcome", "sex", Privileged::value(1));
        assert!(PermutationTester::new(PermutationConfig::new(5)).run(&frame(), &metric).is_err());
    }
}
