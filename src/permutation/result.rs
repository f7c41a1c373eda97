use serde::{Deserialize, Serialize};

/// Empirical null distribution of a metric plus the statistic observed on the real data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermutationResult {
    /// Metric value of each shuffled trial, in trial order.
    pub values: Vec<f64>,
    /// Metric value on the unshuffled dataset.
    pub observed: f64,
}

impl PermutationResult {
    #[inline] pub fn len(&self) -> usize { self.values.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Split into `(permutation_values, observed_statistic)`.
    #[inline] pub fn into_parts(self) -> (Vec<f64>, f64) { (self.values, self.observed) }

    /// Two-sided empirical p-value: share of trials at least as far from zero as the
    /// observed statistic, as `(k + 1) / (n + 1)`.
    pub fn p_value(&self) -> f64 {
        let observed = self.observed.abs();
        self.tail_fraction(|value| value.abs() >= observed)
    }

    /// One-sided empirical p-value: share of trials at least as large as the observed statistic.
    pub fn p_value_greater(&self) -> f64 {
        self.tail_fraction(|value| value >= self.observed)
    }

    fn tail_fraction(&self, extreme: impl Fn(f64) -> bool) -> f64 {
        let count = self.values.iter().filter(|&&value| extreme(value)).count();
        (count + 1) as f64 / (self.values.len() + 1) as f64
    }
}
