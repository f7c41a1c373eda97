use anyhow::Result;
use polars::frame::DataFrame;
use serde::{Deserialize, Serialize};

use crate::{common::Value, facet::Privileged, metric};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum MetricKind {
    // Facet size metrics:
    ClassImbalance { attribute: String, threshold: Option<f64> },
    ClassImbalancePerLabel { attribute: String, privileged: Privileged },

    // Label distribution metrics:
    KlDivergence { target: String, attribute: String, privileged: Privileged },
    Ks { target: String, attribute: String, privileged: Privileged },

    // Outcome disparity metrics:
    Cddl { target: String, positive_outcome: Value, attribute: String, privileged: Privileged, group_variable: String },
    Dpl { target: String, positive_outcome: Value, attribute: String, privileged: Privileged },
}

/// A fully parameterized bias metric: which statistic, over which columns.
///
/// Carries everything needed to evaluate the statistic on a dataset, so the same
/// value can be handed to a [`PermutationTester`](crate::PermutationTester) or a report.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    kind: MetricKind,
}

impl Metric {
    /// Class imbalance of a binary attribute, or of a numeric attribute split at `threshold`.
    pub fn class_imbalance(attribute: impl Into<String>, threshold: Option<f64>) -> Self {
        Self { kind: MetricKind::ClassImbalance { attribute: attribute.into(), threshold } }
    }

    /// Class imbalance between the privileged facet and everyone else.
    pub fn class_imbalance_per_label(attribute: impl Into<String>, privileged: Privileged) -> Self {
        Self { kind: MetricKind::ClassImbalancePerLabel { attribute: attribute.into(), privileged } }
    }

    /// KL divergence of the target's distribution between facets.
    pub fn kl_divergence(target: impl Into<String>, attribute: impl Into<String>, privileged: Privileged) -> Self {
        Self { kind: MetricKind::KlDivergence { target: target.into(), attribute: attribute.into(), privileged } }
    }

    /// Kolmogorov–Smirnov distance of the target's distribution between facets.
    pub fn ks(target: impl Into<String>, attribute: impl Into<String>, privileged: Privileged) -> Self {
        Self { kind: MetricKind::Ks { target: target.into(), attribute: attribute.into(), privileged } }
    }

    /// Conditional demographic disparity of labels, conditioned on `group_variable`.
    pub fn cddl(
        target: impl Into<String>,
        positive_outcome: impl Into<Value>,
        attribute: impl Into<String>,
        privileged: Privileged,
        group_variable: impl Into<String>,
    ) -> Self {
        Self { kind: MetricKind::Cddl {
            target: target.into(),
            positive_outcome: positive_outcome.into(),
            attribute: attribute.into(),
            privileged,
            group_variable: group_variable.into(),
        } }
    }

    /// Difference in positive proportions of labels between facets.
    pub fn dpl(target: impl Into<String>, positive_outcome: impl Into<Value>, attribute: impl Into<String>, privileged: Privileged) -> Self {
        Self { kind: MetricKind::Dpl {
            target: target.into(),
            positive_outcome: positive_outcome.into(),
            attribute: attribute.into(),
            privileged,
        } }
    }

    /// Get a short name for this metric (for display purposes).
    pub fn short_name(&self) -> &str {
        match &self.kind {
            MetricKind::ClassImbalance { .. } => "ClassImbalance",
            MetricKind::ClassImbalancePerLabel { .. } => "ClassImbalancePerLabel",
            MetricKind::KlDivergence { .. } => "KlDivergence",
            MetricKind::Ks { .. } => "Ks",
            MetricKind::Cddl { .. } => "Cddl",
            MetricKind::Dpl { .. } => "Dpl",
        }
    }

    /// Column whose values a permutation test shuffles: the attribute itself for
    /// class imbalance, the target label for every other metric.
    pub fn permuted_column(&self) -> &str {
        match &self.kind {
            MetricKind::ClassImbalance { attribute, .. }
            | MetricKind::ClassImbalancePerLabel { attribute, .. } => attribute,
            MetricKind::KlDivergence { target, .. }
            | MetricKind::Ks { target, .. }
            | MetricKind::Cddl { target, .. }
            | MetricKind::Dpl { target, .. } => target,
        }
    }

    /// Evaluate this metric on a dataset.
    pub fn compute(&self, df: &DataFrame) -> Result<f64> {
        match &self.kind {
            MetricKind::ClassImbalance { attribute, threshold } =>
                metric::class_imbalance(df, attribute, *threshold),
            MetricKind::ClassImbalancePerLabel { attribute, privileged } =>
                metric::class_imbalance_per_label(df, attribute, privileged),
            MetricKind::KlDivergence { target, attribute, privileged } =>
                metric::kl_divergence(df, target, attribute, privileged),
            MetricKind::Ks { target, attribute, privileged } =>
                metric::ks(df, target, attribute, privileged),
            MetricKind::Cddl { target, positive_outcome, attribute, privileged, group_variable } =>
                metric::cddl(df, target, positive_outcome, attribute, privileged, group_variable),
            MetricKind::Dpl { target, positive_outcome, attribute, privileged } =>
                metric::dpl(df, target, positive_outcome, attribute, privileged),
        }
    }
}

use std::fmt;

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            MetricKind::ClassImbalance { attribute, threshold: Some(threshold) } =>
                write!(f, "ClassImbalance(attribute='{}', threshold={})", attribute, threshold),
            MetricKind::ClassImbalance { attribute, threshold: None } =>
                write!(f, "ClassImbalance(attribute='{}')", attribute),
            MetricKind::ClassImbalancePerLabel { attribute, privileged } =>
                write!(f, "ClassImbalancePerLabel(attribute='{}', privileged {})", attribute, privileged),
            MetricKind::KlDivergence { target, attribute, privileged } =>
                write!(f, "KlDivergence(target='{}', attribute='{}', privileged {})", target, attribute, privileged),
            MetricKind::Ks { target, attribute, privileged } =>
                write!(f, "Ks(target='{}', attribute='{}', privileged {})", target, attribute, privileged),
            MetricKind::Cddl { target, positive_outcome, attribute, privileged, group_variable } =>
                write!(f, "Cddl(target='{}', positive={:?}, attribute='{}', privileged {}, group='{}')",
                    target, positive_outcome, attribute, privileged, group_variable),
            MetricKind::Dpl { target, positive_outcome, attribute, privileged } =>
                write!(f, "Dpl(target='{}', positive={:?}, attribute='{}', privileged {})",
                    target, positive_outcome, attribute, privileged),
        }
    }
}

/// Allow Rust-side pretty printing
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metric({})", self.kind)
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
