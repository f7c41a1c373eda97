use std::fmt;

use anyhow::Result;
use polars::frame::DataFrame;
use serde::{Deserialize, Serialize};

use crate::{Metric, PermutationTester, common::Value, facet::Privileged};

/// Columns and outcome definitions for auditing one protected attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Label / decision column whose distribution is compared across facets.
    pub target: String,
    /// Target value counted as the favorable outcome.
    pub positive_outcome: Value,
    /// Protected attribute column.
    pub attribute: String,
    /// Which attribute values form the privileged facet.
    pub privileged: Privileged,
    /// Subgroup column for CDDL; CDDL is skipped when absent.
    pub group_variable: Option<String>,
}

impl AuditConfig {
    pub fn new(
        target: impl Into<String>,
        positive_outcome: impl Into<Value>,
        attribute: impl Into<String>,
        privileged: Privileged,
    ) -> Self {
        Self {
            target: target.into(),
            positive_outcome: positive_outcome.into(),
            attribute: attribute.into(),
            privileged,
            group_variable: None,
        }
    }

    /// Condition CDDL on the given subgroup column.
    pub fn with_group_variable(mut self, group_variable: impl Into<String>) -> Self {
        self.group_variable = Some(group_variable.into());
        self
    }

    /// The labelled metrics making up a report, in report order.
    pub fn metrics(&self) -> Vec<(String, Metric)> {
        let attribute = &self.attribute;
        let mut metrics = vec![
            (format!("class imbalance ({attribute})"),
                Metric::class_imbalance_per_label(attribute, self.privileged.clone())),
            (format!("kl divergence ({attribute})"),
                Metric::kl_divergence(&self.target, attribute, self.privileged.clone())),
            (format!("ks ({attribute})"),
                Metric::ks(&self.target, attribute, self.privileged.clone())),
        ];
        if let Some(group_variable) = &self.group_variable {
            metrics.push((format!("cddl ({attribute}, {group_variable})"),
                Metric::cddl(&self.target, self.positive_outcome.clone(), attribute, self.privileged.clone(), group_variable)));
        }
        metrics
    }
}

/// One row of a [`BiasReport`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub value: f64,
    /// Two-sided permutation p-value, when the report was built with a tester.
    pub p_value: Option<f64>,
}

/// All bias metrics for one protected attribute, in a fixed order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub entries: Vec<ReportEntry>,
}

impl BiasReport {
    /// Compute class imbalance, KL divergence, KS and (with a group variable) CDDL.
    pub fn evaluate(df: &DataFrame, config: &AuditConfig) -> Result<Self> {
        let entries = config.metrics().into_iter()
            .map(|(name, metric)| Ok(ReportEntry { name, value: metric.compute(df)?, p_value: None }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Like [`BiasReport::evaluate`], attaching a permutation p-value to every entry.
    pub fn evaluate_with_permutations(df: &DataFrame, config: &AuditConfig, tester: &PermutationTester) -> Result<Self> {
        let entries = config.metrics().into_iter()
            .map(|(name, metric)| {
                let result = tester.run(df, &metric)?;
                Ok(ReportEntry { name, value: result.observed, p_value: Some(result.p_value()) })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Look up an entry's value by its label, e.g. `"ks (Sex)"`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|entry| entry.name == name).map(|entry| entry.value)
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl fmt::Display for BiasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BiasReport {{")?;
        for entry in &self.entries {
            match entry.p_value {
                Some(p_value) => writeln!(f, "  {}: {:.4} (p={:.4})", entry.name, entry.value, p_value)?,
                None => writeln!(f, "  {}: {:.4}", entry.name, entry.value)?,
            }
        }
        write!(f, "}}")
    }
}
