#![doc = "Pre-training bias metrics with permutation testing"]
//!
//! Splits a tabular dataset (a polars [`DataFrame`](polars::frame::DataFrame)) into privileged
//! and unprivileged facets of a protected attribute and measures how a label is distributed
//! across them: class imbalance, KL divergence, Kolmogorov–Smirnov distance, conditional
//! demographic disparity (CDDL) and difference in positive proportions (DPL). A
//! [`PermutationTester`] turns any of these into a null distribution by shuffling labels.
mod common;
mod distribution;
mod facet;
mod metric;
mod permutation;

#[doc(inline)]
pub use common::{Value, safe_divide};

#[doc(inline)]
pub use facet::{Facets, Privileged};

#[doc(inline)]
pub use distribution::AlignedPmf;

#[doc(inline)]
pub use metric::{
    AuditConfig, BiasReport, Metric, ReportEntry,
    cddl, class_imbalance, class_imbalance_per_label, dpl, kl_divergence, kl_divergence_pmf, ks, ks_pmf,
};

#[doc(inline)]
pub use permutation::{
    PermutationConfig, PermutationResult, PermutationTester,
    cddl_permutation_values, class_imbalance_permutation_values, dpl_permutation_values,
    kl_divergence_permutation_values, ks_permutation_values,
};
