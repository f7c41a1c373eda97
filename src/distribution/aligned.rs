use std::collections::BTreeMap;

use anyhow::Result;
use ndarray::Array1;
use polars::frame::DataFrame;

use crate::{common::{Value, column_values, safe_divide}, facet::{Facets, Privileged}};

/// Empirical label distributions of the two facets over a shared support.
///
/// `keys[i]` is the label whose probability is `privileged[i]` in the privileged facet and
/// `unprivileged[i]` in the unprivileged facet. Keys follow [`Value`]'s order, and a key is
/// only present when at least one facet gives it nonzero mass.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedPmf {
    keys: Vec<Value>,
    privileged: Array1<f64>,
    unprivileged: Array1<f64>,
}

impl AlignedPmf {
    /// Build the aligned pair from the label values of each facet.
    /// An empty facet contributes an all-zero distribution.
    pub fn from_samples(privileged: &[Value], unprivileged: &[Value]) -> Self {
        let mut counts: BTreeMap<&Value, (usize, usize)> = BTreeMap::new();
        for label in privileged { counts.entry(label).or_default().0 += 1; }
        for label in unprivileged { counts.entry(label).or_default().1 += 1; }

        let (n_privileged, n_unprivileged) = (privileged.len() as f64, unprivileged.len() as f64);
        let mut keys = Vec::with_capacity(counts.len());
        let mut p = Vec::with_capacity(counts.len());
        let mut q = Vec::with_capacity(counts.len());
        for (label, (a, d)) in counts {
            let (pa, pd) = (safe_divide(a as f64, n_privileged), safe_divide(d as f64, n_unprivileged));
            if pa == 0.0 && pd == 0.0 { continue }
            keys.push(label.clone());
            p.push(pa);
            q.push(pd);
        }

        Self { keys, privileged: Array1::from(p), unprivileged: Array1::from(q) }
    }

    /// Split `target` by the facets of `attribute` and align the two label distributions.
    pub fn from_frame(df: &DataFrame, target: &str, attribute: &str, privileged: &Privileged) -> Result<Self> {
        let labels = column_values(df, target)?;
        let facets = Facets::split(df, attribute, privileged)?;
        let (privileged, unprivileged) = facets.partition(&labels)?;
        Ok(Self::from_samples(&privileged, &unprivileged))
    }

    /// Shared label keys, in index order.
    #[inline] pub fn keys(&self) -> &[Value] { &self.keys }

    /// Privileged facet probabilities, indexed like `keys()`.
    #[inline] pub fn privileged(&self) -> &Array1<f64> { &self.privileged }

    /// Unprivileged facet probabilities, indexed like `keys()`.
    #[inline] pub fn unprivileged(&self) -> &Array1<f64> { &self.unprivileged }

    #[inline] pub fn len(&self) -> usize { self.keys.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Iterate `(label, p_privileged, p_unprivileged)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, f64, f64)> + '_ {
        self.keys.iter()
            .zip(self.privileged.iter().copied())
            .zip(self.unprivileged.iter().copied())
            .map(|((key, p), q)| (key, p, q))
    }
}
