use anyhow::{Result, ensure};
use polars::frame::DataFrame;

use crate::{common::{Value, column_values}, facet::Privileged};

/// Privileged/unprivileged split of a dataset's rows.
///
/// Every row lands in exactly one facet: `mask[row]` is `true` for privileged rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Facets {
    mask: Vec<bool>,
    privileged: usize,
}

impl Facets {
    /// Partition the rows of `df` on the values of `attribute`.
    pub fn split(df: &DataFrame, attribute: &str, privileged: &Privileged) -> Result<Self> {
        Ok(Self::from_values(&column_values(df, attribute)?, privileged))
    }

    /// Partition an already extracted attribute column.
    pub fn from_values(values: &[Value], privileged: &Privileged) -> Self {
        let mask = values.iter().map(|value| privileged.matches(value)).collect::<Vec<_>>();
        let privileged = mask.iter().filter(|&&p| p).count();
        Self { mask, privileged }
    }

    /// Total number of rows across both facets.
    #[inline] pub fn len(&self) -> usize { self.mask.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.mask.is_empty() }

    #[inline] pub fn privileged_count(&self) -> usize { self.privileged }

    #[inline] pub fn unprivileged_count(&self) -> usize { self.mask.len() - self.privileged }

    #[inline] pub fn is_privileged(&self, row: usize) -> bool { self.mask[row] }

    /// Boolean mask over rows, `true` = privileged.
    #[inline] pub fn mask(&self) -> &[bool] { &self.mask }

    /// Split a row-aligned column into its (privileged, unprivileged) sub-populations,
    /// preserving row order within each facet.
    pub fn partition<T: Clone>(&self, values: &[T]) -> Result<(Vec<T>, Vec<T>)> {
        ensure!(values.len() == self.mask.len(),
            "[Facets::partition] column length ({}) must match facet mask length ({})",
            values.len(),
            self.mask.len(),
        );

        let mut privileged = Vec::with_capacity(self.privileged);
        let mut unprivileged = Vec::with_capacity(self.unprivileged_count());
        for (value, &is_privileged) in values.iter().zip(&self.mask) {
            if is_privileged { privileged.push(value.clone()) } else { unprivileged.push(value.clone()) }
        }
        Ok((privileged, unprivileged))
    }
}
