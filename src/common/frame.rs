use anyhow::{Context, Result};
use polars::frame::DataFrame;
use polars::prelude::Series;

use crate::common::Value;

/// Look up a column by name, failing with an error that names it.
pub(crate) fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    let column = df.column(name)
        .with_context(|| format!("column '{name}' not found in dataset"))?;
    Ok(column.as_materialized_series())
}

/// Read every cell of a column as a [`Value`], in row order.
pub(crate) fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Value>> {
    let series = series(df, name)?;
    (0..series.len())
        .map(|row| Ok(Value::from(&series.get(row)?)))
        .collect()
}
