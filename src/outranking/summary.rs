use serde::Serialize;

use super::matrix::Table;

/// Distribution of one criterion column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub criterion: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Per-column statistics, used to compare a matrix before and after normalization.
pub fn summarize(table: &Table<f64>) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(j, criterion)| {
            let values: Vec<f64> = table.column(j).collect();
            let n = values.len().max(1) as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            ColumnSummary {
                criterion: criterion.to_string(),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                mean,
                std: variance.sqrt(),
            }
        })
        .collect()
}
