//! Labelled dense tables shared by every pipeline stage.
//!
//! Cells are stored row-major in a single `Vec`. Rows and columns are
//! addressed either by position or by identifier through [`Labels`], an
//! ordered identifier-to-position map.

use indexmap::IndexSet;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::ops::Deref;

use super::error::ElectreError;

/// Absolute tolerance for [`approx_eq`].
pub const ABS_TOLERANCE: f64 = 1e-8;
/// Relative tolerance for [`approx_eq`].
pub const REL_TOLERANCE: f64 = 1e-5;

/// Symmetric floating-point closeness test.
///
/// `|a - b| <= ABS_TOLERANCE + REL_TOLERANCE * max(|a|, |b|)`
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= ABS_TOLERANCE + REL_TOLERANCE * a.abs().max(b.abs())
}

/// Ordered, duplicate-free identifiers for one axis of a [`Table`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Labels(IndexSet<String>);

// `IndexSet` equality ignores order; labels must match position by position.
impl PartialEq for Labels {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Labels {}

impl Labels {
    /// Build labels from identifiers, returning the first duplicate on failure.
    pub fn try_from_iter<I, S>(ids: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for id in ids {
            let id = id.into();
            if set.contains(&id) {
                return Err(id);
            }
            set.insert(id);
        }
        Ok(Self(set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `id` on this axis.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.get_index_of(id)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Set equality, ignoring order.
    pub fn same_set(&self, other: &Labels) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }

    /// Identifiers in lexical order, used in error reports.
    pub fn sorted(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.0.iter().cloned().collect();
        ids.sort();
        ids
    }
}

/// Dense row-major table with labelled rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    rows: Labels,
    columns: Labels,
    cells: Vec<T>,
}

impl<T: Copy> Table<T> {
    /// Build a table from nested rows, checking every row has one cell per column.
    pub fn from_rows(rows: Labels, columns: Labels, data: Vec<Vec<T>>) -> Result<Self, ElectreError> {
        if data.len() != rows.len() {
            return Err(ElectreError::RaggedRow {
                row: "<table>".to_string(),
                expected: rows.len(),
                found: data.len(),
            });
        }
        let mut cells = Vec::with_capacity(rows.len() * columns.len());
        for (label, row) in rows.iter().zip(&data) {
            if row.len() != columns.len() {
                return Err(ElectreError::RaggedRow {
                    row: label.to_string(),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { rows, columns, cells })
    }

    /// Build a table by evaluating `f(row, column)` for every cell.
    pub fn from_fn(rows: Labels, columns: Labels, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows.len() * columns.len());
        for i in 0..rows.len() {
            for j in 0..columns.len() {
                cells.push(f(i, j));
            }
        }
        Self { rows, columns, cells }
    }

    pub fn rows(&self) -> &Labels {
        &self.rows
    }

    pub fn columns(&self) -> &Labels {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Cell at (`row`, `column`) by position. Panics when out of bounds.
    pub fn at(&self, row: usize, column: usize) -> T {
        self.cells[row * self.columns.len() + column]
    }

    /// Cell addressed by identifiers.
    pub fn get(&self, row: &str, column: &str) -> Option<T> {
        let i = self.rows.position(row)?;
        let j = self.columns.position(column)?;
        Some(self.at(i, j))
    }

    pub fn row(&self, row: usize) -> &[T] {
        let width = self.columns.len();
        &self.cells[row * width..(row + 1) * width]
    }

    pub fn column(&self, column: usize) -> impl Iterator<Item = T> + '_ {
        (0..self.rows.len()).map(move |i| self.at(i, column))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Table<U> {
        Table {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    /// Same row and column labels in the same order.
    pub fn same_index<U>(&self, other: &Table<U>) -> bool {
        self.rows == other.rows && self.columns == other.columns
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows.len()).map(|i| self.row(i).to_vec()).collect()
    }
}

impl<T: Serialize + Copy> Serialize for Table<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cells: Vec<&[T]> = (0..self.rows.len()).map(|i| self.row(i)).collect();
        let mut state = serializer.serialize_struct("Table", 3)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field("cells", &cells)?;
        state.end()
    }
}

/// Raw performance scores: alternatives by criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecisionMatrix(Table<f64>);

impl DecisionMatrix {
    pub fn new<A, C>(alternatives: A, criteria: C, scores: Vec<Vec<f64>>) -> Result<Self, ElectreError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = Labels::try_from_iter(alternatives).map_err(ElectreError::DuplicateAlternative)?;
        let columns = Labels::try_from_iter(criteria).map_err(ElectreError::DuplicateCriterion)?;
        if rows.is_empty() || columns.is_empty() {
            return Err(ElectreError::EmptyMatrix);
        }
        let table = Table::from_rows(rows, columns, scores)?;

        for i in 0..table.n_rows() {
            for j in 0..table.n_columns() {
                if !table.at(i, j).is_finite() {
                    return Err(ElectreError::NonFinite {
                        alternative: table.rows().get(i).unwrap_or_default().to_string(),
                        criterion: table.columns().get(j).unwrap_or_default().to_string(),
                    });
                }
            }
        }
        Ok(Self(table))
    }

    pub fn alternatives(&self) -> &Labels {
        self.0.rows()
    }

    pub fn criteria(&self) -> &Labels {
        self.0.columns()
    }
}

impl Deref for DecisionMatrix {
    type Target = Table<f64>;

    fn deref(&self) -> &Table<f64> {
        &self.0
    }
}

/// Square real-valued table indexed by alternatives on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PairwiseMatrix(Table<f64>);

impl PairwiseMatrix {
    pub(crate) fn from_fn(alternatives: &Labels, f: impl FnMut(usize, usize) -> f64) -> Self {
        Self(Table::from_fn(alternatives.clone(), alternatives.clone(), f))
    }

    /// Build a pairwise matrix from explicit rows, mainly for fixtures.
    pub fn from_rows<A>(alternatives: A, rows: Vec<Vec<f64>>) -> Result<Self, ElectreError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let labels = Labels::try_from_iter(alternatives).map_err(ElectreError::DuplicateAlternative)?;
        Ok(Self(Table::from_rows(labels.clone(), labels, rows)?))
    }

    pub fn alternatives(&self) -> &Labels {
        self.0.rows()
    }

    /// Grand mean over every cell, diagonal included.
    pub fn mean(&self) -> f64 {
        let cells = self.0.cells();
        if cells.is_empty() {
            return 0.0;
        }
        cells.iter().sum::<f64>() / cells.len() as f64
    }
}

impl Deref for PairwiseMatrix {
    type Target = Table<f64>;

    fn deref(&self) -> &Table<f64> {
        &self.0
    }
}
