use serde::Serialize;
use std::ops::Deref;

use super::error::ElectreError;
use super::matrix::{Labels, PairwiseMatrix, Table};

/// Default cut-off for concordant dominance.
pub const DEFAULT_CONCORDANCE_THRESHOLD: f64 = 0.5;

/// Square 0/1 table indexed by alternatives on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinaryMatrix(Table<bool>);

impl BinaryMatrix {
    /// Build a binary matrix from explicit rows, mainly for fixtures.
    pub fn from_rows<A>(alternatives: A, rows: Vec<Vec<bool>>) -> Result<Self, ElectreError>
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
}

impl Deref for BinaryMatrix {
    type Target = Table<bool>;

    fn deref(&self) -> &Table<bool> {
        &self.0
    }
}

/// How the discordance cut-off is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DiscordanceThreshold {
    /// Grand mean over the whole discordance matrix, diagonal included.
    #[default]
    Mean,
    Fixed(f64),
}

impl DiscordanceThreshold {
    pub fn resolve(self, discordance: &PairwiseMatrix) -> f64 {
        match self {
            DiscordanceThreshold::Mean => discordance.mean(),
            DiscordanceThreshold::Fixed(value) => value,
        }
    }
}

impl From<Option<f64>> for DiscordanceThreshold {
    fn from(value: Option<f64>) -> Self {
        value.map_or(DiscordanceThreshold::Mean, DiscordanceThreshold::Fixed)
    }
}

/// Cell is set where `C(a,b) > threshold`.
pub fn concordant_dominance(concordance: &PairwiseMatrix, threshold: f64) -> BinaryMatrix {
    BinaryMatrix(concordance.map(|c| c > threshold))
}

/// Cell is set where `D(a,b) < threshold`.
pub fn discordant_dominance(discordance: &PairwiseMatrix, threshold: f64) -> BinaryMatrix {
    BinaryMatrix(discordance.map(|d| d < threshold))
}
