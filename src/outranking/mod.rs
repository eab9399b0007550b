pub mod aggregate;
pub mod concordance;
pub mod criteria;
pub mod discordance;
pub mod dominance;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod pipeline;
pub mod summary;
pub mod weights;

pub use aggregate::{aggregate, AlternativeScore, OutrankingMatrix};
pub use concordance::concordance;
pub use criteria::{Criteria, Criterion, Direction};
pub use discordance::discordance;
pub use dominance::{
    concordant_dominance, discordant_dominance, BinaryMatrix, DiscordanceThreshold,
    DEFAULT_CONCORDANCE_THRESHOLD,
};
pub use error::ElectreError;
pub use matrix::{approx_eq, DecisionMatrix, Labels, PairwiseMatrix, Table};
pub use normalize::{normalize, NormalizationRule, NormalizedMatrix};
pub use pipeline::{Electre, ElectreReport, Settings};
pub use summary::{summarize, ColumnSummary};
pub use weights::{apply_weights, WeightedMatrix};
