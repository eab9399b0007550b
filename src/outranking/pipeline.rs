use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

use super::aggregate::{aggregate, AlternativeScore, OutrankingMatrix};
use super::concordance::concordance;
use super::criteria::Criteria;
use super::discordance::discordance;
use super::dominance::{
    concordant_dominance, discordant_dominance, BinaryMatrix, DiscordanceThreshold,
    DEFAULT_CONCORDANCE_THRESHOLD,
};
use super::error::ElectreError;
use super::matrix::{DecisionMatrix, PairwiseMatrix};
use super::normalize::{normalize, NormalizationRule, NormalizedMatrix};
use super::weights::{apply_weights, WeightedMatrix};

/// Tunable parts of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub rule: NormalizationRule,
    pub concordance_threshold: f64,
    pub discordance_threshold: DiscordanceThreshold,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rule: NormalizationRule::MinMax,
            concordance_threshold: DEFAULT_CONCORDANCE_THRESHOLD,
            discordance_threshold: DiscordanceThreshold::Mean,
        }
    }
}

/// Every matrix produced by one run, in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectreReport {
    pub normalized: NormalizedMatrix,
    pub weighted: WeightedMatrix,
    pub concordance: PairwiseMatrix,
    pub discordance: PairwiseMatrix,
    pub concordance_threshold: f64,
    pub discordance_threshold: f64,
    pub concordant_dominance: BinaryMatrix,
    pub discordant_dominance: BinaryMatrix,
    pub outranking: OutrankingMatrix,
    pub scores: Vec<AlternativeScore>,
}

impl ElectreReport {
    /// Scores sorted by outranks descending, then outranked-by ascending.
    /// Ties keep input order.
    pub fn ranking(&self) -> Vec<AlternativeScore> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| match b.outranks.cmp(&a.outranks) {
            Ordering::Equal => a.outranked_by.cmp(&b.outranked_by),
            other => other,
        });
        ranked
    }

    /// Alternatives outranked by nobody.
    pub fn kernel(&self) -> Vec<String> {
        self.outranking.kernel()
    }
}

/// The ELECTRE outranking pipeline for one criterion configuration.
#[derive(Debug, Clone)]
pub struct Electre {
    criteria: Criteria,
    settings: Settings,
}

impl Electre {
    pub fn new(criteria: Criteria, settings: Settings) -> Self {
        Self { criteria, settings }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run normalization through aggregation on `matrix`.
    ///
    /// Criteria are checked against the matrix columns before any stage
    /// runs, so a configuration problem never yields a partial report.
    pub fn run(&self, matrix: &DecisionMatrix) -> Result<ElectreReport, ElectreError> {
        self.check_columns(matrix)?;

        let normalized = normalize(matrix, &self.criteria, self.settings.rule)?;
        let weighted = apply_weights(&normalized, &self.criteria)?;
        let concordance = concordance(&normalized, &self.criteria)?;
        let discordance = discordance(&weighted);

        let concordance_threshold = self.settings.concordance_threshold;
        let discordance_threshold = self.settings.discordance_threshold.resolve(&discordance);
        debug!(concordance_threshold, discordance_threshold, "dominance thresholds");

        let concordant = concordant_dominance(&concordance, concordance_threshold);
        let discordant = discordant_dominance(&discordance, discordance_threshold);
        let outranking = aggregate(&concordant, &discordant)?;
        let scores = outranking.scores();

        info!(
            alternatives = matrix.n_rows(),
            criteria = matrix.n_columns(),
            relations = outranking.cells().iter().filter(|cell| **cell).count(),
            "outranking complete"
        );

        Ok(ElectreReport {
            normalized,
            weighted,
            concordance,
            discordance,
            concordance_threshold,
            discordance_threshold,
            concordant_dominance: concordant,
            discordant_dominance: discordant,
            outranking,
            scores,
        })
    }

    fn check_columns(&self, matrix: &DecisionMatrix) -> Result<(), ElectreError> {
        let missing = self.criteria.missing_directions(matrix.criteria());
        if !missing.is_empty() {
            return Err(ElectreError::DirectionCount { missing });
        }
        if !self.criteria.names().same_set(matrix.criteria()) {
            return Err(ElectreError::CriteriaMismatch {
                expected: matrix.criteria().sorted(),
                found: self.criteria.names().sorted(),
            });
        }
        Ok(())
    }
}
