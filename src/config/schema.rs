use serde::{Deserialize, Serialize};

use crate::outranking::{
    Criteria, Criterion, DiscordanceThreshold, Direction, ElectreError, NormalizationRule, Settings,
    DEFAULT_CONCORDANCE_THRESHOLD,
};

fn default_normalization() -> u8 {
    NormalizationRule::MinMax.id()
}

/// Run configuration.
///
/// Example YAML:
/// ```yaml
/// normalization: 2
/// concordance_threshold: 0.5
/// criteria:
///   - { name: price, direction: min, weight: 0.4 }
///   - { name: battery, direction: max, weight: 0.6 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Normalization rule id, 1 to 4 (default: 2, min-max)
    #[serde(default = "default_normalization")]
    pub normalization: u8,

    /// Concordant dominance cut-off (default: 0.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concordance_threshold: Option<f64>,

    /// Discordant dominance cut-off (default: mean of the discordance matrix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discordance_threshold: Option<f64>,

    pub criteria: Vec<CriterionConfig>,
}

/// One criterion as written in the config file.
///
/// Direction and weight are optional here so that a missing value is
/// reported as a configuration error rather than a parse error.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CriterionConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Config {
    /// Validated criteria.
    pub fn criteria(&self) -> Result<Criteria, ElectreError> {
        let missing_directions: Vec<String> = self
            .criteria
            .iter()
            .filter(|c| c.direction.is_none())
            .map(|c| c.name.clone())
            .collect();
        if !missing_directions.is_empty() {
            return Err(ElectreError::DirectionCount {
                missing: missing_directions,
            });
        }

        if self.criteria.iter().any(|c| c.weight.is_none()) {
            let mut expected: Vec<String> = self.criteria.iter().map(|c| c.name.clone()).collect();
            let mut found: Vec<String> = self
                .criteria
                .iter()
                .filter(|c| c.weight.is_some())
                .map(|c| c.name.clone())
                .collect();
            expected.sort();
            found.sort();
            return Err(ElectreError::WeightMismatch { expected, found });
        }

        Criteria::new(
            self.criteria
                .iter()
                .filter_map(|c| Some(Criterion::new(c.name.clone(), c.direction?, c.weight?)))
                .collect(),
        )
    }

    pub fn settings(&self) -> Result<Settings, ElectreError> {
        Ok(Settings {
            rule: NormalizationRule::from_id(self.normalization)?,
            concordance_threshold: self.concordance_threshold.unwrap_or(DEFAULT_CONCORDANCE_THRESHOLD),
            discordance_threshold: DiscordanceThreshold::from(self.discordance_threshold),
        })
    }
}
