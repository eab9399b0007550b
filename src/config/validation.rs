use std::collections::HashSet;

use super::schema::Config;
use crate::outranking::{approx_eq, NormalizationRule};

/// Validate a configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = NormalizationRule::from_id(config.normalization) {
        errors.push(format!("normalization: {}", e));
    }

    if let Some(t) = config.concordance_threshold {
        if !(0.0..=1.0).contains(&t) {
            errors.push(format!("concordance_threshold: {} is outside [0, 1]", t));
        }
    }

    if let Some(t) = config.discordance_threshold {
        if !(0.0..=1.0).contains(&t) {
            errors.push(format!("discordance_threshold: {} is outside [0, 1]", t));
        }
    }

    if config.criteria.is_empty() {
        errors.push("criteria: at least one criterion is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, criterion) in config.criteria.iter().enumerate() {
        if criterion.name.trim().is_empty() {
            errors.push(format!("criteria[{}].name: must not be empty", i));
        }
        if !seen.insert(criterion.name.as_str()) {
            errors.push(format!("criteria[{}].name: duplicate criterion '{}'", i, criterion.name));
        }
        if criterion.direction.is_none() {
            errors.push(format!(
                "criteria[{}].direction: missing for '{}' (use min or max)",
                i, criterion.name
            ));
        }
        match criterion.weight {
            None => errors.push(format!("criteria[{}].weight: missing for '{}'", i, criterion.name)),
            Some(w) if !w.is_finite() || w < 0.0 => {
                errors.push(format!("criteria[{}].weight: must be non-negative, got {}", i, w))
            }
            Some(_) => {}
        }
    }

    if !config.criteria.is_empty() && config.criteria.iter().all(|c| c.weight.is_some()) {
        let sum: f64 = config.criteria.iter().filter_map(|c| c.weight).sum();
        if !approx_eq(sum, 1.0) {
            errors.push(format!("criteria: weights sum to {}, expected 1", sum));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CriterionConfig;
    use crate::outranking::Direction;

    fn criterion(name: &str, direction: Option<Direction>, weight: Option<f64>) -> CriterionConfig {
        CriterionConfig {
            name: name.to_string(),
            direction,
            weight,
        }
    }

    fn config(criteria: Vec<CriterionConfig>) -> Config {
        Config {
            normalization: 2,
            concordance_threshold: None,
            discordance_threshold: None,
            criteria,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config(vec![
            criterion("price", Some(Direction::Minimize), Some(3.0 / 11.5)),
            criterion("battery", Some(Direction::Maximize), Some(8.5 / 11.5)),
        ]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_criteria() {
        let result = validate_config(&config(vec![]));
        let errors = result.unwrap_err();
        assert!(errors[0].contains("at least one criterion"));
    }

    #[test]
    fn test_invalid_rule() {
        let mut config = config(vec![criterion("a", Some(Direction::Maximize), Some(1.0))]);
        config.normalization = 9;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("normalization:"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = config(vec![criterion("a", Some(Direction::Maximize), Some(1.0))]);
        config.concordance_threshold = Some(1.5);
        config.discordance_threshold = Some(-0.1);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("concordance_threshold"));
        assert!(errors[1].contains("discordance_threshold"));
    }

    #[test]
    fn test_weight_sum() {
        let config = config(vec![
            criterion("a", Some(Direction::Maximize), Some(0.5)),
            criterion("b", Some(Direction::Maximize), Some(0.6)),
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("weights sum to"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = config(vec![
            criterion("a", None, Some(0.5)),              // Error 1
            criterion("a", Some(Direction::Minimize), None), // Errors 2 and 3
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("criteria[0].direction"));
        assert!(errors[1].contains("duplicate"));
        assert!(errors[2].contains("criteria[1].weight"));
    }
}
