//! Configuration types for a recipe evolution run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Crossover and mutation probabilities.
    #[serde(default)]
    pub mutation: MutationConfig,
    /// Fitness scoring defaults and disqualification rules.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Locations of the data tables.
    #[serde(default)]
    pub data: DataConfig,
    /// Output rendering.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            random_seed: None,
            mutation: MutationConfig::default(),
            scoring: ScoringConfig::default(),
            data: DataConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

fn default_generations() -> usize {
    5
}

/// Mutation operator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Probability that a drawn slot is replaced by one of its substitutes.
    #[serde(default = "default_substitution_rate")]
    pub substitution_rate: f64,
    /// Probability that a crossover adds a mystery ingredient to the first parent.
    #[serde(default = "default_mystery_rate")]
    pub mystery_rate: f64,
    /// Probability that a mystery ingredient comes from the treat list rather
    /// than the embedding oracle.
    #[serde(default = "default_treat_rate")]
    pub treat_rate: f64,
    /// Amount (ounces) of an inserted mystery ingredient.
    #[serde(default = "default_mystery_amount")]
    pub mystery_amount: f64,
    /// Number of top-ranked oracle suggestions to pick from.
    #[serde(default = "default_suggestion_pool")]
    pub suggestion_pool: usize,
    /// Specialty treats.
    #[serde(default = "default_treats")]
    pub treats: Vec<String>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            substitution_rate: default_substitution_rate(),
            mystery_rate: default_mystery_rate(),
            treat_rate: default_treat_rate(),
            mystery_amount: default_mystery_amount(),
            suggestion_pool: default_suggestion_pool(),
            treats: default_treats(),
        }
    }
}

fn default_substitution_rate() -> f64 {
    0.25
}
fn default_mystery_rate() -> f64 {
    0.1
}
fn default_treat_rate() -> f64 {
    0.2
}
fn default_mystery_amount() -> f64 {
    5.0
}
fn default_suggestion_pool() -> usize {
    5
}
fn default_treats() -> Vec<String> {
    ["tapioca", "egg pudding", "red bean", "crushed oreos"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Fitness scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Co-occurrence probability used for unresolvable pairs.
    #[serde(default = "default_pair_probability")]
    pub default_pair_probability: f64,
    /// Mean affinity used when no ingredient pair has embeddings.
    #[serde(default = "default_affinity")]
    pub default_affinity: f64,
    /// Canonical ingredient names that disqualify a recipe.
    #[serde(default = "default_blocked_ingredients")]
    pub blocked_ingredients: Vec<String>,
    /// Knowledge-base categories that disqualify a recipe.
    #[serde(default = "default_banned_categories")]
    pub banned_categories: Vec<String>,
    /// Embedding key used for any ingredient whose name mentions flour.
    #[serde(default = "default_flour_alias")]
    pub flour_alias: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_pair_probability: default_pair_probability(),
            default_affinity: default_affinity(),
            blocked_ingredients: default_blocked_ingredients(),
            banned_categories: default_banned_categories(),
            flour_alias: default_flour_alias(),
        }
    }
}

fn default_pair_probability() -> f64 {
    0.01
}
fn default_affinity() -> f64 {
    0.25
}
fn default_blocked_ingredients() -> Vec<String> {
    vec!["kiwi fruit".to_string()]
}
fn default_banned_categories() -> Vec<String> {
    [
        "nuts", "seeds", "liquor", "liqueurs", "brandy", "wines", "aperitif", "beer", "bitters",
        "fflakfat",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_flour_alias() -> String {
    "wheat".to_string()
}

/// Data table locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Inspiring set: `[[[name, amount], ...], ...]`.
    #[serde(default = "default_inspiring_set")]
    pub inspiring_set: PathBuf,
    /// Name to canonical-name translation table.
    #[serde(default = "default_translations")]
    pub translations: PathBuf,
    /// Canonical name to category and substitutes.
    #[serde(default = "default_substitutions")]
    pub substitutions: PathBuf,
    /// Ingredient co-occurrence (Markov) table.
    #[serde(default = "default_cooccurrence")]
    pub cooccurrence: PathBuf,
    /// Embeddings used by the ensemble oracle and mystery suggestions.
    #[serde(default = "default_embeddings")]
    pub embeddings: PathBuf,
    /// Embeddings for pairwise flavor affinity. Falls back to `embeddings`.
    #[serde(default)]
    pub affinity_embeddings: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            inspiring_set: default_inspiring_set(),
            translations: default_translations(),
            substitutions: default_substitutions(),
            cooccurrence: default_cooccurrence(),
            embeddings: default_embeddings(),
            affinity_embeddings: None,
        }
    }
}

fn default_inspiring_set() -> PathBuf {
    PathBuf::from("inspiring_set.json")
}
fn default_translations() -> PathBuf {
    PathBuf::from("translation_dict.json")
}
fn default_substitutions() -> PathBuf {
    PathBuf::from("sub_dict.json")
}
fn default_cooccurrence() -> PathBuf {
    PathBuf::from("recipe_markov.json")
}
fn default_embeddings() -> PathBuf {
    PathBuf::from("food_vecs.json")
}

/// Recipe card rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Dish names picked from for the title.
    #[serde(default = "default_dish_names")]
    pub dish_names: Vec<String>,
    /// Scale the winning recipe to this many ounces before rendering.
    #[serde(default)]
    pub normalize_total: Option<f64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dish_names: default_dish_names(),
            normalize_total: None,
        }
    }
}

fn default_dish_names() -> Vec<String> {
    ["cookies", "biscuits", "shortbread"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ============================================================================
// Validation
// ============================================================================

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population needs at least 3 recipes to stay the same size, got {0}")]
    PopulationTooSmall(usize),
    #[error("Probability {name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Mystery ingredient amount must be positive")]
    InvalidMysteryAmount,
    #[error("Suggestion pool must be non-empty")]
    EmptySuggestionPool,
    #[error("Treat list must be non-empty")]
    NoTreats,
    #[error("Default score {name} must be finite, got {value}")]
    InvalidDefault { name: &'static str, value: f64 },
}

impl EvolutionConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check_probability = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidProbability { name, value })
            }
        };

        check_probability(self.mutation.substitution_rate, "substitution_rate")?;
        check_probability(self.mutation.mystery_rate, "mystery_rate")?;
        check_probability(self.mutation.treat_rate, "treat_rate")?;
        check_probability(
            self.scoring.default_pair_probability,
            "default_pair_probability",
        )?;

        let amount = self.mutation.mystery_amount;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConfigError::InvalidMysteryAmount);
        }
        if self.mutation.suggestion_pool == 0 {
            return Err(ConfigError::EmptySuggestionPool);
        }
        if self.mutation.treats.is_empty() {
            return Err(ConfigError::NoTreats);
        }
        if !self.scoring.default_affinity.is_finite() {
            return Err(ConfigError::InvalidDefault {
                name: "default_affinity",
                value: self.scoring.default_affinity,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mutation.treats.len(), 4);
        assert_eq!(config.scoring.banned_categories.len(), 10);
    }

    #[test]
    fn test_invalid_probability() {
        let mut config = EvolutionConfig::default();
        config.mutation.substitution_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "substitution_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_mutation_settings() {
        let mut config = EvolutionConfig::default();
        config.mutation.mystery_amount = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMysteryAmount)
        ));

        let mut config = EvolutionConfig::default();
        config.mutation.mystery_amount = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMysteryAmount)
        ));

        let mut config = EvolutionConfig::default();
        config.mutation.treats.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoTreats)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EvolutionConfig =
            serde_json::from_str(r#"{"generations": 12, "mutation": {"mystery_rate": 0.5}}"#)
                .unwrap();
        assert_eq!(config.generations, 12);
        assert_eq!(config.mutation.mystery_rate, 0.5);
        assert_eq!(config.mutation.substitution_rate, 0.25);
        assert_eq!(config.scoring.flour_alias, "wheat");
        assert!(config.data.affinity_embeddings.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = EvolutionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.generations, config.generations);
        assert_eq!(parsed.data.inspiring_set, config.data.inspiring_set);
    }
}
