//! Fitness evaluation: the three-objective score of a recipe.

use std::sync::Arc;

use crate::compute::Pantry;
use crate::compute::oracle::OracleError;
use crate::schema::{Fitness, FitnessTriple, Recipe, ScoringConfig};

/// Evaluates a recipe against the pantry's scoring oracles.
pub struct FitnessEvaluator {
    pantry: Arc<Pantry>,
    config: ScoringConfig,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(pantry: Arc<Pantry>, config: ScoringConfig) -> Self {
        Self { pantry, config }
    }

    /// Evaluate a recipe.
    ///
    /// A recipe holding any disqualified ingredient is not scored at all. An
    /// oracle failure is logged and also yields [`Fitness::Disqualified`].
    pub fn evaluate(&self, recipe: &Recipe) -> Fitness {
        if let Some(id) = recipe
            .ingredients()
            .find(|&id| self.pantry.is_disqualified(id))
        {
            log::debug!("Disqualified by {}", self.pantry.name(id));
            return Fitness::Disqualified;
        }

        match self.score(recipe) {
            Ok(triple) => Fitness::Scored(triple),
            Err(err) => {
                log::warn!("Scoring failed, disqualifying recipe: {err}");
                Fitness::Disqualified
            }
        }
    }

    /// Compute all three objectives.
    pub fn score(&self, recipe: &Recipe) -> Result<FitnessTriple, OracleError> {
        let names = self.pantry.names(recipe);

        let compatibility = self.pantry.cooccurrence().get_probability(
            &names,
            self.pantry.knowledge(),
            self.config.default_pair_probability,
        );
        let affinity = self.pantry.affinity_table().pair_affinity(
            &names,
            &self.config.flour_alias,
            self.config.default_affinity,
        );
        let ensemble = self.pantry.ensemble_table().ensemble_score(&names)?;

        Ok(FitnessTriple {
            compatibility,
            affinity,
            ensemble,
        })
    }
}
