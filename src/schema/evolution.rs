//! Fitness, progress and result types for recipe evolution.

use serde::{Deserialize, Serialize};

use super::Recipe;

/// The three independent scores of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessTriple {
    /// Product of sorted-adjacent pair co-occurrence maxima. Lower ranks better.
    pub compatibility: f64,
    /// Mean pairwise embedding similarity. Higher ranks better.
    pub affinity: f64,
    /// Ensemble embedding score. Higher ranks better.
    pub ensemble: f64,
}

/// Outcome of evaluating a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Fitness {
    /// Contains a blocked ingredient or banned category, or scoring failed.
    Disqualified,
    /// Scored on all three objectives.
    Scored(FitnessTriple),
}

impl Fitness {
    pub fn is_disqualified(&self) -> bool {
        matches!(self, Fitness::Disqualified)
    }

    pub fn triple(&self) -> Option<&FitnessTriple> {
        match self {
            Fitness::Scored(triple) => Some(triple),
            Fitness::Disqualified => None,
        }
    }

    /// Numeric view with the disqualification sentinel spelled out as
    /// `(+inf, -inf, -inf)`.
    pub fn as_numeric(&self) -> FitnessTriple {
        match self {
            Fitness::Scored(triple) => *triple,
            Fitness::Disqualified => FitnessTriple {
                compatibility: f64::INFINITY,
                affinity: f64::NEG_INFINITY,
                ensemble: f64::NEG_INFINITY,
            },
        }
    }
}

/// A recipe with its evaluation and aggregate rank.
#[derive(Debug, Clone)]
pub struct RankedRecipe {
    pub recipe: Recipe,
    pub fitness: Fitness,
    /// Sum of the three per-objective ranks within its cohort (lower is fitter).
    pub rank_sum: usize,
}

/// Summary of one generation's selected population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    /// Offspring produced (and evaluated) this generation.
    pub offspring: usize,
    /// Offspring that were disqualified.
    pub disqualified: usize,
    /// Fitness of the top-ranked survivor.
    pub best: Fitness,
    /// Rank sum of the top-ranked survivor.
    pub best_rank_sum: usize,
    /// Per-objective means over scored survivors.
    pub mean: Option<FitnessTriple>,
}

/// History of a run, one entry per generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionHistory {
    pub generations: Vec<GenerationStats>,
}

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionPhase {
    /// Inspiring set evaluated, no generation run yet.
    Initializing,
    /// Generations in progress.
    Evolving,
    /// All generations done.
    Finished,
}

/// Snapshot reported to progress callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Generations completed.
    pub generation: usize,
    pub total_generations: usize,
    pub population_size: usize,
    pub evaluations_completed: u64,
    /// Stats of the most recent generation.
    pub latest: Option<GenerationStats>,
    pub phase: EvolutionPhase,
}

/// Run statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    pub generations: usize,
    pub total_evaluations: u64,
    pub elapsed_seconds: f64,
    pub evaluations_per_second: f64,
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Position 0 of the final ranked population.
    pub best: RankedRecipe,
    /// Final population, fittest first.
    pub population: Vec<RankedRecipe>,
    pub stats: EvolutionStats,
    pub history: EvolutionHistory,
}
