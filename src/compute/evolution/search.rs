//! The generational loop.

use std::sync::Arc;

use rayon::prelude::*;

use crate::compute::Pantry;
use crate::schema::{
    ConfigError, EvolutionConfig, EvolutionHistory, EvolutionPhase, EvolutionProgress,
    EvolutionResult, EvolutionStats, Fitness, FitnessTriple, GenerationStats, RankedRecipe,
    Recipe,
};

use super::fitness::FitnessEvaluator;
use super::operators::RecipeRng;
use super::ranking::rank;

/// Smallest population for which `C(n, 2) >= n` offspring refill it.
pub const MIN_POPULATION: usize = 3;

/// Every unordered pair of distinct indices below `n`.
fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: RecipeRng,
    pantry: Arc<Pantry>,
    evaluator: FitnessEvaluator,
    population: Vec<RankedRecipe>,
    history: EvolutionHistory,
    generation: usize,
    evaluations: u64,
}

impl EvolutionEngine {
    /// Create an engine over an ingested inspiring set.
    ///
    /// The inspiring set is evaluated and ranked immediately; it becomes the
    /// population of generation 0.
    pub fn new(
        config: EvolutionConfig,
        pantry: Arc<Pantry>,
        inspiring: Vec<Recipe>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if inspiring.len() < MIN_POPULATION {
            return Err(ConfigError::PopulationTooSmall(inspiring.len()));
        }

        let seed = config.random_seed.unwrap_or_else(rand::random);
        log::debug!("Evolution seed: {seed}");
        let rng = RecipeRng::new(seed);
        let evaluator = FitnessEvaluator::new(Arc::clone(&pantry), config.scoring.clone());

        let mut engine = Self {
            config,
            rng,
            pantry,
            evaluator,
            population: Vec::new(),
            history: EvolutionHistory::default(),
            generation: 0,
            evaluations: 0,
        };
        engine.population = rank(engine.evaluate(inspiring));
        log::info!(
            "Initial population of {} recipes ranked",
            engine.population.len()
        );
        Ok(engine)
    }

    /// Current population, fittest first.
    pub fn population(&self) -> &[RankedRecipe] {
        &self.population
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Evaluate all recipes in parallel.
    fn evaluate(&mut self, recipes: Vec<Recipe>) -> Vec<RankedRecipe> {
        let evaluator = &self.evaluator;

        let mut cohort: Vec<RankedRecipe> = recipes
            .into_iter()
            .map(|recipe| RankedRecipe {
                recipe,
                fitness: Fitness::Disqualified,
                rank_sum: 0,
            })
            .collect();
        cohort.par_iter_mut().for_each(|candidate| {
            candidate.fitness = evaluator.evaluate(&candidate.recipe);
        });

        self.evaluations += cohort.len() as u64;
        cohort
    }

    /// Cross every pair of the current population.
    ///
    /// Pairs are processed in order and each crossover's parent edits are
    /// applied before the next pair is read.
    fn breed(&mut self) -> Vec<Recipe> {
        let n = self.population.len();
        let mut offspring = Vec::with_capacity(n * (n - 1) / 2);

        for (i, j) in pairs(n) {
            let crossover = self.rng.combine(
                &self.population[i].recipe,
                &self.population[j].recipe,
                &self.pantry,
                &self.config.mutation,
            );
            let (left, right) = self.population.split_at_mut(j);
            crossover
                .mutation
                .apply(&mut left[i].recipe, &mut right[0].recipe);
            offspring.push(crossover.offspring);
        }

        offspring
    }

    /// Run a single generation step: breed, evaluate, rank and truncate.
    pub fn step_generation(&mut self) -> GenerationStats {
        let size = self.population.len();

        let offspring = self.breed();
        let cohort = self.evaluate(offspring);
        let produced = cohort.len();
        let disqualified = cohort
            .iter()
            .filter(|c| c.fitness.is_disqualified())
            .count();

        let mut ranked = rank(cohort);
        ranked.truncate(size);
        self.population = ranked;

        let stats = self.generation_stats(produced, disqualified);
        log::info!(
            "Generation {}: {} offspring, {} disqualified, best rank sum {}",
            stats.generation,
            stats.offspring,
            stats.disqualified,
            stats.best_rank_sum
        );
        self.generation += 1;
        self.history.generations.push(stats.clone());
        stats
    }

    fn generation_stats(&self, offspring: usize, disqualified: usize) -> GenerationStats {
        let best = &self.population[0];

        let scored: Vec<&FitnessTriple> = self
            .population
            .iter()
            .filter_map(|c| c.fitness.triple())
            .collect();
        let mean = (!scored.is_empty()).then(|| {
            let count = scored.len() as f64;
            FitnessTriple {
                compatibility: scored.iter().map(|t| t.compatibility).sum::<f64>() / count,
                affinity: scored.iter().map(|t| t.affinity).sum::<f64>() / count,
                ensemble: scored.iter().map(|t| t.ensemble).sum::<f64>() / count,
            }
        });

        GenerationStats {
            generation: self.generation,
            offspring,
            disqualified,
            best: best.fitness,
            best_rank_sum: best.rank_sum,
            mean,
        }
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        let phase = if self.generation >= self.config.generations {
            EvolutionPhase::Finished
        } else if self.generation == 0 {
            EvolutionPhase::Initializing
        } else {
            EvolutionPhase::Evolving
        };

        EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.generations,
            population_size: self.population.len(),
            evaluations_completed: self.evaluations,
            latest: self.history.generations.last().cloned(),
            phase,
        }
    }

    /// Run evolution with progress callback.
    pub fn run_with_callback<F>(&mut self, callback: F) -> EvolutionResult
    where
        F: Fn(&EvolutionProgress),
    {
        let start_time = std::time::Instant::now();
        callback(&self.progress());

        while self.generation < self.config.generations {
            self.step_generation();
            callback(&self.progress());
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        let evaluations_per_second = if elapsed > 0.0 {
            self.evaluations as f64 / elapsed
        } else {
            0.0
        };

        EvolutionResult {
            best: self.population[0].clone(),
            population: self.population.clone(),
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                elapsed_seconds: elapsed,
                evaluations_per_second,
            },
            history: self.history.clone(),
        }
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }
}
