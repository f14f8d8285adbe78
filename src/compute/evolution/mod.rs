//! Evolutionary search over cookie recipes.
//!
//! # Overview
//!
//! - **Operators** (`operators`): substitution, mystery-ingredient insertion
//!   and crossover, returning explicit parent edits
//! - **Fitness** (`fitness`): the three-objective score, or disqualification
//! - **Ranking** (`ranking`): rank-sum aggregation over a whole cohort
//! - **Search** (`search`): the generational loop
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cookie_forge::compute::evolution::EvolutionEngine;
//! use cookie_forge::compute::oracle::{CooccurrenceModel, EmbeddingTable};
//! use cookie_forge::compute::PantryBuilder;
//! use cookie_forge::schema::{EvolutionConfig, KnowledgeBase, load_inspiring_set};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EvolutionConfig::default();
//! let data = &config.data;
//!
//! let knowledge = KnowledgeBase::load(&data.translations, &data.substitutions)?;
//! let mut builder = PantryBuilder::new(
//!     knowledge,
//!     CooccurrenceModel::load(&data.cooccurrence)?,
//!     EmbeddingTable::load(&data.embeddings)?,
//! );
//! let recipes = load_inspiring_set(&data.inspiring_set)?
//!     .iter()
//!     .map(|raw| builder.ingest(raw))
//!     .collect();
//! let pantry = Arc::new(builder.finish(&config.mutation, &config.scoring));
//!
//! let mut engine = EvolutionEngine::new(config, pantry, recipes)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}/{}", progress.generation, progress.total_generations);
//! });
//! println!("Best rank sum: {}", result.best.rank_sum);
//! # Ok(())
//! # }
//! ```

mod fitness;
mod operators;
mod ranking;
mod search;

pub use fitness::FitnessEvaluator;
pub use operators::{Crossover, Edit, ParentMutation, RecipeRng};
pub use ranking::{Objective, rank, rank_order, rank_sums};
pub use search::{EvolutionEngine, MIN_POPULATION};
