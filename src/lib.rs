//! Cookie Forge - evolutionary cookie recipe generation.
//!
//! This crate evolves a population of structured cookie recipes through
//! exhaustive pairwise crossover, substitution and mystery-ingredient
//! mutation, three-objective fitness evaluation and rank-sum selection.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Recipe data model, lexicon, knowledge base and configuration
//! - `compute`: Scoring oracles, the pantry and the evolutionary search
//! - `render`: Markdown recipe cards
//!
//! # Example
//!
//! ```rust
//! use cookie_forge::schema::{Amount, CategoryId, Lexicon, Recipe};
//!
//! let mut lexicon = Lexicon::new();
//! let butter = lexicon.intern_ingredient("butter");
//! let margarine = lexicon.intern_ingredient("margarine");
//!
//! let mut recipe = Recipe::new();
//! recipe.add_ingredient(CategoryId::FATS_OILS, butter, Amount::ounces(8.0));
//!
//! // Substitution changes what an ingredient is, not how much is used.
//! assert!(recipe.substitute_slot(CategoryId::FATS_OILS, 0, margarine));
//! assert_eq!(
//!     recipe.amount_of(CategoryId::FATS_OILS, margarine),
//!     Some(Amount::ounces(8.0))
//! );
//! ```

pub mod compute;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::EvolutionEngine;
pub use compute::{Pantry, PantryBuilder};
pub use schema::{EvolutionConfig, Recipe};
