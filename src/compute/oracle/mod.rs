//! Scoring oracles: pure lookups over read-only ingredient tables.
//!
//! - **Co-occurrence** (`cooccurrence`): Markov transition probabilities
//!   between sorted-adjacent ingredients.
//! - **Embeddings** (`embedding`): pairwise flavor affinity, the ensemble
//!   compatibility score and novel-ingredient suggestions.

mod cooccurrence;
mod embedding;

pub use cooccurrence::CooccurrenceModel;
pub use embedding::EmbeddingTable;

/// Failure of a scoring collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("No ingredient of the query resolves to an embedding")]
    NothingResolved,
    #[error("No suggestion left after excluding the query ingredients")]
    NoSuggestion,
}
