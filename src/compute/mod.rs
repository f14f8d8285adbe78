//! Compute module - scoring oracles, the pantry and evolutionary search.

pub mod evolution;
pub mod oracle;
mod pantry;

#[cfg(test)]
pub(crate) mod fixtures;

pub use pantry::*;
