//! Schema module - Recipe data model, knowledge tables and configuration.

mod config;
mod evolution;
mod inspiring;
mod io;
mod knowledge;
mod lexicon;
mod recipe;

pub use config::*;
pub use evolution::*;
pub use inspiring::*;
pub use io::*;
pub use knowledge::*;
pub use lexicon::*;
pub use recipe::*;
