//! Ingredient embedding table.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::schema::{LoadError, normalize_name, read_json, resolve_phrase};

use super::OracleError;

/// Fixed-length vectors keyed by ingredient name.
///
/// Keys are normalized and stored in sorted order so lookups, recommendations
/// and tie-breaks do not depend on file order.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

impl EmbeddingTable {
    /// Build from `(name, vector)` pairs. All vectors must share one length;
    /// duplicate names after normalization keep the first in sorted order.
    pub fn from_entries<I>(entries: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut entries: Vec<(String, Vec<f32>)> = entries
            .into_iter()
            .map(|(k, v)| (normalize_name(&k), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let dimension = entries.first().map_or(0, |(_, v)| v.len());
        let mut table = Self {
            dimension,
            ..Self::default()
        };

        for (key, vector) in entries {
            if vector.len() != dimension {
                return Err(LoadError::DimensionMismatch {
                    key,
                    expected: dimension,
                    found: vector.len(),
                });
            }
            if table.index.contains_key(&key) {
                continue;
            }
            table.index.insert(key.clone(), table.keys.len());
            table.keys.push(key);
            table.vectors.push(vector);
        }

        Ok(table)
    }

    /// Load a `{name: [f32, ...]}` JSON table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let raw: HashMap<String, Vec<f32>> = read_json(path)?;
        Self::from_entries(raw)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn vector(&self, name: &str) -> Option<&[f32]> {
        self.index.get(name).map(|&i| self.vectors[i].as_slice())
    }

    /// Dot-product similarity of two keys.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        Some(dot(self.vector(a)?, self.vector(b)?))
    }

    /// Longest word combination of `name` that is a key.
    pub fn resolve_phrase(&self, name: &str) -> Option<String> {
        resolve_phrase(name, |candidate| self.contains(candidate))
    }

    /// Keys ranked by similarity to the mean vector of `words`, best first.
    ///
    /// Words that are not keys are ignored; an empty query yields nothing.
    pub fn recommend<S: AsRef<str>>(&self, words: &[S]) -> Vec<(&str, f64)> {
        let vectors: Vec<&[f32]> = words
            .iter()
            .filter_map(|w| self.vector(w.as_ref()))
            .collect();
        if vectors.is_empty() {
            return Vec::new();
        }

        let mut target = vec![0.0f64; self.dimension];
        for vector in &vectors {
            for (t, &v) in target.iter_mut().zip(vector.iter()) {
                *t += v as f64;
            }
        }
        let scale = 1.0 / vectors.len() as f64;
        for t in &mut target {
            *t *= scale;
        }

        let mut matches: Vec<(&str, f64)> = self
            .keys
            .iter()
            .zip(&self.vectors)
            .map(|(key, vector)| {
                let sim: f64 = target
                    .iter()
                    .zip(vector.iter())
                    .map(|(&t, &v)| t * v as f64)
                    .sum();
                (key.as_str(), sim)
            })
            .collect();
        matches.sort_by(|a, b| b.1.total_cmp(&a.1));
        matches
    }

    /// Ensemble compatibility of an ingredient list.
    ///
    /// Every name is resolved to a key. For each resolved word, its score is
    /// the product of its similarity with every other resolved word; the
    /// result is the mean of those scores.
    pub fn ensemble_score<S: AsRef<str>>(&self, names: &[S]) -> Result<f64, OracleError> {
        let resolved: Vec<&[f32]> = names
            .iter()
            .filter_map(|name| self.resolve_phrase(name.as_ref()))
            .filter_map(|key| self.vector(&key))
            .collect();
        if resolved.is_empty() {
            return Err(OracleError::NothingResolved);
        }

        let total: f64 = resolved
            .iter()
            .enumerate()
            .map(|(i, word)| {
                resolved
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, other)| dot(word, other))
                    .product::<f64>()
            })
            .sum();
        Ok(total / resolved.len() as f64)
    }

    /// Suggest a novel ingredient for a list: a uniform pick among the `pool`
    /// best recommendations that are not already in the list.
    pub fn suggest<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        names: &[S],
        pool: usize,
        rng: &mut R,
    ) -> Result<&str, OracleError> {
        let query: Vec<String> = names
            .iter()
            .filter_map(|name| self.resolve_phrase(name.as_ref()))
            .collect();
        if query.is_empty() {
            return Err(OracleError::NothingResolved);
        }

        let candidates: Vec<&str> = self
            .recommend(&query)
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !query.iter().any(|q| q == key))
            .take(pool)
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(OracleError::NoSuggestion)
    }

    /// Mean pairwise similarity of an ingredient list.
    ///
    /// A name that is a key maps to itself; otherwise any name mentioning
    /// flour maps to `flour_alias`, and failing that each of its words that
    /// is a key is used. Returns `default` when fewer than two keys result.
    pub fn pair_affinity<S: AsRef<str>>(
        &self,
        names: &[S],
        flour_alias: &str,
        default: f64,
    ) -> f64 {
        let mut keys: Vec<&[f32]> = Vec::new();
        for name in names {
            let name = normalize_name(name.as_ref());
            if let Some(vector) = self.vector(&name) {
                keys.push(vector);
            } else if name.contains("flour") {
                if let Some(vector) = self.vector(flour_alias) {
                    keys.push(vector);
                }
            } else {
                keys.extend(name.split(' ').filter_map(|word| self.vector(word)));
            }
        }

        let mut total = 0.0;
        let mut count = 0usize;
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                total += dot(keys[i], keys[j]);
                count += 1;
            }
        }

        if count > 0 {
            total / count as f64
        } else {
            default
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x as f64 * y as f64).sum()
}
