//! Substitution knowledge base: name translation and substitute lists.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::io::{LoadError, read_json};
use super::lexicon::{normalize_name, resolve_phrase, singular_phrase};

/// Category and substitutes of one canonical ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionEntry {
    pub category: String,
    #[serde(default)]
    pub subs: Vec<String>,
}

/// Read-only lookup tables for canonical names, categories and substitutes.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    translations: HashMap<String, String>,
    entries: HashMap<String, SubstitutionEntry>,
}

impl KnowledgeBase {
    /// Build from in-memory tables. Keys are normalized.
    pub fn from_tables(
        translations: HashMap<String, String>,
        entries: HashMap<String, SubstitutionEntry>,
    ) -> Self {
        Self {
            translations: translations
                .into_iter()
                .map(|(k, v)| (normalize_name(&k), normalize_name(&v)))
                .collect(),
            entries: entries
                .into_iter()
                .map(|(k, mut v)| {
                    v.category = normalize_name(&v.category);
                    v.subs = v.subs.iter().map(|s| normalize_name(s)).collect();
                    (normalize_name(&k), v)
                })
                .collect(),
        }
    }

    /// Load the translation table (`{name: canonical}`) and the substitution
    /// table (`{canonical: {category, subs}}`).
    pub fn load<P: AsRef<Path>>(translations: P, substitutions: P) -> Result<Self, LoadError> {
        let translations: HashMap<String, String> = read_json(translations)?;
        let entries: HashMap<String, SubstitutionEntry> = read_json(substitutions)?;
        Ok(Self::from_tables(translations, entries))
    }

    /// Canonical name for an exact ingredient name.
    pub fn translate(&self, name: &str) -> Option<&str> {
        self.translations
            .get(&normalize_name(name))
            .map(String::as_str)
    }

    /// Canonical name, retrying with the singular form of the name.
    pub fn translate_folding_plural(&self, name: &str) -> Option<&str> {
        self.translate(name)
            .or_else(|| self.translate(&singular_phrase(name)))
    }

    /// Entry for a canonical name.
    pub fn entry(&self, canonical: &str) -> Option<&SubstitutionEntry> {
        self.entries.get(canonical)
    }

    /// Entry reached by translating `name` exactly.
    pub fn entry_for(&self, name: &str) -> Option<&SubstitutionEntry> {
        self.translate(name).and_then(|c| self.entry(c))
    }

    /// Substitutes for the canonical form of `name`; empty when unknown.
    pub fn substitutes(&self, name: &str) -> &[String] {
        self.entry_for(name).map(|e| e.subs.as_slice()).unwrap_or(&[])
    }

    /// Longest word combination of `name` that has a substitution entry.
    pub fn resolve_phrase(&self, name: &str) -> Option<String> {
        resolve_phrase(name, |candidate| self.entries.contains_key(candidate))
    }

    /// Every name mentioned by the tables: translation keys, canonical names
    /// and substitutes.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.translations
            .iter()
            .flat_map(|(k, v)| [k.as_str(), v.as_str()])
            .chain(self.entries.iter().flat_map(|(k, e)| {
                std::iter::once(k.as_str()).chain(e.subs.iter().map(String::as_str))
            }))
    }

    /// Every category mentioned by the substitution table.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.category.as_str())
    }
}
