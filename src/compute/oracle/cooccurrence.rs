//! Ingredient co-occurrence model.

use std::collections::HashMap;
use std::path::Path;

use crate::schema::{KnowledgeBase, LoadError, normalize_name, read_json, resolve_phrase};

/// Recipes shorter than this are ignored when learning transitions.
const MIN_CORPUS_RECIPE_LEN: usize = 3;

/// Transition probabilities between canonical ingredient names.
///
/// Learned from recipe ingredient lists sorted alphabetically: each row holds
/// how often an ingredient is directly followed by another.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceModel {
    transitions: HashMap<String, HashMap<String, f64>>,
}

impl CooccurrenceModel {
    /// Build from an in-memory `{from: {to: probability}}` table.
    pub fn from_transitions(transitions: HashMap<String, HashMap<String, f64>>) -> Self {
        Self {
            transitions: transitions
                .into_iter()
                .map(|(from, row)| {
                    let row = row
                        .into_iter()
                        .map(|(to, p)| (normalize_name(&to), p))
                        .collect();
                    (normalize_name(&from), row)
                })
                .collect(),
        }
    }

    /// Load a `{from: {to: probability}}` JSON table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        read_json(path).map(Self::from_transitions)
    }

    /// Learn transitions from ingredient lists.
    ///
    /// Each list is sorted, names are translated to canonical form where the
    /// knowledge base knows them, and every row is normalized to sum to one.
    pub fn from_corpus<S: AsRef<str>>(recipes: &[Vec<S>], knowledge: &KnowledgeBase) -> Self {
        let mut counts: HashMap<String, HashMap<String, f64>> = HashMap::new();

        for recipe in recipes {
            if recipe.len() < MIN_CORPUS_RECIPE_LEN {
                continue;
            }
            let mut names: Vec<String> =
                recipe.iter().map(|s| normalize_name(s.as_ref())).collect();
            names.sort_unstable();

            for pair in names.windows(2) {
                let from = knowledge.translate(&pair[0]).unwrap_or(pair[0].as_str());
                let to = knowledge.translate(&pair[1]).unwrap_or(pair[1].as_str());
                *counts
                    .entry(from.to_string())
                    .or_default()
                    .entry(to.to_string())
                    .or_default() += 1.0;
            }
        }

        for row in counts.values_mut() {
            let total: f64 = row.values().sum();
            for count in row.values_mut() {
                *count /= total;
            }
        }

        log::debug!("Learned co-occurrence rows for {} ingredients", counts.len());
        Self {
            transitions: counts,
        }
    }

    /// Number of ingredients with outgoing transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Transition probability from `from` to `to`, if recorded.
    pub fn probability(&self, from: &str, to: &str) -> Option<f64> {
        self.transitions.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Map a name onto the longest word combination that has a row, or the
    /// normalized name itself.
    pub fn resolve(&self, name: &str) -> String {
        resolve_phrase(name, |candidate| self.transitions.contains_key(candidate))
            .unwrap_or_else(|| normalize_name(name))
    }

    /// Probability of a whole ingredient list.
    ///
    /// Names are sorted; for every sorted-adjacent pair, each side is expanded
    /// to itself plus its knowledge-base substitutes, every cross combination
    /// is looked up in both orders (`default` when absent), and the pair
    /// contributes its maximum. The result is the product over all pairs, so
    /// a list with fewer than two names scores 1.
    pub fn get_probability<S: AsRef<str>>(
        &self,
        names: &[S],
        knowledge: &KnowledgeBase,
        default: f64,
    ) -> f64 {
        let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();

        sorted
            .windows(2)
            .map(|pair| self.pair_maximum(pair[0], pair[1], knowledge, default))
            .product()
    }

    fn pair_maximum(&self, a: &str, b: &str, knowledge: &KnowledgeBase, default: f64) -> f64 {
        let expand = |name: &str| -> Vec<String> {
            knowledge
                .substitutes(name)
                .iter()
                .map(|s| self.resolve(s))
                .chain(std::iter::once(self.resolve(name)))
                .collect()
        };
        let left = expand(a);
        let right = expand(b);

        let mut best = f64::NEG_INFINITY;
        for x in &left {
            for y in &right {
                best = best
                    .max(self.probability(x, y).unwrap_or(default))
                    .max(self.probability(y, x).unwrap_or(default));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SubstitutionEntry;

    fn model() -> CooccurrenceModel {
        CooccurrenceModel::from_transitions(HashMap::from([
            (
                "butter".to_string(),
                HashMap::from([("sugar".to_string(), 0.4), ("egg".to_string(), 0.6)]),
            ),
            (
                "flour".to_string(),
                HashMap::from([("sugar".to_string(), 0.5)]),
            ),
            (
                "honey".to_string(),
                HashMap::from([("flour".to_string(), 0.9)]),
            ),
        ]))
    }

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::from_tables(
            HashMap::from([("sugar".to_string(), "sugar".to_string())]),
            HashMap::from([(
                "sugar".to_string(),
                SubstitutionEntry {
                    category: "sweeten".to_string(),
                    subs: vec!["honey".to_string()],
                },
            )]),
        )
    }

    #[test]
    fn test_probability_is_deterministic_and_bounded() {
        let model = model();
        let kb = KnowledgeBase::default();

        let p1 = model.get_probability(&["sugar", "flour"], &kb, 0.01);
        let p2 = model.get_probability(&["flour", "sugar"], &kb, 0.01);
        assert_eq!(p1, p2);
        assert!(p1 > 0.0 && p1 <= 1.0);
        assert!((p1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_substitutes_raise_pair_maximum() {
        let model = model();
        let kb = knowledge();

        // sugar -> honey, and honey -> flour is well attested.
        let p = model.get_probability(&["sugar", "flour"], &kb, 0.01);
        assert!((p - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_pairs_use_default() {
        let model = model();
        let kb = KnowledgeBase::default();

        let p = model.get_probability(&["water", "salt", "ice"], &kb, 0.01);
        assert!((p - 0.0001).abs() < 1e-12);
        assert_eq!(model.get_probability::<&str>(&[], &kb, 0.01), 1.0);
        assert_eq!(model.get_probability(&["butter"], &kb, 0.01), 1.0);
    }

    #[test]
    fn test_resolve_uses_phrase_matching() {
        let model = model();
        assert_eq!(model.resolve("Unsalted Butter"), "butter");
        assert_eq!(model.resolve("Baking Soda"), "baking soda");
    }

    #[test]
    fn test_from_corpus_normalizes_rows() {
        let kb = KnowledgeBase::default();
        let corpus = vec![
            vec!["butter", "egg", "flour"],
            vec!["butter", "egg", "sugar"],
            vec!["butter", "flour", "sugar"],
            vec!["egg", "milk"],
        ];
        let model = CooccurrenceModel::from_corpus(&corpus, &kb);

        let p_egg = model.probability("butter", "egg").unwrap();
        let p_flour = model.probability("butter", "flour").unwrap();
        assert!((p_egg - 2.0 / 3.0).abs() < 1e-12);
        assert!((p_flour - 1.0 / 3.0).abs() < 1e-12);
        // Two-ingredient recipes are skipped.
        assert!(model.probability("egg", "milk").is_none());
    }
}
