//! The pantry: every read-only table a run consults, frozen after ingestion.

use std::collections::HashSet;

use crate::schema::{
    Amount, CategoryId, IngredientId, KnowledgeBase, Lexicon, MutationConfig, RawIngredient,
    Recipe, ScoringConfig, normalize_name,
};

use super::oracle::{CooccurrenceModel, EmbeddingTable};

/// Shared, immutable scoring and mutation context.
///
/// Built once by a [`PantryBuilder`] and handed to evaluators behind an
/// `Arc`. Its lexicon is closed: every ingredient a mutation can produce was
/// interned before freezing.
#[derive(Debug)]
pub struct Pantry {
    lexicon: Lexicon,
    knowledge: KnowledgeBase,
    cooccurrence: CooccurrenceModel,
    ensemble: EmbeddingTable,
    affinity: Option<EmbeddingTable>,
    substitutes: Vec<Vec<IngredientId>>,
    disqualified: Vec<bool>,
    treats: Vec<IngredientId>,
}

impl Pantry {
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn cooccurrence(&self) -> &CooccurrenceModel {
        &self.cooccurrence
    }

    /// Table used for ensemble scoring and mystery suggestions.
    pub fn ensemble_table(&self) -> &EmbeddingTable {
        &self.ensemble
    }

    /// Table used for pairwise affinity.
    pub fn affinity_table(&self) -> &EmbeddingTable {
        self.affinity.as_ref().unwrap_or(&self.ensemble)
    }

    pub fn name(&self, id: IngredientId) -> &str {
        self.lexicon.ingredient_name(id)
    }

    /// Names of every ingredient in a recipe, category by category.
    pub fn names<'a>(&'a self, recipe: &'a Recipe) -> Vec<&'a str> {
        recipe.ingredients().map(|id| self.name(id)).collect()
    }

    /// Knowledge-base substitutes of an ingredient.
    pub fn substitutes(&self, id: IngredientId) -> &[IngredientId] {
        self.substitutes
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if the ingredient is blocked or belongs to a banned category.
    pub fn is_disqualified(&self, id: IngredientId) -> bool {
        self.disqualified.get(id.index()).copied().unwrap_or(false)
    }

    /// Specialty treats available to the mystery-ingredient operator.
    pub fn treats(&self) -> &[IngredientId] {
        &self.treats
    }
}

/// Collects tables and ingests recipes before freezing them into a [`Pantry`].
pub struct PantryBuilder {
    lexicon: Lexicon,
    knowledge: KnowledgeBase,
    cooccurrence: CooccurrenceModel,
    ensemble: EmbeddingTable,
    affinity: Option<EmbeddingTable>,
}

impl PantryBuilder {
    /// Start from the knowledge base, co-occurrence model and ensemble table.
    pub fn new(
        knowledge: KnowledgeBase,
        cooccurrence: CooccurrenceModel,
        ensemble: EmbeddingTable,
    ) -> Self {
        Self {
            lexicon: Lexicon::new(),
            knowledge,
            cooccurrence,
            ensemble,
            affinity: None,
        }
    }

    /// Use a separate embedding table for pairwise affinity.
    pub fn with_affinity_table(mut self, table: EmbeddingTable) -> Self {
        self.affinity = Some(table);
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Intern an ingredient name directly.
    pub fn ingredient(&mut self, name: &str) -> IngredientId {
        self.lexicon.intern_ingredient(name)
    }

    /// Intern a category name directly.
    pub fn category(&mut self, name: &str) -> CategoryId {
        self.lexicon.intern_category(name)
    }

    /// Convert a raw ingredient list into a recipe.
    ///
    /// Each name is matched against the knowledge base; a match is stored
    /// under the matched phrase in its knowledge-base category, anything else
    /// keeps its normalized name under `misc`.
    pub fn ingest(&mut self, raw: &[RawIngredient]) -> Recipe {
        let mut recipe = Recipe::new();

        for RawIngredient(name, amount) in raw {
            let (category, ingredient) = match self.knowledge.resolve_phrase(name) {
                Some(phrase) => {
                    let canonical = self.knowledge.translate(&phrase).unwrap_or(phrase.as_str());
                    let category = self
                        .knowledge
                        .entry(canonical)
                        .or_else(|| self.knowledge.entry(&phrase))
                        .map(|e| e.category.clone());
                    let category = match category {
                        Some(c) => self.lexicon.intern_category(&c),
                        None => CategoryId::MISC,
                    };
                    (category, self.lexicon.intern_ingredient(&phrase))
                }
                None => {
                    log::debug!("No knowledge-base match for {name:?}, filing under misc");
                    (CategoryId::MISC, self.lexicon.intern_ingredient(name))
                }
            };
            recipe.add_ingredient(category, ingredient, Amount::ounces(*amount));
        }

        recipe
    }

    /// Intern every name mutations can produce and freeze the tables.
    pub fn finish(mut self, mutation: &MutationConfig, scoring: &ScoringConfig) -> Pantry {
        // Sorted so handles do not depend on hash map iteration order.
        let mut known: Vec<String> = self
            .knowledge
            .names()
            .chain(self.ensemble.keys())
            .chain(self.affinity.iter().flat_map(|t| t.keys()))
            .map(str::to_string)
            .collect();
        known.sort_unstable();
        known.dedup();
        for name in &known {
            self.lexicon.intern_ingredient(name);
        }
        let mut categories: Vec<String> =
            self.knowledge.categories().map(str::to_string).collect();
        categories.sort_unstable();
        categories.dedup();
        for category in &categories {
            self.lexicon.intern_category(category);
        }
        let treats: Vec<IngredientId> = mutation
            .treats
            .iter()
            .map(|t| self.lexicon.intern_ingredient(t))
            .collect();

        let blocked: HashSet<String> = scoring
            .blocked_ingredients
            .iter()
            .map(|s| normalize_name(s))
            .collect();
        let banned: HashSet<String> = scoring
            .banned_categories
            .iter()
            .map(|s| normalize_name(s))
            .collect();

        let mut substitutes = Vec::with_capacity(self.lexicon.ingredient_count());
        let mut disqualified = Vec::with_capacity(self.lexicon.ingredient_count());
        for (_, name) in self.lexicon.ingredients() {
            substitutes.push(
                self.knowledge
                    .substitutes(name)
                    .iter()
                    .filter_map(|s| self.lexicon.ingredient(s))
                    .collect(),
            );

            let banned_here = self
                .knowledge
                .translate_folding_plural(name)
                .is_some_and(|canonical| {
                    blocked.contains(canonical)
                        || self
                            .knowledge
                            .entry(canonical)
                            .is_some_and(|e| banned.contains(&e.category))
                });
            disqualified.push(banned_here);
        }

        log::info!(
            "Pantry ready: {} ingredients, {} categories, {} disqualified",
            self.lexicon.ingredient_count(),
            self.lexicon.category_count(),
            disqualified.iter().filter(|&&d| d).count()
        );

        Pantry {
            lexicon: self.lexicon,
            knowledge: self.knowledge,
            cooccurrence: self.cooccurrence,
            ensemble: self.ensemble,
            affinity: self.affinity,
            substitutes,
            disqualified,
            treats,
        }
    }
}
