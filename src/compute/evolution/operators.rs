//! Genetic operators for recipes.
//!
//! Provides substitution mutation, mystery-ingredient insertion and
//! crossover. Operators never touch the parents they are given: every change
//! to a parent is returned as a [`ParentMutation`] for the caller to apply.

use std::collections::BTreeSet;

use rand::prelude::*;

use crate::compute::Pantry;
use crate::schema::{Amount, CategoryId, IngredientId, MutationConfig, Recipe};

/// A single change to a parent recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    /// Replace the identity of one slot, keeping its amount.
    Substitute {
        category: CategoryId,
        slot: usize,
        ingredient: IngredientId,
    },
    /// Add an ingredient (the mystery ingredient).
    Insert {
        category: CategoryId,
        ingredient: IngredientId,
        amount: Amount,
    },
}

impl Edit {
    fn apply(&self, recipe: &mut Recipe) {
        match *self {
            Edit::Substitute {
                category,
                slot,
                ingredient,
            } => {
                if !recipe.substitute_slot(category, slot, ingredient) {
                    log::debug!("Skipped substitution into slot {slot} of category {category:?}");
                }
            }
            Edit::Insert {
                category,
                ingredient,
                amount,
            } => {
                recipe.add_ingredient(category, ingredient, amount);
            }
        }
    }
}

/// Edits a crossover made to each of its two parents, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentMutation {
    pub first: Vec<Edit>,
    pub second: Vec<Edit>,
}

impl ParentMutation {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    /// Replay the edits on the parents the crossover was computed from.
    pub fn apply(&self, first: &mut Recipe, second: &mut Recipe) {
        for edit in &self.first {
            edit.apply(first);
        }
        for edit in &self.second {
            edit.apply(second);
        }
    }
}

/// Result of crossing two parents.
#[derive(Debug, Clone)]
pub struct Crossover {
    pub offspring: Recipe,
    pub mutation: ParentMutation,
}

/// Random number generator wrapper for recipe operators.
pub struct RecipeRng {
    rng: StdRng,
}

impl RecipeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// With probability `rate`, swap an ingredient for a uniformly chosen
    /// knowledge-base substitute. Ingredients without substitutes come back
    /// unchanged.
    pub fn substitute(
        &mut self,
        ingredient: IngredientId,
        pantry: &Pantry,
        rate: f64,
    ) -> IngredientId {
        if !self.rng.gen_bool(rate) {
            return ingredient;
        }
        pantry
            .substitutes(ingredient)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(ingredient)
    }

    /// Maybe pick a mystery ingredient for a recipe.
    ///
    /// Fires with probability `mystery_rate`. The pick is a treat with
    /// probability `treat_rate`, otherwise a novel suggestion from the
    /// embedding oracle; when the oracle has nothing to offer a treat is used.
    pub fn mystery_ingredient(
        &mut self,
        recipe: &Recipe,
        pantry: &Pantry,
        config: &MutationConfig,
    ) -> Option<IngredientId> {
        if !self.rng.gen_bool(config.mystery_rate) {
            return None;
        }
        if !self.rng.gen_bool(config.treat_rate) {
            let names = pantry.names(recipe);
            match pantry
                .ensemble_table()
                .suggest(&names, config.suggestion_pool, &mut self.rng)
            {
                Ok(name) => {
                    if let Some(id) = pantry.lexicon().ingredient(name) {
                        return Some(id);
                    }
                }
                Err(err) => log::debug!("No novel ingredient suggested: {err}"),
            }
        }
        pantry.treats().choose(&mut self.rng).copied()
    }

    /// Cross two parents into one offspring.
    ///
    /// For every category present in either parent, `ceil(total / 2)` slots
    /// are drawn with replacement from the concatenation of both parents'
    /// slots. A drawn slot may be substituted; the offspring always receives
    /// the substitute with the slot's amount, and the parent slot is rewritten
    /// too unless that would duplicate a name, so later draws see the mutated
    /// identity. Finally a mystery
    /// ingredient may be added to the first parent's `misc` category.
    pub fn combine(
        &mut self,
        first: &Recipe,
        second: &Recipe,
        pantry: &Pantry,
        config: &MutationConfig,
    ) -> Crossover {
        let mut a = first.clone();
        let mut b = second.clone();
        let mut offspring = Recipe::new();
        let mut mutation = ParentMutation::default();

        let categories: BTreeSet<CategoryId> = a.categories().chain(b.categories()).collect();
        for category in categories {
            let n_a = a.entries(category).len();
            let total = n_a + b.entries(category).len();
            if total == 0 {
                continue;
            }

            for _ in 0..total.div_ceil(2) {
                let index = self.rng.gen_range(0..total);
                let (parent, edits, slot) = if index < n_a {
                    (&mut a, &mut mutation.first, index)
                } else {
                    (&mut b, &mut mutation.second, index - n_a)
                };

                let current = parent.entries(category)[slot];
                let ingredient =
                    self.substitute(current.ingredient, pantry, config.substitution_rate);
                if ingredient != current.ingredient {
                    log::debug!(
                        "Substituted {} with {}",
                        pantry.name(current.ingredient),
                        pantry.name(ingredient)
                    );
                    // The parent keeps its slot when the substitute already
                    // names another slot of the category.
                    if parent.substitute_slot(category, slot, ingredient) {
                        edits.push(Edit::Substitute {
                            category,
                            slot,
                            ingredient,
                        });
                    }
                }

                offspring.add_ingredient(category, ingredient, current.amount);
            }
        }

        if let Some(ingredient) = self.mystery_ingredient(&a, pantry, config) {
            log::debug!("Mystery ingredient: {}", pantry.name(ingredient));
            let edit = Edit::Insert {
                category: CategoryId::MISC,
                ingredient,
                amount: Amount::ounces(config.mystery_amount),
            };
            edit.apply(&mut a);
            mutation.first.push(edit);
        }

        Crossover {
            offspring,
            mutation,
        }
    }
}
