//! Recipe data model: amounts, entries and the category mapping.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::{CategoryId, IngredientId};

/// A quantity in ounces.
///
/// A negative amount is the "pinch" sentinel for optional or trace
/// ingredients, not a true negative quantity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// The pinch sentinel.
    pub const PINCH: Self = Self(-1.0);

    pub fn ounces(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True for the pinch sentinel (any negative amount).
    pub fn is_pinch(self) -> bool {
        self.0 < 0.0
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;
    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Mul for Amount {
    type Output = Amount;
    fn mul(self, rhs: Amount) -> Amount {
        Amount(self.0 * rhs.0)
    }
}

impl Mul<f64> for Amount {
    type Output = Amount;
    fn mul(self, rhs: f64) -> Amount {
        Amount(self.0 * rhs)
    }
}

impl Div for Amount {
    type Output = Amount;
    fn div(self, rhs: Amount) -> Amount {
        Amount(self.0 / rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pinch() {
            f.write_str("a pinch")
        } else {
            write!(f, "{} oz", (self.0 * 100.0).round() / 100.0)
        }
    }
}

/// One ingredient slot of a recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub ingredient: IngredientId,
    pub amount: Amount,
}

/// Structural conditions reported by recipe edits.
///
/// These never leave the recipe in an invalid state; callers may log and
/// carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    #[error("Category {0:?} is not present in the recipe")]
    CategoryNotFound(CategoryId),
    #[error("Ingredient {ingredient:?} is not present in category {category:?}")]
    IngredientNotFound {
        category: CategoryId,
        ingredient: IngredientId,
    },
    #[error("Ingredient {ingredient:?} already exists in category {category:?}")]
    DuplicateIngredient {
        category: CategoryId,
        ingredient: IngredientId,
    },
}

/// A recipe: categories mapped to ordered, name-unique ingredient slots.
///
/// Categories are kept in id order so iteration is deterministic; a category
/// is present only while it holds at least one ingredient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    categories: BTreeMap<CategoryId, Vec<Entry>>,
}

impl Recipe {
    /// Create an empty recipe.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of ingredient slots.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Categories present in the recipe, in id order.
    pub fn categories(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories.keys().copied()
    }

    pub fn contains_category(&self, category: CategoryId) -> bool {
        self.categories.contains_key(&category)
    }

    /// Slots of one category (empty when the category is absent).
    pub fn entries(&self, category: CategoryId) -> &[Entry] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All slots with their categories.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &Entry)> {
        self.categories
            .iter()
            .flat_map(|(&category, entries)| entries.iter().map(move |e| (category, e)))
    }

    /// All ingredient handles, category by category.
    pub fn ingredients(&self) -> impl Iterator<Item = IngredientId> + '_ {
        self.iter().map(|(_, e)| e.ingredient)
    }

    /// Amount of an ingredient within a category.
    pub fn amount_of(&self, category: CategoryId, ingredient: IngredientId) -> Option<Amount> {
        self.entries(category)
            .iter()
            .find(|e| e.ingredient == ingredient)
            .map(|e| e.amount)
    }

    /// Insert an ingredient into a category, creating the category on demand.
    ///
    /// If the ingredient is already present in that category its identity is
    /// replaced and the stored amount is kept. Returns `true` when a new slot
    /// was appended.
    pub fn add_ingredient(
        &mut self,
        category: CategoryId,
        ingredient: IngredientId,
        amount: Amount,
    ) -> bool {
        let entries = self.categories.entry(category).or_default();
        if let Some(existing) = entries.iter_mut().find(|e| e.ingredient == ingredient) {
            existing.ingredient = ingredient;
            return false;
        }
        entries.push(Entry { ingredient, amount });
        true
    }

    /// Remove the first slot holding `ingredient` from `category`.
    pub fn remove_ingredient(
        &mut self,
        category: CategoryId,
        ingredient: IngredientId,
    ) -> Result<Entry, RecipeError> {
        let entries = self
            .categories
            .get_mut(&category)
            .ok_or(RecipeError::CategoryNotFound(category))?;
        let pos = entries
            .iter()
            .position(|e| e.ingredient == ingredient)
            .ok_or(RecipeError::IngredientNotFound {
                category,
                ingredient,
            })?;
        let removed = entries.remove(pos);
        if entries.is_empty() {
            self.categories.remove(&category);
        }
        Ok(removed)
    }

    /// Relabel an ingredient in place, keeping its amount.
    ///
    /// Refused when `new` already names another slot of the category.
    pub fn rename_ingredient(
        &mut self,
        category: CategoryId,
        old: IngredientId,
        new: IngredientId,
    ) -> Result<(), RecipeError> {
        let entries = self
            .categories
            .get_mut(&category)
            .ok_or(RecipeError::CategoryNotFound(category))?;
        let pos = entries
            .iter()
            .position(|e| e.ingredient == old)
            .ok_or(RecipeError::IngredientNotFound {
                category,
                ingredient: old,
            })?;
        if old != new && entries.iter().any(|e| e.ingredient == new) {
            return Err(RecipeError::DuplicateIngredient {
                category,
                ingredient: new,
            });
        }
        entries[pos].ingredient = new;
        Ok(())
    }

    /// Change the identity of the slot at `slot`, keeping its amount.
    ///
    /// Returns `false` without changing anything when the slot does not exist
    /// or `ingredient` already names a different slot of the category.
    pub fn substitute_slot(
        &mut self,
        category: CategoryId,
        slot: usize,
        ingredient: IngredientId,
    ) -> bool {
        let Some(entries) = self.categories.get_mut(&category) else {
            return false;
        };
        if slot >= entries.len() {
            return false;
        }
        if entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != slot && e.ingredient == ingredient)
        {
            return false;
        }
        entries[slot].ingredient = ingredient;
        true
    }

    /// Sum of all non-pinch amounts.
    pub fn total_amount(&self) -> Amount {
        self.iter()
            .map(|(_, e)| e.amount)
            .filter(|a| !a.is_pinch())
            .fold(Amount::default(), |acc, a| acc + a)
    }

    /// Scale every non-pinch amount so they sum to `total`.
    ///
    /// A recipe with no measurable amount is left unchanged.
    pub fn normalize(&mut self, total: Amount) {
        let current = self.total_amount();
        if current.value() <= 0.0 {
            return;
        }
        let coefficient = total / current;
        for entries in self.categories.values_mut() {
            for entry in entries.iter_mut().filter(|e| !e.amount.is_pinch()) {
                entry.amount = entry.amount * coefficient;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Lexicon;

    fn lexicon() -> (Lexicon, IngredientId, IngredientId, IngredientId) {
        let mut lexicon = Lexicon::new();
        let sugar = lexicon.intern_ingredient("sugar");
        let honey = lexicon.intern_ingredient("honey");
        let butter = lexicon.intern_ingredient("butter");
        (lexicon, sugar, honey, butter)
    }

    #[test]
    fn test_add_creates_category() {
        let (_, sugar, _, _) = lexicon();
        let mut recipe = Recipe::new();
        assert!(recipe.is_empty());

        assert!(recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(10.0)));
        assert!(recipe.contains_category(CategoryId::SWEETENERS));
        assert_eq!(recipe.len(), 1);
    }

    #[test]
    fn test_replace_preserves_amount() {
        let (_, sugar, _, _) = lexicon();
        let mut recipe = Recipe::new();
        recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(10.0));

        assert!(!recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(3.0)));
        assert_eq!(recipe.len(), 1);
        assert_eq!(
            recipe.amount_of(CategoryId::SWEETENERS, sugar),
            Some(Amount::ounces(10.0))
        );
    }

    #[test]
    fn test_remove_missing_is_reported() {
        let (_, sugar, honey, _) = lexicon();
        let mut recipe = Recipe::new();
        recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(10.0));

        assert_eq!(
            recipe.remove_ingredient(CategoryId::EGGS, sugar),
            Err(RecipeError::CategoryNotFound(CategoryId::EGGS))
        );
        assert!(matches!(
            recipe.remove_ingredient(CategoryId::SWEETENERS, honey),
            Err(RecipeError::IngredientNotFound { .. })
        ));
        assert_eq!(recipe.len(), 1);

        let removed = recipe.remove_ingredient(CategoryId::SWEETENERS, sugar).unwrap();
        assert_eq!(removed.amount, Amount::ounces(10.0));
        assert!(recipe.is_empty());
    }

    #[test]
    fn test_rename() {
        let (_, sugar, honey, butter) = lexicon();
        let mut recipe = Recipe::new();
        recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(10.0));
        recipe.add_ingredient(CategoryId::SWEETENERS, butter, Amount::ounces(4.0));

        recipe
            .rename_ingredient(CategoryId::SWEETENERS, sugar, honey)
            .unwrap();
        assert_eq!(
            recipe.amount_of(CategoryId::SWEETENERS, honey),
            Some(Amount::ounces(10.0))
        );

        let err = recipe.rename_ingredient(CategoryId::SWEETENERS, honey, butter);
        assert!(matches!(err, Err(RecipeError::DuplicateIngredient { .. })));
        assert!(matches!(
            recipe.rename_ingredient(CategoryId::SALT, honey, sugar),
            Err(RecipeError::CategoryNotFound(_))
        ));
        assert_eq!(recipe.len(), 2);
    }

    #[test]
    fn test_substitute_slot_refuses_duplicates() {
        let (_, sugar, honey, _) = lexicon();
        let mut recipe = Recipe::new();
        recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(10.0));
        recipe.add_ingredient(CategoryId::SWEETENERS, honey, Amount::ounces(2.0));

        assert!(!recipe.substitute_slot(CategoryId::SWEETENERS, 0, honey));
        assert!(!recipe.substitute_slot(CategoryId::SWEETENERS, 5, honey));
        assert!(recipe.substitute_slot(CategoryId::SWEETENERS, 0, sugar));
        assert_eq!(recipe.entries(CategoryId::SWEETENERS)[0].ingredient, sugar);
    }

    #[test]
    fn test_normalize_skips_pinch() {
        let (_, sugar, honey, butter) = lexicon();
        let mut recipe = Recipe::new();
        recipe.add_ingredient(CategoryId::SWEETENERS, sugar, Amount::ounces(30.0));
        recipe.add_ingredient(CategoryId::FATS_OILS, butter, Amount::ounces(20.0));
        recipe.add_ingredient(CategoryId::MISC, honey, Amount::PINCH);

        recipe.normalize(Amount::ounces(100.0));
        assert!((recipe.total_amount().value() - 100.0).abs() < 1e-9);
        assert_eq!(
            recipe.amount_of(CategoryId::SWEETENERS, sugar),
            Some(Amount::ounces(60.0))
        );
        assert!(recipe.amount_of(CategoryId::MISC, honey).unwrap().is_pinch());
    }

    #[test]
    fn test_amount_arithmetic_and_display() {
        let a = Amount::ounces(6.0);
        let b = Amount::ounces(2.0);
        assert_eq!((a + b).value(), 8.0);
        assert_eq!((a - b).value(), 4.0);
        assert_eq!((a * b).value(), 12.0);
        assert_eq!((a / b).value(), 3.0);
        assert_eq!(a.to_string(), "6 oz");
        assert_eq!(Amount::PINCH.to_string(), "a pinch");
    }
}
