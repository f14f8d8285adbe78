//! Markdown recipe cards.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::schema::{CategoryId, Lexicon, Recipe};

/// Oven temperature range in degrees F.
const OVEN_RANGE: std::ops::RangeInclusive<u32> = 325..=375;
/// Baking time range in minutes.
const BAKE_RANGE: std::ops::RangeInclusive<u32> = 10..=15;

/// Categories consumed by the fixed method steps, in step order.
const METHOD_CATEGORIES: [CategoryId; 6] = [
    CategoryId::FATS_OILS,
    CategoryId::SWEETENERS,
    CategoryId::EGGS,
    CategoryId::EXTRACTS,
    CategoryId::LEAVENING,
    CategoryId::SALT,
];

/// Title from the two largest amounts: "`{generations}` star `{a}` and `{b}` `{dish}`".
pub fn recipe_title<R: Rng + ?Sized>(
    recipe: &Recipe,
    lexicon: &Lexicon,
    generations: usize,
    dish_names: &[String],
    rng: &mut R,
) -> String {
    let dish = dish_names
        .choose(rng)
        .map(String::as_str)
        .unwrap_or("cookies");

    let mut entries: Vec<_> = recipe.iter().map(|(_, e)| e).collect();
    entries.sort_by(|a, b| b.amount.value().total_cmp(&a.amount.value()));
    let mut top = entries
        .iter()
        .map(|e| lexicon.ingredient_name(e.ingredient));

    match (top.next(), top.next()) {
        (Some(first), Some(second)) => format!("{generations} star {first} and {second} {dish}"),
        (Some(only), None) => format!("{generations} star {only} {dish}"),
        _ => format!("{generations} star mystery {dish}"),
    }
}

/// A recipe card ready for display.
pub struct RecipeCard<'a> {
    recipe: &'a Recipe,
    lexicon: &'a Lexicon,
    title: &'a str,
    oven_temperature: u32,
    bake_minutes: u32,
}

impl<'a> RecipeCard<'a> {
    /// Card with oven temperature and baking time drawn at random.
    pub fn new<R: Rng + ?Sized>(
        recipe: &'a Recipe,
        lexicon: &'a Lexicon,
        title: &'a str,
        rng: &mut R,
    ) -> Self {
        Self {
            recipe,
            lexicon,
            title,
            oven_temperature: rng.gen_range(OVEN_RANGE),
            bake_minutes: rng.gen_range(BAKE_RANGE),
        }
    }

    fn names(&self, categories: &[CategoryId]) -> String {
        categories
            .iter()
            .flat_map(|&c| self.recipe.entries(c))
            .map(|e| self.lexicon.ingredient_name(e.ingredient))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn remaining(&self) -> String {
        let rest: Vec<CategoryId> = self
            .recipe
            .categories()
            .filter(|c| !METHOD_CATEGORIES.contains(c))
            .collect();
        self.names(&rest)
    }
}

impl fmt::Display for RecipeCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "## INGREDIENTS")?;
        if self.recipe.is_empty() {
            writeln!(f, "Blank recipe")?;
        }
        for (_, entry) in self.recipe.iter() {
            let name = self.lexicon.ingredient_name(entry.ingredient);
            if entry.amount.is_pinch() {
                writeln!(f, "- a pinch of {name}")?;
            } else {
                writeln!(f, "- {} {name}", entry.amount)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## METHOD")?;
        writeln!(
            f,
            "1. Preheat oven to {} degrees F",
            self.oven_temperature
        )?;
        writeln!(
            f,
            "2. Cream together the {} until smooth",
            self.names(&[CategoryId::FATS_OILS, CategoryId::SWEETENERS])
        )?;
        writeln!(
            f,
            "3. Beat in the {} one at a time, then stir in the {}",
            self.names(&[CategoryId::EGGS]),
            self.names(&[CategoryId::EXTRACTS])
        )?;
        writeln!(
            f,
            "4. Dissolve the {} with hot water, then add to batter along with {}",
            self.names(&[CategoryId::LEAVENING]),
            self.names(&[CategoryId::SALT])
        )?;
        writeln!(f, "5. Stir in {}", self.remaining())?;
        writeln!(f, "6. Spoon mixture onto a greased baking tray")?;
        writeln!(
            f,
            "7. Bake for {} minutes or until golden brown",
            self.bake_minutes
        )
    }
}

/// Render a full Markdown recipe card.
pub fn render_markdown<R: Rng + ?Sized>(
    recipe: &Recipe,
    lexicon: &Lexicon,
    title: &str,
    rng: &mut R,
) -> String {
    RecipeCard::new(recipe, lexicon, title, rng).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Amount;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> (Recipe, Lexicon) {
        let mut lexicon = Lexicon::new();
        let mut recipe = Recipe::new();
        let mut add = |category, name: &str, amount| {
            let id = lexicon.intern_ingredient(name);
            recipe.add_ingredient(category, id, Amount::ounces(amount));
        };
        add(CategoryId::FATS_OILS, "butter", 8.0);
        add(CategoryId::SWEETENERS, "brown sugar", 10.0);
        add(CategoryId::EGGS, "egg", 2.0);
        add(CategoryId::SALT, "salt", -1.0);
        add(CategoryId::MISC, "tapioca", 5.0);
        (recipe, lexicon)
    }

    #[test]
    fn test_title_uses_two_largest_amounts() {
        let (recipe, lexicon) = sample();
        let mut rng = StdRng::seed_from_u64(0);
        let dishes = vec!["biscuits".to_string()];

        let title = recipe_title(&recipe, &lexicon, 5, &dishes, &mut rng);
        assert_eq!(title, "5 star brown sugar and butter biscuits");

        let title = recipe_title(&Recipe::new(), &lexicon, 2, &[], &mut rng);
        assert_eq!(title, "2 star mystery cookies");
    }

    #[test]
    fn test_card_sections() {
        let (recipe, lexicon) = sample();
        let mut rng = StdRng::seed_from_u64(4);
        let card = render_markdown(&recipe, &lexicon, "Test", &mut rng);

        assert!(card.starts_with("# Test\n\n## INGREDIENTS\n"));
        assert!(card.contains("- 8 oz butter\n"));
        assert!(card.contains("- a pinch of salt\n"));
        assert!(card.contains("2. Cream together the butter, brown sugar until smooth\n"));
        assert!(card.contains("along with salt\n"));
        assert!(card.contains("5. Stir in tapioca\n"));

        let oven: u32 = card
            .split("Preheat oven to ")
            .nth(1)
            .and_then(|rest| rest.split(' ').next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(OVEN_RANGE.contains(&oven));
        assert_eq!(card.lines().filter(|l| l.starts_with(char::is_numeric)).count(), 7);
    }

    #[test]
    fn test_blank_recipe() {
        let lexicon = Lexicon::new();
        let mut rng = StdRng::seed_from_u64(1);
        let card = render_markdown(&Recipe::new(), &lexicon, "Nothing", &mut rng);
        assert!(card.contains("## INGREDIENTS\nBlank recipe\n"));
    }
}
