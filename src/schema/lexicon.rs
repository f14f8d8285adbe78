//! Interned ingredient and category names.
//!
//! Every name a run can produce is interned once while the pantry is being
//! built. Recipes then carry copyable [`IngredientId`] / [`CategoryId`]
//! handles instead of strings, so category lookups and uniqueness checks are
//! index comparisons.

use std::collections::HashMap;

/// Handle to an interned ingredient name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientId(u32);

impl IngredientId {
    /// Position of this ingredient in the lexicon tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to an interned category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u16);

impl CategoryId {
    /// Fallback category for ingredients the knowledge base does not know.
    pub const MISC: Self = Self(0);
    pub const FATS_OILS: Self = Self(1);
    pub const SWEETENERS: Self = Self(2);
    pub const EGGS: Self = Self(3);
    pub const EXTRACTS: Self = Self(4);
    pub const LEAVENING: Self = Self(5);
    pub const SALT: Self = Self(6);

    /// Position of this category in the lexicon tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Category names with fixed ids, in id order.
const WELL_KNOWN_CATEGORIES: [&str; 7] = [
    "misc", "fatsoils", "sweeten", "eggs", "extracts", "leaven", "salt",
];

/// Phrases longer than this are truncated before combination search.
const MAX_PHRASE_WORDS: usize = 10;

/// Words ending in `s` that are already singular.
const UNCOUNTABLE: [&str; 8] = [
    "molasses", "swiss", "couscous", "hummus", "asparagus", "citrus", "anise", "bitters",
];

/// Interning table for ingredient and category names.
#[derive(Debug, Clone)]
pub struct Lexicon {
    ingredients: Vec<String>,
    ingredient_index: HashMap<String, IngredientId>,
    categories: Vec<String>,
    category_index: HashMap<String, CategoryId>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Create a lexicon holding only the well-known categories.
    pub fn new() -> Self {
        let mut lexicon = Self {
            ingredients: Vec::new(),
            ingredient_index: HashMap::new(),
            categories: Vec::new(),
            category_index: HashMap::new(),
        };
        for name in WELL_KNOWN_CATEGORIES {
            lexicon.intern_category(name);
        }
        lexicon
    }

    /// Intern an ingredient name, returning its handle.
    pub fn intern_ingredient(&mut self, name: &str) -> IngredientId {
        let name = normalize_name(name);
        if let Some(&id) = self.ingredient_index.get(&name) {
            return id;
        }
        let id = IngredientId(self.ingredients.len() as u32);
        self.ingredients.push(name.clone());
        self.ingredient_index.insert(name, id);
        id
    }

    /// Intern a category name, returning its handle.
    pub fn intern_category(&mut self, name: &str) -> CategoryId {
        let name = normalize_name(name);
        if let Some(&id) = self.category_index.get(&name) {
            return id;
        }
        let id = CategoryId(self.categories.len() as u16);
        self.categories.push(name.clone());
        self.category_index.insert(name, id);
        id
    }

    /// Look up an already interned ingredient.
    pub fn ingredient(&self, name: &str) -> Option<IngredientId> {
        self.ingredient_index.get(&normalize_name(name)).copied()
    }

    /// Look up an already interned category.
    pub fn category(&self, name: &str) -> Option<CategoryId> {
        self.category_index.get(&normalize_name(name)).copied()
    }

    pub fn ingredient_name(&self, id: IngredientId) -> &str {
        &self.ingredients[id.index()]
    }

    pub fn category_name(&self, id: CategoryId) -> &str {
        &self.categories[id.index()]
    }

    /// Number of interned ingredients.
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Number of interned categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Iterate over all interned ingredients.
    pub fn ingredients(&self) -> impl Iterator<Item = (IngredientId, &str)> {
        self.ingredients
            .iter()
            .enumerate()
            .map(|(i, name)| (IngredientId(i as u32), name.as_str()))
    }
}

/// Lowercase a name and collapse its whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold a plural English noun to its singular form.
///
/// Handles the regular suffixes that show up in ingredient lists; irregular
/// plurals pass through unchanged.
pub fn singular(word: &str) -> String {
    if word.len() <= 3 || UNCOUNTABLE.contains(&word) || !word.ends_with('s') {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        // "cookies" and "brownies" keep their "ie"; "berries" becomes "berry".
        return if stem.ends_with('k') || stem.ends_with('n') || stem.len() < 2 {
            format!("{stem}ie")
        } else {
            format!("{stem}y")
        };
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes", "oes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    word[..word.len() - 1].to_string()
}

/// Singularize the last word of a normalized phrase.
pub fn singular_phrase(phrase: &str) -> String {
    let normalized = normalize_name(phrase);
    match normalized.rsplit_once(' ') {
        Some((head, last)) => format!("{head} {}", singular(last)),
        None => singular(&normalized),
    }
}

/// Find the longest order-preserving word combination of `name` accepted by
/// `contains`.
///
/// The phrase is normalized and singularized first. Combinations are tried
/// from the most words to a single word; within one length, in lexicographic
/// order of word positions. Only the first `MAX_PHRASE_WORDS` words are
/// searched; the rest of a longer phrase is ignored.
pub fn resolve_phrase(name: &str, contains: impl Fn(&str) -> bool) -> Option<String> {
    let phrase = singular_phrase(name);
    let mut words: Vec<&str> = phrase.split(' ').collect();
    if words.len() > MAX_PHRASE_WORDS {
        log::debug!(
            "Phrase {phrase:?} truncated to its first {MAX_PHRASE_WORDS} words"
        );
        words.truncate(MAX_PHRASE_WORDS);
    }
    if words.iter().all(|w| w.is_empty()) {
        return None;
    }

    let n = words.len();
    let mut candidate = String::new();
    for k in (1..=n).rev() {
        let mut idx: Vec<usize> = (0..k).collect();
        loop {
            candidate.clear();
            for (pos, &i) in idx.iter().enumerate() {
                if pos > 0 {
                    candidate.push(' ');
                }
                candidate.push_str(words[i]);
            }
            if contains(&candidate) {
                return Some(candidate);
            }

            // Advance to the next combination of k positions out of n.
            let mut i = k;
            while i > 0 && idx[i - 1] == i - 1 + n - k {
                i -= 1;
            }
            if i == 0 {
                break;
            }
            idx[i - 1] += 1;
            for j in i..k {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
    None
}
