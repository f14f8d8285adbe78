//! Small in-memory tables shared by unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::{
    KnowledgeBase, MutationConfig, RawIngredient, RawRecipe, Recipe, ScoringConfig,
    SubstitutionEntry,
};

use super::oracle::{CooccurrenceModel, EmbeddingTable};
use super::pantry::{Pantry, PantryBuilder};

fn entry(category: &str, subs: &[&str]) -> SubstitutionEntry {
    SubstitutionEntry {
        category: category.to_string(),
        subs: subs.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn knowledge() -> KnowledgeBase {
    let translations = [
        ("sugar", "sugar"),
        ("granulated sugar", "sugar"),
        ("brown sugar", "brown sugar"),
        ("honey", "honey"),
        ("butter", "butter"),
        ("margarine", "margarine"),
        ("egg", "egg"),
        ("vanilla", "vanilla"),
        ("flour", "flour"),
        ("baking soda", "baking soda"),
        ("salt", "salt"),
        ("oat", "oat"),
        ("almond", "almond"),
        ("kiwi", "kiwi fruit"),
        ("kiwi fruit", "kiwi fruit"),
        ("chocolate chip", "chocolate chip"),
        ("rum", "rum"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let entries = HashMap::from([
        ("sugar".to_string(), entry("sweeten", &["honey", "brown sugar"])),
        ("brown sugar".to_string(), entry("sweeten", &["sugar"])),
        ("honey".to_string(), entry("sweeten", &["sugar"])),
        ("butter".to_string(), entry("fatsoils", &["margarine"])),
        ("margarine".to_string(), entry("fatsoils", &["butter"])),
        ("egg".to_string(), entry("eggs", &[])),
        ("vanilla".to_string(), entry("extracts", &[])),
        ("flour".to_string(), entry("flours", &[])),
        ("baking soda".to_string(), entry("leaven", &[])),
        ("salt".to_string(), entry("salt", &[])),
        ("oat".to_string(), entry("grains", &[])),
        ("almond".to_string(), entry("nuts", &[])),
        ("kiwi fruit".to_string(), entry("fruit", &[])),
        ("chocolate chip".to_string(), entry("chocolate", &[])),
        ("rum".to_string(), entry("liquor", &[])),
    ]);

    KnowledgeBase::from_tables(translations, entries)
}

pub fn cooccurrence() -> CooccurrenceModel {
    let row = |pairs: &[(&str, f64)]| -> HashMap<String, f64> {
        pairs.iter().map(|&(k, p)| (k.to_string(), p)).collect()
    };
    CooccurrenceModel::from_transitions(HashMap::from([
        ("baking soda".to_string(), row(&[("butter", 0.5), ("egg", 0.5)])),
        ("butter".to_string(), row(&[("egg", 0.6), ("flour", 0.4)])),
        ("egg".to_string(), row(&[("flour", 0.7), ("salt", 0.3)])),
        ("flour".to_string(), row(&[("salt", 0.5), ("sugar", 0.5)])),
        ("honey".to_string(), row(&[("salt", 0.2), ("vanilla", 0.8)])),
        ("salt".to_string(), row(&[("sugar", 0.9), ("vanilla", 0.1)])),
    ]))
}

pub fn embeddings() -> EmbeddingTable {
    EmbeddingTable::from_entries(
        [
            ("sugar", [0.9, 0.1, 0.1, 0.0]),
            ("honey", [0.8, 0.2, 0.1, 0.1]),
            ("butter", [0.4, 0.8, 0.1, 0.1]),
            ("wheat", [0.3, 0.5, 0.7, 0.0]),
            ("egg", [0.2, 0.6, 0.5, 0.1]),
            ("vanilla", [0.7, 0.1, 0.0, 0.5]),
            ("chocolate", [0.6, 0.4, 0.0, 0.4]),
            ("salt", [0.1, 0.2, 0.3, 0.1]),
            ("oat", [0.3, 0.3, 0.8, 0.1]),
            ("cinnamon", [0.5, 0.0, 0.2, 0.7]),
            ("tapioca", [0.4, 0.1, 0.6, 0.2]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_vec())),
    )
    .expect("fixture embeddings share one dimension")
}

pub fn builder() -> PantryBuilder {
    PantryBuilder::new(knowledge(), cooccurrence(), embeddings())
}

pub fn pantry() -> Pantry {
    builder().finish(&MutationConfig::default(), &ScoringConfig::default())
}

fn raw(pairs: &[(&str, f64)]) -> RawRecipe {
    pairs
        .iter()
        .map(|&(name, amount)| RawIngredient(name.to_string(), amount))
        .collect()
}

pub fn inspiring_set() -> Vec<RawRecipe> {
    vec![
        raw(&[
            ("butter", 8.0),
            ("granulated sugar", 7.0),
            ("eggs", 2.0),
            ("all purpose flour", 10.0),
            ("baking soda", 0.2),
            ("salt", -1.0),
        ]),
        raw(&[
            ("margarine", 6.0),
            ("brown sugar", 8.0),
            ("egg", 2.0),
            ("flour", 9.0),
            ("chocolate chips", 6.0),
        ]),
        raw(&[
            ("butter", 7.0),
            ("honey", 5.0),
            ("vanilla", 0.5),
            ("flour", 11.0),
            ("salt", 0.1),
        ]),
        raw(&[
            ("butter", 8.0),
            ("sugar", 6.0),
            ("flour", 10.0),
            ("rolled oats", 4.0),
        ]),
    ]
}

/// Pantry plus the inspiring set converted through it.
pub fn pantry_with_recipes() -> (Arc<Pantry>, Vec<Recipe>) {
    let mut builder = builder();
    let recipes = inspiring_set().iter().map(|r| builder.ingest(r)).collect();
    let pantry = builder.finish(&MutationConfig::default(), &ScoringConfig::default());
    (Arc::new(pantry), recipes)
}
