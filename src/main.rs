//! Cookie Forge CLI - Evolve a cookie recipe from JSON configuration.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use cookie_forge::{
    compute::{
        PantryBuilder,
        evolution::EvolutionEngine,
        oracle::{CooccurrenceModel, EmbeddingTable},
    },
    render::{recipe_title, render_markdown},
    schema::{Amount, EvolutionConfig, EvolutionPhase, KnowledgeBase, load_inspiring_set},
};

/// Report an error and exit.
fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("Error {context}: {err}");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations] [output.md]", args[0]);
        eprintln!();
        eprintln!("Evolve a cookie recipe from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to evolution configuration file");
        eprintln!("  generations  Number of generations (default: from config)");
        eprintln!("  output.md    Where to write the recipe card (default: cookie.md)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(args.get(3).map(String::as_str).unwrap_or("cookie.md"));

    // Load configuration
    let config_str = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| fail("reading config file", e));
    let mut config: EvolutionConfig =
        serde_json::from_str(&config_str).unwrap_or_else(|e| fail("parsing config", e));
    if let Some(arg) = args.get(2) {
        config.generations = arg
            .parse()
            .unwrap_or_else(|e| fail("parsing generation count", e));
    }

    // Load data tables
    let data = &config.data;
    let knowledge = KnowledgeBase::load(&data.translations, &data.substitutions)
        .unwrap_or_else(|e| fail("loading knowledge base", e));
    let cooccurrence = CooccurrenceModel::load(&data.cooccurrence)
        .unwrap_or_else(|e| fail("loading co-occurrence model", e));
    let embeddings =
        EmbeddingTable::load(&data.embeddings).unwrap_or_else(|e| fail("loading embeddings", e));
    let inspiring_set = load_inspiring_set(&data.inspiring_set)
        .unwrap_or_else(|e| fail("loading inspiring set", e));

    let mut builder = PantryBuilder::new(knowledge, cooccurrence, embeddings);
    if let Some(path) = &data.affinity_embeddings {
        let table =
            EmbeddingTable::load(path).unwrap_or_else(|e| fail("loading affinity embeddings", e));
        builder = builder.with_affinity_table(table);
    }
    let recipes = inspiring_set.iter().map(|raw| builder.ingest(raw)).collect();
    let pantry = Arc::new(builder.finish(&config.mutation, &config.scoring));

    println!("Cookie Forge");
    println!("============");
    println!("Inspiring set: {} recipes", inspiring_set.len());
    println!("Ingredients known: {}", pantry.lexicon().ingredient_count());
    println!("Generations: {}", config.generations);
    println!();

    let render_config = config.render.clone();
    let generations = config.generations;
    let mut rng = match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut engine = EvolutionEngine::new(config, Arc::clone(&pantry), recipes)
        .unwrap_or_else(|e| fail("in configuration", e));

    println!("Evolving...");
    let result = engine.run_with_callback(|progress| {
        if progress.phase == EvolutionPhase::Initializing {
            return;
        }
        if let Some(stats) = &progress.latest {
            println!(
                "  Generation {}/{}: {} offspring, {} disqualified, best rank sum {}",
                progress.generation,
                progress.total_generations,
                stats.offspring,
                stats.disqualified,
                stats.best_rank_sum
            );
        }
    });

    println!();
    println!(
        "Time: {:.2}s ({:.1} evaluations/s, {} total)",
        result.stats.elapsed_seconds,
        result.stats.evaluations_per_second,
        result.stats.total_evaluations
    );

    let mut best = result.best.recipe;
    if let Some(total) = render_config.normalize_total {
        best.normalize(Amount::ounces(total));
    }

    let lexicon = pantry.lexicon();
    let title = recipe_title(
        &best,
        lexicon,
        generations,
        &render_config.dish_names,
        &mut rng,
    );
    let card = render_markdown(&best, lexicon, &title, &mut rng);
    fs::write(&output_path, card).unwrap_or_else(|e| fail("writing recipe card", e));

    println!("Best: {title} ({:?})", result.best.fitness);
    println!("Recipe written to {}", output_path.display());
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    let json = serde_json::to_string_pretty(&config)
        .unwrap_or_else(|e| fail("serializing example config", e));

    println!("Example configuration (config.json):");
    println!("{json}");
}
