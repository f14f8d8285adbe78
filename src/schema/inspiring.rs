//! Raw inspiring-set recipes as persisted by the recipe scraper.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::io::{LoadError, read_json};

/// One `[name, amount]` pair. A negative amount marks a pinch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIngredient(pub String, pub f64);

/// An unconverted recipe: a plain ingredient list.
pub type RawRecipe = Vec<RawIngredient>;

/// Load the inspiring set: an array of recipes, each an array of pairs.
pub fn load_inspiring_set<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecipe>, LoadError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_inspiring_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inspiring_set.json");
        fs::write(
            &path,
            r#"[[["butter", 8.0], ["sugar", 7.5]], [["flour", 10], ["vanilla", -1.0]]]"#,
        )
        .unwrap();

        let set = load_inspiring_set(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0][1], RawIngredient("sugar".to_string(), 7.5));
        assert_eq!(set[1][0].1, 10.0);
        assert!(set[1][1].1 < 0.0);
    }
}
