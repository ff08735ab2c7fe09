use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{Document, JsonStore, StoreError};

/// One ingredient line of a recipe. Quantity stays decimal-bearing text as
/// entered ("100", "0.5"); it is only parsed numerically during shopping
/// list aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientLine {
    pub item: String,
    pub quantity: String,
    pub unit: String,
}

fn default_servings() -> f64 {
    1.0
}

fn is_default_servings(servings: &f64) -> bool {
    *servings == default_servings()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<String>,
    #[serde(
        default = "default_servings",
        skip_serializing_if = "is_default_servings"
    )]
    pub servings: f64,
}

impl Recipe {
    /// Base servings with corrupt values (zero or negative) treated as 1,
    /// so serving ratios stay finite.
    pub fn base_servings(&self) -> f64 {
        if self.servings > 0.0 {
            self.servings
        } else {
            default_servings()
        }
    }
}

/// Mapping from lowercase recipe name to recipe record, persisted as
/// `recipes.json`. The whole record is overwritten on every save; there is
/// no versioning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RecipeStore {
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeStore {
    /// Load the store. A missing `recipes.json` is fatal for every flow
    /// that browses or references recipes.
    pub fn load(store: &JsonStore) -> Result<Self, StoreError> {
        store.read(Document::Recipes)
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), StoreError> {
        store.write(Document::Recipes, self)
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(&normalize_name(name))
    }

    /// Insert or replace a recipe under its normalized name.
    pub fn insert(&mut self, name: &str, recipe: Recipe) -> String {
        let name = normalize_name(name);
        info!("saving recipe '{}'", name);
        self.recipes.insert(name.clone(), recipe);
        name
    }

    pub fn remove(&mut self, name: &str) -> Option<Recipe> {
        let name = normalize_name(name);
        let removed = self.recipes.remove(&name);
        if removed.is_some() {
            info!("deleted recipe '{}'", name);
        }
        removed
    }

    /// All recipe names in lexicographic order, the order browse screens
    /// display them in.
    pub fn names(&self) -> Vec<String> {
        self.recipes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Recipe)> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn oat_recipe() -> Recipe {
        Recipe {
            ingredients: vec![IngredientLine {
                item: "oats".to_string(),
                quantity: "100".to_string(),
                unit: "g".to_string(),
            }],
            instructions: vec!["boil water".to_string(), "add oats".to_string()],
            servings: 2.0,
        }
    }

    #[test]
    fn test_insert_normalizes_key() {
        let mut store = RecipeStore::default();
        store.insert("  Overnight Oats ", oat_recipe());
        assert!(store.contains("overnight oats"));
        assert!(store.get("OVERNIGHT OATS").is_some());
    }

    #[test]
    fn test_names_are_sorted() {
        let mut store = RecipeStore::default();
        store.insert("pancakes", oat_recipe());
        store.insert("apple pie", oat_recipe());
        store.insert("omelette", oat_recipe());
        assert_eq!(store.names(), ["apple pie", "omelette", "pancakes"]);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let json = JsonStore::new(dir.path());

        let mut store = RecipeStore::default();
        store.insert("oats", oat_recipe());
        store.save(&json).unwrap();

        let loaded = RecipeStore::load(&json).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.get("oats").unwrap().servings, 2.0);
    }

    #[test]
    fn test_default_servings_omitted_from_json() {
        let dir = tempdir().unwrap();
        let json = JsonStore::new(dir.path());

        let mut recipe = oat_recipe();
        recipe.servings = 1.0;
        let mut store = RecipeStore::default();
        store.insert("oats", recipe);
        store.save(&json).unwrap();

        let text = std::fs::read_to_string(json.path_for(Document::Recipes)).unwrap();
        assert!(!text.contains("servings"));

        let loaded = RecipeStore::load(&json).unwrap();
        assert_eq!(loaded.get("oats").unwrap().servings, 1.0);
    }

    #[test]
    fn test_base_servings_guards_corrupt_values() {
        let mut recipe = oat_recipe();
        recipe.servings = 0.0;
        assert_eq!(recipe.base_servings(), 1.0);
        recipe.servings = -3.0;
        assert_eq!(recipe.base_servings(), 1.0);
        recipe.servings = 4.0;
        assert_eq!(recipe.base_servings(), 4.0);
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let json = JsonStore::new(dir.path());
        assert!(matches!(
            RecipeStore::load(&json),
            Err(StoreError::NotFound(_))
        ));
    }
}
