use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{Document, JsonStore, StoreError};

/// The flat, sorted set of known ingredient names.
///
/// Persisted as a plain JSON array of lowercase strings. This is the
/// universe used for ingredient name matching during recipe authoring;
/// entries are only ever added (with explicit user confirmation), never
/// mutated or deleted through the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct IngredientCatalog {
    names: Vec<String>,
}

impl IngredientCatalog {
    /// Load the catalog. A missing `ingredients.json` is fatal: the lookup
    /// flows that need the catalog cannot run without it.
    pub fn load(store: &JsonStore) -> Result<Self, StoreError> {
        let mut catalog: Self = store.read(Document::Ingredients)?;
        catalog.normalize();
        Ok(catalog)
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), StoreError> {
        store.write(Document::Ingredients, self)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.names.iter().any(|n| *n == name)
    }

    /// Insert a name, keeping the catalog sorted. Returns false when the
    /// name is empty after normalization or already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        info!("adding ingredient '{}' to catalog", name);
        self.names.push(name);
        self.names.sort();
        true
    }

    fn normalize(&mut self) {
        for name in &mut self.names {
            let cleaned = name.trim().to_lowercase();
            if cleaned != *name {
                *name = cleaned;
            }
        }
        self.names.retain(|n| !n.is_empty());
        self.names.sort();
        self.names.dedup();
    }
}
