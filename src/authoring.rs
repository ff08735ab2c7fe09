use tracing::{debug, info};

use crate::ingredient_catalog::IngredientCatalog;
use crate::name_resolver::{self, Resolution, DUPLICATE_CHECK, INGREDIENT_LOOKUP};
use crate::recipe_store::{normalize_name, IngredientLine, Recipe, RecipeStore};

/// States of the add-recipe flow. Both front ends drive the same machine;
/// the text menu walks every state, the GUI's single-dialog editor walks
/// the same transitions without the intermediate prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Naming,
    EditingIngredients,
    EditingInstructions,
    Saved,
    Discarded,
}

/// Result of proposing a recipe name.
#[derive(Debug, Clone, PartialEq)]
pub enum NameOutcome {
    /// Name rejected: empty or containing characters other than letters
    /// and spaces.
    Invalid,
    /// Similar recipe names already exist. The proposed name is retained;
    /// the user may view one of these (ending the flow) or force-continue
    /// with the same name.
    Duplicates(Vec<String>),
    /// Name accepted; the draft is now editing ingredients.
    Accepted,
}

/// An in-progress recipe. All lines and steps are provisional until
/// `save`; `discard` drops them. Ingredients committed to the catalog
/// while the draft was open are NOT rolled back on discard — that
/// asymmetry is inherited behavior, not an oversight.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    name: String,
    ingredients: Vec<IngredientLine>,
    instructions: Vec<String>,
    servings: f64,
    state: DraftState,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            servings: 1.0,
            state: DraftState::Naming,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[IngredientLine] {
        &self.ingredients
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Validate and adopt a proposed name, running the duplicate check
    /// against the existing recipe names.
    pub fn propose_name(&mut self, raw: &str, existing_names: &[String]) -> NameOutcome {
        if self.state != DraftState::Naming {
            return NameOutcome::Invalid;
        }
        let name = normalize_name(raw);
        if !is_valid_name(&name) {
            return NameOutcome::Invalid;
        }

        let matches = match name_resolver::resolve_default(&name, existing_names, DUPLICATE_CHECK)
        {
            Resolution::NoMatch => {
                debug!("recipe name '{}' is unique", name);
                self.name = name;
                self.state = DraftState::EditingIngredients;
                return NameOutcome::Accepted;
            }
            Resolution::Exact(existing) => vec![existing],
            resolution => resolution.candidate_names(),
        };
        debug!("found similar recipe names for '{}': {:?}", name, matches);
        self.name = name;
        NameOutcome::Duplicates(matches)
    }

    /// Proceed with the retained name despite reported duplicates.
    pub fn force_continue(&mut self) -> bool {
        if self.state == DraftState::Naming && is_valid_name(&self.name) {
            self.state = DraftState::EditingIngredients;
            true
        } else {
            false
        }
    }

    pub fn add_ingredient(&mut self, line: IngredientLine) -> bool {
        if self.state != DraftState::EditingIngredients {
            return false;
        }
        self.ingredients.push(line);
        true
    }

    pub fn update_ingredient(&mut self, index: usize, quantity: String, unit: String) -> bool {
        if self.state != DraftState::EditingIngredients {
            return false;
        }
        match self.ingredients.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                line.unit = unit;
                true
            }
            None => false,
        }
    }

    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if self.state == DraftState::EditingIngredients && index < self.ingredients.len() {
            self.ingredients.remove(index);
            true
        } else {
            false
        }
    }

    /// Advance to instruction editing. Requires at least one ingredient
    /// line.
    pub fn finish_ingredients(&mut self) -> bool {
        if self.state == DraftState::EditingIngredients && !self.ingredients.is_empty() {
            self.state = DraftState::EditingInstructions;
            true
        } else {
            false
        }
    }

    /// Step back from instruction editing to the ingredient list.
    pub fn reopen_ingredients(&mut self) -> bool {
        if self.state == DraftState::EditingInstructions {
            self.state = DraftState::EditingIngredients;
            true
        } else {
            false
        }
    }

    pub fn add_instruction(&mut self, step: String) -> bool {
        if self.state != DraftState::EditingInstructions || step.trim().is_empty() {
            return false;
        }
        self.instructions.push(step);
        true
    }

    pub fn update_instruction(&mut self, index: usize, step: String) -> bool {
        if self.state != DraftState::EditingInstructions || step.trim().is_empty() {
            return false;
        }
        match self.instructions.get_mut(index) {
            Some(existing) => {
                *existing = step;
                true
            }
            None => false,
        }
    }

    pub fn remove_instruction(&mut self, index: usize) -> bool {
        if self.state == DraftState::EditingInstructions && index < self.instructions.len() {
            self.instructions.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_servings(&mut self, servings: f64) {
        if servings > 0.0 {
            self.servings = servings;
        }
    }

    /// Write the completed record into the store under the draft's name,
    /// replacing any existing record wholesale. Requires at least one
    /// instruction step. The caller persists the store afterwards.
    pub fn save(&mut self, store: &mut RecipeStore) -> Option<String> {
        if self.state != DraftState::EditingInstructions || self.instructions.is_empty() {
            return None;
        }
        let recipe = Recipe {
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            servings: self.servings,
        };
        let name = store.insert(&self.name, recipe);
        info!("recipe '{}' saved with {} ingredients", name, self.ingredients.len());
        self.state = DraftState::Saved;
        Some(name)
    }

    /// Abandon all in-progress lines and steps.
    pub fn discard(&mut self) {
        if matches!(
            self.state,
            DraftState::EditingIngredients | DraftState::EditingInstructions
        ) {
            debug!("discarding draft '{}'", self.name);
            self.state = DraftState::Discarded;
        }
    }
}

/// Recipe names are non-empty and composed of letters and spaces only.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().all(|c| c.is_alphabetic() || c == ' ')
}

/// Ingredient lookup used while editing a draft's ingredient list.
pub fn lookup_ingredient(query: &str, catalog: &IngredientCatalog) -> Resolution {
    name_resolver::resolve_default(query, catalog.names(), INGREDIENT_LOOKUP)
}
