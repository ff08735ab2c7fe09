use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub mod json_store;

pub use json_store::JsonStore;

/// The four JSON documents the application persists. Each one is replaced
/// wholesale on every write (last write wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Recipes,
    Ingredients,
    MealPlan,
    Settings,
}

impl Document {
    pub fn file_name(self) -> &'static str {
        match self {
            Document::Recipes => "recipes.json",
            Document::Ingredients => "ingredients.json",
            Document::MealPlan => "meal_plan.json",
            Document::Settings => "settings.json",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// The backing file does not exist. Callers that tolerate an empty
    /// collection (meal plan, settings) match on this; everywhere else it
    /// propagates as a fatal condition.
    NotFound(PathBuf),
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(path) => {
                write!(f, "data file not found: {}", path.display())
            }
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
            StoreError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Json(err) => Some(err),
            StoreError::NotFound(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}
