use serde::{Deserialize, Serialize};

use crate::store::{Document, JsonStore, StoreError};

pub const MIN_DAYS_TO_VIEW: u32 = 1;
pub const MAX_DAYS_TO_VIEW: u32 = 14;
pub const DEFAULT_DAYS_TO_VIEW: u32 = 7;

fn default_days_to_view() -> u32 {
    DEFAULT_DAYS_TO_VIEW
}

/// User preferences, persisted as `settings.json`. Created lazily on the
/// first save and overwritten wholesale after that; a missing file reads
/// as the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_days_to_view")]
    pub days_to_view: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days_to_view: DEFAULT_DAYS_TO_VIEW,
        }
    }
}

impl Settings {
    pub fn load(store: &JsonStore) -> Result<Self, StoreError> {
        let settings: Self = store.read_or_default(Document::Settings)?;
        Ok(settings.clamped())
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), StoreError> {
        store.write(Document::Settings, &self.clamped())
    }

    /// Days-to-view constrained to the supported 1..=14 range.
    pub fn clamped(self) -> Self {
        Self {
            days_to_view: self
                .days_to_view
                .clamp(MIN_DAYS_TO_VIEW, MAX_DAYS_TO_VIEW),
        }
    }
}
