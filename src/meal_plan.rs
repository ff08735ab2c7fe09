use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Document, JsonStore, StoreError};

/// The four meal slots of a day, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            "snack" => Some(MealSlot::Snack),
            _ => None,
        }
    }
}

/// Accepts both shapes older data files used for a slot entry: a bare
/// recipe-name string or a `{recipe, servings}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Name(String),
    Tagged {
        recipe: String,
        #[serde(default)]
        servings: Option<f64>,
    },
}

/// One scheduled recipe reference with an optional serving-size override.
/// Every entry normalizes to this shape on read and is written back as the
/// tagged object form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawEntry")]
pub struct PlanEntry {
    pub recipe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<f64>,
}

impl PlanEntry {
    pub fn new(recipe: impl Into<String>) -> Self {
        Self {
            recipe: recipe.into(),
            servings: None,
        }
    }

    pub fn with_servings(recipe: impl Into<String>, servings: f64) -> Self {
        Self {
            recipe: recipe.into(),
            servings: Some(servings),
        }
    }
}

impl From<RawEntry> for PlanEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Name(recipe) => PlanEntry {
                recipe,
                servings: None,
            },
            RawEntry::Tagged { recipe, servings } => PlanEntry { recipe, servings },
        }
    }
}

pub type DayPlan = BTreeMap<MealSlot, Vec<PlanEntry>>;

/// Mapping from calendar date to per-slot recipe references, persisted as
/// `meal_plan.json`. A missing file reads as an empty plan.
///
/// A recipe reference is not validated against the Recipe Store at write
/// time; a dangling reference is skipped at view/aggregation time instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MealPlan {
    days: BTreeMap<NaiveDate, DayPlan>,
}

impl MealPlan {
    pub fn load(store: &JsonStore) -> Result<Self, StoreError> {
        store.read_or_default(Document::MealPlan)
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), StoreError> {
        store.write(Document::MealPlan, self)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.get(&date)
    }

    pub fn entries(&self, date: NaiveDate, slot: MealSlot) -> &[PlanEntry] {
        self.days
            .get(&date)
            .and_then(|day| day.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn add_entry(&mut self, date: NaiveDate, slot: MealSlot, entry: PlanEntry) {
        self.days
            .entry(date)
            .or_default()
            .entry(slot)
            .or_default()
            .push(entry);
    }

    /// Remove the entry at `index`. An emptied slot is pruned, and a day
    /// whose last slot was cleared is pruned with it.
    pub fn remove_entry(
        &mut self,
        date: NaiveDate,
        slot: MealSlot,
        index: usize,
    ) -> Option<PlanEntry> {
        let day = self.days.get_mut(&date)?;
        let entries = day.get_mut(&slot)?;
        if index >= entries.len() {
            return None;
        }
        let removed = entries.remove(index);
        if entries.is_empty() {
            day.remove(&slot);
        }
        if day.is_empty() {
            self.days.remove(&date);
        }
        Some(removed)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
