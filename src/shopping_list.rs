use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::meal_plan::{MealPlan, MealSlot};
use crate::recipe_store::RecipeStore;

/// Total required quantity per ingredient, split by unit: item name ->
/// unit -> quantity. No unit conversion is performed, so "200 g" and
/// "1 cup" of the same item stay separate line items. BTreeMap keys give
/// the lexicographic ordering display code wants.
pub type ShoppingList = BTreeMap<String, BTreeMap<String, f64>>;

/// Aggregate every scheduled recipe over `day_count` consecutive dates
/// starting at `start` (inclusive) into per-(item, unit) totals.
///
/// A dangling recipe reference is skipped, not an error: the recipe may
/// have been deleted after it was scheduled. An unparseable quantity
/// contributes zero rather than failing the aggregation. Each line's
/// quantity is scaled by the entry's serving ratio (override servings over
/// the recipe's base servings) before summation.
pub fn aggregate(
    start: NaiveDate,
    day_count: u32,
    plan: &MealPlan,
    recipes: &RecipeStore,
) -> ShoppingList {
    let mut totals = ShoppingList::new();

    for offset in 0..day_count {
        let Some(date) = start.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        for slot in MealSlot::ALL {
            for entry in plan.entries(date, slot) {
                let Some(recipe) = recipes.get(&entry.recipe) else {
                    debug!(
                        "skipping dangling reference '{}' on {} {}",
                        entry.recipe,
                        date,
                        slot.as_str()
                    );
                    continue;
                };
                let ratio = match entry.servings {
                    Some(requested) => requested / recipe.base_servings(),
                    None => 1.0,
                };
                for line in &recipe.ingredients {
                    let quantity = parse_quantity(&line.quantity) * ratio;
                    let item = line.item.trim().to_lowercase();
                    let unit = line.unit.trim().to_lowercase();
                    *totals
                        .entry(item)
                        .or_default()
                        .entry(unit)
                        .or_insert(0.0) += quantity;
                }
            }
        }
    }

    totals
}

/// Parse a decimal-bearing quantity string, treating anything unparseable
/// as zero.
pub fn parse_quantity(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Render a quantity the way the shopping list displays it: two decimals
/// with trailing zeros (and a trailing dot) trimmed.
pub fn format_quantity(quantity: f64) -> String {
    let text = format!("{:.2}", quantity);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plan::PlanEntry;
    use crate::recipe_store::{IngredientLine, Recipe};

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn line(item: &str, quantity: &str, unit: &str) -> IngredientLine {
        IngredientLine {
            item: item.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }

    fn recipe(lines: Vec<IngredientLine>, servings: f64) -> Recipe {
        Recipe {
            ingredients: lines,
            instructions: vec!["cook".to_string()],
            servings,
        }
    }

    #[test]
    fn test_empty_plan_aggregates_to_empty_map() {
        let plan = MealPlan::default();
        let recipes = RecipeStore::default();
        let list = aggregate(date("2024-01-01"), 14, &plan, &recipes);
        assert!(list.is_empty());
    }

    #[test]
    fn test_serving_override_scales_quantities() {
        // Recipe "oats" (base servings 2) with 100 g oats, scheduled with an
        // override of 4 servings, contributes 200 g.
        let mut recipes = RecipeStore::default();
        recipes.insert("oats", recipe(vec![line("oats", "100", "g")], 2.0));

        let mut plan = MealPlan::default();
        plan.add_entry(
            date("2024-01-01"),
            MealSlot::Breakfast,
            PlanEntry::with_servings("oats", 4.0),
        );

        let list = aggregate(date("2024-01-01"), 1, &plan, &recipes);
        assert_eq!(list["oats"]["g"], 200.0);
    }

    #[test]
    fn test_totals_sum_across_days_and_recipes() {
        let mut recipes = RecipeStore::default();
        recipes.insert("bread", recipe(vec![line("flour", "100", "g")], 1.0));
        recipes.insert("cake", recipe(vec![line("flour", "50", "g")], 1.0));

        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Lunch, PlanEntry::new("bread"));
        plan.add_entry(date("2024-01-03"), MealSlot::Dinner, PlanEntry::new("cake"));

        let list = aggregate(date("2024-01-01"), 7, &plan, &recipes);
        assert_eq!(list["flour"]["g"], 150.0);
    }

    #[test]
    fn test_range_excludes_out_of_window_days() {
        let mut recipes = RecipeStore::default();
        recipes.insert("bread", recipe(vec![line("flour", "100", "g")], 1.0));

        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Lunch, PlanEntry::new("bread"));
        plan.add_entry(date("2024-01-05"), MealSlot::Lunch, PlanEntry::new("bread"));

        let list = aggregate(date("2024-01-01"), 4, &plan, &recipes);
        assert_eq!(list["flour"]["g"], 100.0);
    }

    #[test]
    fn test_units_are_not_converted() {
        let mut recipes = RecipeStore::default();
        recipes.insert(
            "mix",
            recipe(vec![line("flour", "200", "g"), line("flour", "1", "cup")], 1.0),
        );

        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Snack, PlanEntry::new("mix"));

        let list = aggregate(date("2024-01-01"), 1, &plan, &recipes);
        assert_eq!(list["flour"]["g"], 200.0);
        assert_eq!(list["flour"]["cup"], 1.0);
        assert_eq!(list["flour"].len(), 2);
    }

    #[test]
    fn test_dangling_reference_is_skipped() {
        let recipes = RecipeStore::default();
        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Dinner, PlanEntry::new("ghost"));

        let list = aggregate(date("2024-01-01"), 1, &plan, &recipes);
        assert!(list.is_empty());
    }

    #[test]
    fn test_unparseable_quantity_contributes_zero() {
        let mut recipes = RecipeStore::default();
        recipes.insert(
            "soup",
            recipe(
                vec![line("salt", "a pinch", ""), line("water", "500", "ml")],
                1.0,
            ),
        );

        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Dinner, PlanEntry::new("soup"));

        let list = aggregate(date("2024-01-01"), 1, &plan, &recipes);
        assert_eq!(list["salt"][""], 0.0);
        assert_eq!(list["water"]["ml"], 500.0);
    }

    #[test]
    fn test_aggregation_is_additive_across_subranges() {
        let mut recipes = RecipeStore::default();
        recipes.insert("bread", recipe(vec![line("flour", "100", "g")], 1.0));
        recipes.insert("oats", recipe(vec![line("oats", "50", "g")], 1.0));

        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Breakfast, PlanEntry::new("oats"));
        plan.add_entry(date("2024-01-02"), MealSlot::Lunch, PlanEntry::new("bread"));
        plan.add_entry(date("2024-01-02"), MealSlot::Dinner, PlanEntry::new("bread"));

        let whole = aggregate(date("2024-01-01"), 2, &plan, &recipes);

        let mut pointwise = ShoppingList::new();
        for day in [date("2024-01-01"), date("2024-01-02")] {
            for (item, units) in aggregate(day, 1, &plan, &recipes) {
                for (unit, quantity) in units {
                    *pointwise
                        .entry(item.clone())
                        .or_default()
                        .entry(unit)
                        .or_insert(0.0) += quantity;
                }
            }
        }
        assert_eq!(whole, pointwise);
    }

    #[test]
    fn test_item_and_unit_keys_are_normalized() {
        let mut recipes = RecipeStore::default();
        recipes.insert("bread", recipe(vec![line(" Flour", "100", " G ")], 1.0));
        recipes.insert("cake", recipe(vec![line("flour", "50", "g")], 1.0));

        let mut plan = MealPlan::default();
        plan.add_entry(date("2024-01-01"), MealSlot::Lunch, PlanEntry::new("bread"));
        plan.add_entry(date("2024-01-01"), MealSlot::Snack, PlanEntry::new("cake"));

        let list = aggregate(date("2024-01-01"), 1, &plan, &recipes);
        assert_eq!(list["flour"]["g"], 150.0);
    }

    #[test]
    fn test_format_quantity_trims_trailing_zeros() {
        assert_eq!(format_quantity(200.0), "200");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.25), "0.25");
        assert_eq!(format_quantity(0.0), "0");
    }
}
