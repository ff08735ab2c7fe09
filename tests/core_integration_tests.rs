use chrono::NaiveDate;
use tempfile::tempdir;

use meal_planner::authoring::{DraftState, NameOutcome, RecipeDraft};
use meal_planner::ingredient_catalog::IngredientCatalog;
use meal_planner::meal_plan::{MealPlan, MealSlot, PlanEntry};
use meal_planner::recipe_store::{IngredientLine, Recipe, RecipeStore};
use meal_planner::settings::Settings;
use meal_planner::shopping_list;
use meal_planner::store::{Document, JsonStore, StoreError};

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

/// Walk the full authoring flow and verify the persisted record reloads
/// identically.
#[test]
fn test_authoring_flow_round_trips_through_store() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let mut recipes = RecipeStore::default();

    let mut draft = RecipeDraft::new();
    assert_eq!(draft.propose_name("Overnight Oats", &recipes.names()), NameOutcome::Accepted);
    assert!(draft.add_ingredient(line("oats", "100", "g")));
    assert!(draft.add_ingredient(line("milk", "200", "ml")));
    assert!(draft.finish_ingredients());
    assert!(draft.add_instruction("mix everything".to_string()));
    assert!(draft.add_instruction("refrigerate overnight".to_string()));
    draft.set_servings(2.0);

    let saved = draft.save(&mut recipes).unwrap();
    assert_eq!(saved, "overnight oats");
    recipes.save(&store).unwrap();

    let reloaded = RecipeStore::load(&store).unwrap();
    let recipe = reloaded.get("overnight oats").unwrap();
    assert_eq!(recipe.ingredients, vec![line("oats", "100", "g"), line("milk", "200", "ml")]);
    assert_eq!(
        recipe.instructions,
        vec!["mix everything".to_string(), "refrigerate overnight".to_string()]
    );
    assert_eq!(recipe.servings, 2.0);
}

/// Ingredients committed to the catalog during a draft survive the draft
/// being discarded.
#[test]
fn test_catalog_commit_survives_discarded_draft() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    IngredientCatalog::default().save(&store).unwrap();

    let mut catalog = IngredientCatalog::load(&store).unwrap();
    let mut draft = RecipeDraft::new();
    draft.propose_name("toast", &[]);

    // Mid-draft the user creates a catalog ingredient; it persists at once.
    assert!(catalog.insert("sourdough bread"));
    catalog.save(&store).unwrap();
    draft.add_ingredient(line("sourdough bread", "2", "pcs"));

    draft.discard();
    assert_eq!(draft.state(), DraftState::Discarded);

    let reloaded = IngredientCatalog::load(&store).unwrap();
    assert!(reloaded.contains("sourdough bread"));
}

/// The worked aggregation example: recipe "oats" with base servings 2 and
/// a 100 g line, scheduled once with an override of 4 servings.
#[test]
fn test_shopping_list_worked_example() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let mut recipes = RecipeStore::default();
    recipes.insert(
        "oats",
        Recipe {
            ingredients: vec![line("oats", "100", "g")],
            instructions: vec!["cook".to_string()],
            servings: 2.0,
        },
    );
    recipes.save(&store).unwrap();

    let mut plan = MealPlan::default();
    plan.add_entry(
        date("2024-01-01"),
        MealSlot::Breakfast,
        PlanEntry::with_servings("oats", 4.0),
    );
    plan.save(&store).unwrap();

    let plan = MealPlan::load(&store).unwrap();
    let recipes = RecipeStore::load(&store).unwrap();
    let list = shopping_list::aggregate(date("2024-01-01"), 1, &plan, &recipes);

    assert_eq!(list.len(), 1);
    assert_eq!(list["oats"]["g"], 200.0);
}

/// Two recipes contributing the same (item, unit) on different in-range
/// days sum into one line item.
#[test]
fn test_shopping_list_combines_across_days() {
    let mut recipes = RecipeStore::default();
    recipes.insert(
        "bread",
        Recipe {
            ingredients: vec![line("flour", "100", "g")],
            instructions: vec!["bake".to_string()],
            servings: 1.0,
        },
    );
    recipes.insert(
        "cake",
        Recipe {
            ingredients: vec![line("flour", "50", "g")],
            instructions: vec!["bake".to_string()],
            servings: 1.0,
        },
    );

    let mut plan = MealPlan::default();
    plan.add_entry(date("2024-01-01"), MealSlot::Lunch, PlanEntry::new("bread"));
    plan.add_entry(date("2024-01-02"), MealSlot::Dinner, PlanEntry::new("cake"));

    let list = shopping_list::aggregate(date("2024-01-01"), 7, &plan, &recipes);
    assert_eq!(list["flour"]["g"], 150.0);
}

/// A meal-plan file written by an older front end mixes bare recipe-name
/// strings with tagged objects; both shapes load and aggregate.
#[test]
fn test_legacy_meal_plan_file_aggregates() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    std::fs::write(
        store.path_for(Document::MealPlan),
        r#"{
    "2024-06-10": {
        "breakfast": ["porridge"],
        "dinner": [{"recipe": "porridge", "servings": 2}]
    }
}"#,
    )
    .unwrap();

    let mut recipes = RecipeStore::default();
    recipes.insert(
        "porridge",
        Recipe {
            ingredients: vec![line("oats", "50", "g")],
            instructions: vec!["simmer".to_string()],
            servings: 1.0,
        },
    );

    let plan = MealPlan::load(&store).unwrap();
    let list = shopping_list::aggregate(date("2024-06-10"), 1, &plan, &recipes);

    // 50 g for the plain entry plus 100 g for the doubled one.
    assert_eq!(list["oats"]["g"], 150.0);

    // Writing the plan back normalizes every entry to the tagged shape.
    plan.save(&store).unwrap();
    let text = std::fs::read_to_string(store.path_for(Document::MealPlan)).unwrap();
    assert!(!text.contains(r#""porridge"]"#));
    assert!(text.contains(r#""recipe": "porridge""#));
}

/// A deleted recipe leaves its plan entries dangling; they are skipped,
/// not errors.
#[test]
fn test_deleted_recipe_is_skipped_everywhere() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let mut recipes = RecipeStore::default();
    recipes.insert(
        "curry",
        Recipe {
            ingredients: vec![line("rice", "200", "g")],
            instructions: vec!["cook".to_string()],
            servings: 1.0,
        },
    );
    recipes.save(&store).unwrap();

    let mut plan = MealPlan::default();
    plan.add_entry(date("2024-01-01"), MealSlot::Dinner, PlanEntry::new("curry"));
    plan.save(&store).unwrap();

    let mut recipes = RecipeStore::load(&store).unwrap();
    recipes.remove("curry");
    recipes.save(&store).unwrap();

    let plan = MealPlan::load(&store).unwrap();
    let recipes = RecipeStore::load(&store).unwrap();
    let list = shopping_list::aggregate(date("2024-01-01"), 7, &plan, &recipes);
    assert!(list.is_empty());
}

/// Missing files: recipes and ingredients are fatal, meal plan and
/// settings read as empty/default.
#[test]
fn test_missing_file_policy() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    assert!(matches!(RecipeStore::load(&store), Err(StoreError::NotFound(_))));
    assert!(matches!(
        IngredientCatalog::load(&store),
        Err(StoreError::NotFound(_))
    ));
    assert!(MealPlan::load(&store).unwrap().is_empty());
    assert_eq!(Settings::load(&store).unwrap(), Settings::default());
}

/// Settings persist and clamp to the supported range.
#[test]
fn test_settings_persist_and_clamp() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    Settings { days_to_view: 10 }.save(&store).unwrap();
    assert_eq!(Settings::load(&store).unwrap().days_to_view, 10);

    Settings { days_to_view: 50 }.save(&store).unwrap();
    assert_eq!(Settings::load(&store).unwrap().days_to_view, 14);
}

/// Duplicate detection blocks an exact re-save through the authoring flow
/// until the user forces it, and the forced save replaces the record.
#[test]
fn test_duplicate_name_force_continue_overwrites() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let mut recipes = RecipeStore::default();
    recipes.insert(
        "pancakes",
        Recipe {
            ingredients: vec![line("flour", "100", "g")],
            instructions: vec!["fry".to_string()],
            servings: 1.0,
        },
    );
    recipes.save(&store).unwrap();

    let mut recipes = RecipeStore::load(&store).unwrap();
    let mut draft = RecipeDraft::new();
    match draft.propose_name("pancakes", &recipes.names()) {
        NameOutcome::Duplicates(matches) => assert_eq!(matches, vec!["pancakes".to_string()]),
        other => panic!("expected duplicates, got {:?}", other),
    }
    assert!(draft.force_continue());

    draft.add_ingredient(line("flour", "200", "g"));
    draft.finish_ingredients();
    draft.add_instruction("fry thicker".to_string());
    draft.save(&mut recipes).unwrap();
    recipes.save(&store).unwrap();

    let reloaded = RecipeStore::load(&store).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get("pancakes").unwrap().ingredients[0].quantity, "200");
}
