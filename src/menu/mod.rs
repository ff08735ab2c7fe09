//! Interactive text-menu front end.
//!
//! Single-threaded and synchronous: every screen blocks on line input, so
//! the user is the scheduler. Each action loads the JSON documents it
//! needs, mutates them in memory and writes them back before returning to
//! the prompt. Invalid input re-prompts without changing any state.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::{Days, Local, NaiveDate};

use crate::authoring::{self, DraftState, NameOutcome, RecipeDraft};
use crate::ingredient_catalog::IngredientCatalog;
use crate::meal_plan::{MealPlan, MealSlot, PlanEntry};
use crate::name_resolver::{self, Resolution, RECIPE_LOOKUP};
use crate::recipe_store::{IngredientLine, RecipeStore};
use crate::settings::{Settings, MAX_DAYS_TO_VIEW, MIN_DAYS_TO_VIEW};
use crate::shopping_list::{self, format_quantity};
use crate::store::JsonStore;

pub mod pagination;

use pagination::{paginate, PAGE_SIZE};

pub fn run(store: &JsonStore) -> Result<()> {
    loop {
        clear_screen();
        println!("Welcome to Meal Planner!");
        println!("What do you want to do?");
        println!("1 - Meal plan");
        println!("2 - Shopping list");
        println!("3 - Recipes");
        println!("4 - Settings");
        println!("q - Exit");

        match prompt("")?.to_lowercase().as_str() {
            "1" => meal_plan_screen(store)?,
            "2" => shopping_list_screen(store)?,
            "3" => recipes_screen(store)?,
            "4" => settings_screen(store)?,
            "q" => return Ok(()),
            _ => invalid_input()?,
        }
    }
}

// ---- meal plan ----

fn meal_plan_screen(store: &JsonStore) -> Result<()> {
    loop {
        clear_screen();
        let plan = MealPlan::load(store).context("failed to load meal plan")?;
        let settings = Settings::load(store).context("failed to load settings")?;
        let today = Local::now().date_naive();

        println!("Meal Plan (next {} days)", settings.days_to_view);
        println!("{}", "-".repeat(30));
        for offset in 0..settings.days_to_view {
            let Some(date) = today.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            println!("{}", date.format("%A, %Y-%m-%d"));
            for slot in MealSlot::ALL {
                let entries = plan.entries(date, slot);
                if entries.is_empty() {
                    continue;
                }
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|e| match e.servings {
                        Some(servings) => {
                            format!("{} (x{})", title_case(&e.recipe), format_quantity(servings))
                        }
                        None => title_case(&e.recipe),
                    })
                    .collect();
                println!("  {}: {}", title_case(slot.as_str()), rendered.join(", "));
            }
        }
        println!("{}", "-".repeat(30));
        println!("a - Add recipe to a day");
        println!("r - Remove an entry");
        println!("b - Back");

        match prompt("> ")?.to_lowercase().as_str() {
            "a" => add_plan_entry_screen(store)?,
            "r" => remove_plan_entry_screen(store)?,
            "b" => return Ok(()),
            _ => invalid_input()?,
        }
    }
}

fn add_plan_entry_screen(store: &JsonStore) -> Result<()> {
    let recipes = RecipeStore::load(store).context("failed to load recipes")?;
    if recipes.is_empty() {
        println!("No recipes available yet. Add a recipe first.");
        return pause();
    }

    let Some(date) = prompt_date()? else {
        return Ok(());
    };
    let Some(slot) = prompt_slot()? else {
        return Ok(());
    };
    let Some(name) = select_recipe(&recipes)? else {
        return Ok(());
    };

    let base = recipes
        .get(&name)
        .map(|r| r.base_servings())
        .unwrap_or(1.0);
    let servings_text = prompt(&format!("Servings (Enter for recipe default {}): ", base))?;
    let entry = if servings_text.is_empty() {
        PlanEntry::new(name)
    } else {
        match servings_text.parse::<f64>() {
            Ok(servings) if servings > 0.0 => PlanEntry::with_servings(name, servings),
            _ => {
                println!("Not a valid serving count; using the recipe default.");
                PlanEntry::new(name)
            }
        }
    };

    let mut plan = MealPlan::load(store).context("failed to load meal plan")?;
    plan.add_entry(date, slot, entry);
    plan.save(store).context("failed to save meal plan")?;
    println!("Added to {} {}.", date, slot.as_str());
    pause()
}

fn remove_plan_entry_screen(store: &JsonStore) -> Result<()> {
    let mut plan = MealPlan::load(store).context("failed to load meal plan")?;
    if plan.is_empty() {
        println!("The meal plan is empty.");
        return pause();
    }

    let Some(date) = prompt_date()? else {
        return Ok(());
    };
    let Some(slot) = prompt_slot()? else {
        return Ok(());
    };

    let entries = plan.entries(date, slot);
    if entries.is_empty() {
        println!("Nothing scheduled for {} {}.", date, slot.as_str());
        return pause();
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {}", i + 1, title_case(&entry.recipe));
    }

    let choice = prompt("Entry number to remove (or Enter to cancel): ")?;
    if choice.is_empty() {
        return Ok(());
    }
    match choice.parse::<usize>() {
        Ok(number) if number >= 1 => match plan.remove_entry(date, slot, number - 1) {
            Some(removed) => {
                plan.save(store).context("failed to save meal plan")?;
                println!("Removed {}.", title_case(&removed.recipe));
                pause()
            }
            None => invalid_input(),
        },
        _ => invalid_input(),
    }
}

/// Pick a recipe by exact name or fuzzy candidates, mirroring the search
/// behavior of the recipe screens.
fn select_recipe(recipes: &RecipeStore) -> Result<Option<String>> {
    let names = recipes.names();
    loop {
        let query = prompt("Recipe name (or 'b' to back): ")?;
        if query.eq_ignore_ascii_case("b") {
            return Ok(None);
        }
        match name_resolver::resolve_default(&query, &names, RECIPE_LOOKUP) {
            Resolution::Exact(name) => return Ok(Some(name)),
            Resolution::Candidates(candidates) => {
                println!("Did you mean:");
                for (i, candidate) in candidates.iter().enumerate() {
                    println!("{}. {}", i + 1, title_case(&candidate.name));
                }
                let choice = prompt("Select a number (or Enter to search again): ")?;
                if choice.is_empty() {
                    continue;
                }
                match choice.parse::<usize>() {
                    Ok(number) if number >= 1 && number <= candidates.len() => {
                        return Ok(Some(candidates[number - 1].name.clone()));
                    }
                    _ => invalid_input()?,
                }
            }
            Resolution::NoMatch => {
                println!("No matches found for '{}'.", query.trim());
            }
        }
    }
}

// ---- shopping list ----

fn shopping_list_screen(store: &JsonStore) -> Result<()> {
    clear_screen();
    println!("Shopping List");
    println!("{}", "-".repeat(30));

    let settings = Settings::load(store).context("failed to load settings")?;
    let days_text = prompt(&format!(
        "How many days from today? (Enter for {}): ",
        settings.days_to_view
    ))?;
    let days = if days_text.is_empty() {
        settings.days_to_view
    } else {
        match days_text.parse::<u32>() {
            Ok(days) if days >= 1 => days,
            _ => return invalid_input(),
        }
    };

    let plan = MealPlan::load(store).context("failed to load meal plan")?;
    let recipes = RecipeStore::load(store).context("failed to load recipes")?;
    let today = Local::now().date_naive();
    let list = shopping_list::aggregate(today, days, &plan, &recipes);

    clear_screen();
    println!("Shopping List (next {} days)", days);
    println!("{}", "-".repeat(30));
    if list.is_empty() {
        println!("No items needed for this period.");
    }
    for (item, units) in &list {
        let parts: Vec<String> = units
            .iter()
            .map(|(unit, quantity)| format!("{} {}", format_quantity(*quantity), unit))
            .collect();
        println!("{}: {}", title_case(item), parts.join(", "));
    }
    pause()
}

// ---- recipes ----

fn recipes_screen(store: &JsonStore) -> Result<()> {
    loop {
        clear_screen();
        println!("Recipes");
        println!("What do you want to do?");
        println!("1 - View recipes");
        println!("2 - Add new recipe");
        println!("b - Back");

        match prompt("")?.to_lowercase().as_str() {
            "1" => browse_recipes(store)?,
            "2" => add_recipe_flow(store)?,
            "b" => return Ok(()),
            _ => invalid_input()?,
        }
    }
}

fn browse_recipes(store: &JsonStore) -> Result<()> {
    let mut current_page = 1;

    loop {
        let recipes = RecipeStore::load(store).context("failed to load recipes")?;
        let names = recipes.names();
        let pagination = paginate(names.len(), current_page);
        current_page = pagination.page;
        let batch: Vec<&String> = names.iter().skip(pagination.offset).take(PAGE_SIZE).collect();

        clear_screen();
        println!(
            "All Recipes (Page {}/{})",
            pagination.page,
            pagination.total_pages.max(1)
        );
        println!("{}", "-".repeat(30));
        for (i, name) in batch.iter().enumerate() {
            println!("{}. {}", i + 1, title_case(name));
        }
        println!("{}", "-".repeat(30));
        println!("Options:");
        if pagination.page > 1 {
            println!("p - Previous page");
        }
        if pagination.page < pagination.total_pages {
            println!("n - Next page");
        }
        println!("s - Search by name");
        println!("h - Return to home");

        let choice = prompt("> ")?.to_lowercase();
        if choice == "n" && pagination.page < pagination.total_pages {
            current_page += 1;
        } else if choice == "p" && pagination.page > 1 {
            current_page -= 1;
        } else if choice == "s" {
            search_recipes(store)?;
        } else if choice == "h" {
            return Ok(());
        } else if let Ok(number) = choice.parse::<usize>() {
            if number >= 1 && number <= batch.len() {
                view_recipe(store, batch[number - 1])?;
            } else {
                invalid_input()?;
            }
        } else {
            invalid_input()?;
        }
    }
}

fn search_recipes(store: &JsonStore) -> Result<()> {
    let recipes = RecipeStore::load(store).context("failed to load recipes")?;
    let names = recipes.names();

    loop {
        clear_screen();
        println!("Search Recipe");
        println!("{}", "-".repeat(30));
        let query = prompt("Enter recipe name (or 'b' to back): ")?;
        if query.eq_ignore_ascii_case("b") {
            return Ok(());
        }

        let matches = match name_resolver::resolve_default(&query, &names, RECIPE_LOOKUP) {
            Resolution::Exact(name) => vec![name],
            Resolution::Candidates(candidates) => {
                candidates.into_iter().map(|c| c.name).collect()
            }
            Resolution::NoMatch => {
                println!("No matches found for '{}'.", query.trim());
                prompt("Press Enter to search again...")?;
                continue;
            }
        };

        clear_screen();
        println!("Matches for '{}':", query.trim());
        println!("{}", "-".repeat(30));
        for (i, name) in matches.iter().enumerate() {
            println!("{}. {}", i + 1, title_case(name));
        }
        println!("{}", "-".repeat(30));
        println!("Select a number to view, or 's' to search again.");

        let choice = prompt("> ")?.to_lowercase();
        if choice == "s" {
            continue;
        } else if choice == "b" {
            return Ok(());
        } else if let Ok(number) = choice.parse::<usize>() {
            if number >= 1 && number <= matches.len() {
                view_recipe(store, &matches[number - 1])?;
            } else {
                invalid_input()?;
            }
        } else {
            invalid_input()?;
        }
    }
}

fn view_recipe(store: &JsonStore, name: &str) -> Result<()> {
    loop {
        clear_screen();
        let recipes = RecipeStore::load(store).context("failed to load recipes")?;
        let Some(recipe) = recipes.get(name) else {
            // Deleted from another screen; nothing to show.
            return Ok(());
        };

        println!("--- {} ---", title_case(name));
        if recipe.servings != 1.0 {
            println!("Servings: {}", format_quantity(recipe.servings));
        }
        println!("\nIngredients");
        for line in &recipe.ingredients {
            println!("> {} {} {}", line.quantity, line.unit, line.item);
        }
        println!("\nInstructions");
        for (i, step) in recipe.instructions.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }

        println!("\nWhat do you want to do?");
        println!("1 - Return");
        println!("2 - Add this recipe to calendar");
        println!("3 - Delete this recipe");

        match prompt("> ")?.as_str() {
            "1" => return Ok(()),
            "2" => {
                add_recipe_to_calendar(store, name)?;
            }
            "3" => {
                if prompt(&format!("Delete '{}'? (y/n): ", name))?.to_lowercase() == "y" {
                    let mut recipes =
                        RecipeStore::load(store).context("failed to load recipes")?;
                    recipes.remove(name);
                    recipes.save(store).context("failed to save recipes")?;
                    println!("Recipe deleted.");
                    pause()?;
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn add_recipe_to_calendar(store: &JsonStore, name: &str) -> Result<()> {
    let Some(date) = prompt_date()? else {
        return Ok(());
    };
    let Some(slot) = prompt_slot()? else {
        return Ok(());
    };

    let mut plan = MealPlan::load(store).context("failed to load meal plan")?;
    plan.add_entry(date, slot, PlanEntry::new(name));
    plan.save(store).context("failed to save meal plan")?;
    println!("Added to {} {}.", date, slot.as_str());
    pause()
}

// ---- recipe authoring ----

fn add_recipe_flow(store: &JsonStore) -> Result<()> {
    let mut recipes = RecipeStore::load(store).context("failed to load recipes")?;
    let mut catalog = IngredientCatalog::load(store).context("failed to load ingredients")?;
    let mut draft = RecipeDraft::new();

    // NAMING
    loop {
        let raw = prompt("Add recipe name (or 'b' to back): ")?;
        clear_screen();
        if raw.eq_ignore_ascii_case("b") {
            return Ok(());
        }

        match draft.propose_name(&raw, &recipes.names()) {
            NameOutcome::Invalid => {
                println!("Invalid input. Please use letters and spaces only.\n");
            }
            NameOutcome::Accepted => break,
            NameOutcome::Duplicates(matches) => {
                println!("Existing recipes found.");
                for (i, name) in matches.iter().enumerate() {
                    println!("{} - {}", i + 1, name);
                }
                println!("c - Create new recipe.");
                println!("b - Back");

                let choice = prompt("\nSelect an option: ")?.to_lowercase();
                clear_screen();
                if choice == "b" {
                    return Ok(());
                } else if choice == "c" {
                    draft.force_continue();
                    break;
                } else if let Ok(number) = choice.parse::<usize>() {
                    if number >= 1 && number <= matches.len() {
                        return view_recipe(store, &matches[number - 1]);
                    }
                    invalid_input()?;
                } else {
                    invalid_input()?;
                }
            }
        }
    }

    // EDITING_INGREDIENTS / EDITING_INSTRUCTIONS
    while matches!(
        draft.state(),
        DraftState::EditingIngredients | DraftState::EditingInstructions
    ) {
        match draft.state() {
            DraftState::EditingIngredients => {
                edit_draft_ingredients(store, &mut draft, &mut catalog)?;
            }
            DraftState::EditingInstructions => {
                edit_draft_instructions(store, &mut draft, &mut recipes)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn edit_draft_ingredients(
    store: &JsonStore,
    draft: &mut RecipeDraft,
    catalog: &mut IngredientCatalog,
) -> Result<()> {
    loop {
        clear_screen();
        println!("--- Creating: {} (Ingredients) ---", title_case(draft.name()));
        println!("\nCurrent Ingredients:");
        if draft.ingredients().is_empty() {
            println!(" (None)");
        } else {
            for line in draft.ingredients() {
                println!(" - {}: {} {}", line.item, line.quantity, line.unit);
            }
        }

        println!("\nCommands:");
        println!("- Type an ingredient name to search/add");
        if !draft.ingredients().is_empty() {
            println!("- Type 'edit' to modify/delete ingredients");
            println!("- Type 'next' or 'done' to proceed to instructions");
        }
        println!("- Type 'back' or 'quit' to discard changes");

        let user_input = prompt("\n> ")?.to_lowercase();
        if user_input.is_empty() {
            continue;
        }

        match user_input.as_str() {
            "quit" | "q" | "back" | "b" => {
                if prompt("Discard recipe? (y/n): ")?.to_lowercase() == "y" {
                    draft.discard();
                    return Ok(());
                }
            }
            "next" | "n" | "done" => {
                if draft.finish_ingredients() {
                    return Ok(());
                }
                println!("Add at least one ingredient first.");
                pause()?;
            }
            "edit" if !draft.ingredients().is_empty() => {
                edit_ingredient_lines(draft)?;
            }
            _ => {
                let Some(item) = select_or_create_ingredient(store, &user_input, catalog)? else {
                    continue;
                };
                println!("\nSelected: {}", title_case(&item));
                let unit = prompt("Unit (g, tbsp, tsp, ml, pcs): ")?;
                let quantity = prompt("Quantity: ")?;
                draft.add_ingredient(IngredientLine {
                    item,
                    quantity,
                    unit,
                });
            }
        }
    }
}

fn edit_ingredient_lines(draft: &mut RecipeDraft) -> Result<()> {
    loop {
        clear_screen();
        println!("--- Edit Ingredients ---");
        for (i, line) in draft.ingredients().iter().enumerate() {
            println!("{}. {}: {} {}", i + 1, line.item, line.quantity, line.unit);
        }
        println!("\nEnter number to edit/delete (or Enter to go back):");

        let selection = prompt("> ")?;
        if selection.is_empty() {
            return Ok(());
        }
        let Ok(number) = selection.parse::<usize>() else {
            continue;
        };
        if number < 1 || number > draft.ingredients().len() {
            println!("Invalid number.");
            pause()?;
            continue;
        }
        let index = number - 1;
        let line = draft.ingredients()[index].clone();
        println!("\nSelected: {}", line.item);

        match prompt("(e)dit or (d)elete? ")?.to_lowercase().as_str() {
            "d" => {
                draft.remove_ingredient(index);
                return Ok(());
            }
            "e" => {
                let mut unit = prompt(&format!("Unit ({}): ", line.unit))?;
                if unit.is_empty() {
                    unit = line.unit.clone();
                }
                let mut quantity = prompt(&format!("Quantity ({}): ", line.quantity))?;
                if quantity.is_empty() {
                    quantity = line.quantity.clone();
                }
                draft.update_ingredient(index, quantity, unit);
                return Ok(());
            }
            _ => {}
        }
    }
}

fn edit_draft_instructions(
    store: &JsonStore,
    draft: &mut RecipeDraft,
    recipes: &mut RecipeStore,
) -> Result<()> {
    loop {
        clear_screen();
        println!(
            "--- Creating: {} (Instructions) ---",
            title_case(draft.name())
        );

        if draft.instructions().is_empty() {
            println!("\n(No instructions yet)");
        } else {
            println!("\nCurrent Instructions:");
            for (i, step) in draft.instructions().iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
        }

        println!("\nCommands:");
        println!("- Type an instruction step to add it immediately");
        if !draft.instructions().is_empty() {
            println!("- Type 'edit' to modify/delete steps");
            println!("- Type 'save' or 'done' to finish recipe");
        }
        println!("- Type 'ingredients' to go back to the ingredient list");
        println!("- Type 'quit' to discard changes");

        let user_input = prompt("\n> ")?;
        if user_input.is_empty() {
            continue;
        }

        match user_input.to_lowercase().as_str() {
            "quit" | "q" => {
                if prompt("Discard recipe? (y/n): ")?.to_lowercase() == "y" {
                    draft.discard();
                    return Ok(());
                }
            }
            "save" | "done" | "s" if !draft.instructions().is_empty() => {
                let servings_text =
                    prompt("Servings this recipe makes (Enter for 1): ")?;
                if let Ok(servings) = servings_text.parse::<f64>() {
                    draft.set_servings(servings);
                }
                if let Some(name) = draft.save(recipes) {
                    recipes.save(store).context("failed to save recipes")?;
                    println!("\nRecipe '{}' saved successfully!", name);
                    prompt("Press Enter to continue...")?;
                }
                return Ok(());
            }
            "ingredients" => {
                draft.reopen_ingredients();
                return Ok(());
            }
            "edit" if !draft.instructions().is_empty() => {
                edit_instruction_steps(draft)?;
            }
            _ => {
                draft.add_instruction(user_input);
            }
        }
    }
}

fn edit_instruction_steps(draft: &mut RecipeDraft) -> Result<()> {
    loop {
        clear_screen();
        println!("--- Edit Instructions ---");
        for (i, step) in draft.instructions().iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
        println!("\nEnter number to edit/delete (or Enter to go back):");

        let selection = prompt("> ")?;
        if selection.is_empty() {
            return Ok(());
        }
        let Ok(number) = selection.parse::<usize>() else {
            continue;
        };
        if number < 1 || number > draft.instructions().len() {
            println!("Invalid number.");
            pause()?;
            continue;
        }
        let index = number - 1;
        println!("\nSelected: {}", draft.instructions()[index]);

        match prompt("(e)dit or (d)elete? ")?.to_lowercase().as_str() {
            "d" => {
                draft.remove_instruction(index);
                return Ok(());
            }
            "e" => {
                let text = prompt("New text: ")?;
                if !text.is_empty() {
                    draft.update_instruction(index, text);
                }
                return Ok(());
            }
            _ => {}
        }
    }
}

/// Resolve a typed ingredient name against the catalog: exact hit, fuzzy
/// candidates to pick from, or the option to create a new catalog entry.
fn select_or_create_ingredient(
    store: &JsonStore,
    query: &str,
    catalog: &mut IngredientCatalog,
) -> Result<Option<String>> {
    match authoring::lookup_ingredient(query, catalog) {
        Resolution::Exact(name) => Ok(Some(name)),
        Resolution::Candidates(candidates) => {
            println!("\n'{}' not found. Did you mean:", query);
            for (i, candidate) in candidates.iter().enumerate() {
                println!("{}. {}", i + 1, candidate.name);
            }
            println!("c - Create new ingredient");
            println!("s - Search again");

            loop {
                let choice = prompt("Select: ")?.to_lowercase();
                if let Ok(number) = choice.parse::<usize>() {
                    if number >= 1 && number <= candidates.len() {
                        return Ok(Some(candidates[number - 1].name.clone()));
                    }
                    println!("Invalid number.");
                } else if choice == "c" {
                    return create_new_ingredient(store, catalog);
                } else if choice == "s" {
                    return Ok(None);
                } else {
                    println!("Invalid choice. Enter a number, 'c', or 's'.");
                }
            }
        }
        Resolution::NoMatch => {
            println!("\nNo matches for '{}'.", query);
            println!("c. Create new ingredient");
            println!("s. Search again");

            loop {
                match prompt("Select: ")?.to_lowercase().as_str() {
                    "c" => return create_new_ingredient(store, catalog),
                    "s" => return Ok(None),
                    _ => println!("Invalid choice. Enter 'c' or 's'."),
                }
            }
        }
    }
}

/// Create a catalog ingredient. The catalog write happens immediately and
/// is independent of whether the surrounding recipe draft gets saved.
fn create_new_ingredient(
    store: &JsonStore,
    catalog: &mut IngredientCatalog,
) -> Result<Option<String>> {
    loop {
        clear_screen();
        println!("--- Create New Ingredient ---");
        let name = prompt("Enter ingredient name (or 'b' to back): ")?.to_lowercase();

        if name.is_empty() {
            continue;
        }
        if name == "b" {
            return Ok(None);
        }
        if catalog.contains(&name) {
            println!("'{}' already exists!", name);
            prompt("Press Enter...")?;
            return Ok(Some(name));
        }

        if prompt(&format!("Save '{}' to database? (y/n): ", name))?.to_lowercase() == "y" {
            catalog.insert(&name);
            catalog.save(store).context("failed to save ingredients")?;
            println!("Ingredient saved.");
            return Ok(Some(name));
        }

        if prompt("Try again? (y/n): ")?.to_lowercase() != "y" {
            return Ok(None);
        }
    }
}

// ---- settings ----

fn settings_screen(store: &JsonStore) -> Result<()> {
    loop {
        clear_screen();
        let settings = Settings::load(store).context("failed to load settings")?;
        println!("Settings");
        println!("{}", "-".repeat(30));
        println!("Days to view in meal plan: {}", settings.days_to_view);
        println!(
            "\nEnter a new value ({}-{}), or 'b' to back.",
            MIN_DAYS_TO_VIEW, MAX_DAYS_TO_VIEW
        );

        let choice = prompt("> ")?.to_lowercase();
        if choice == "b" {
            return Ok(());
        }
        match choice.parse::<u32>() {
            Ok(days) if (MIN_DAYS_TO_VIEW..=MAX_DAYS_TO_VIEW).contains(&days) => {
                Settings { days_to_view: days }
                    .save(store)
                    .context("failed to save settings")?;
                println!("Settings saved.");
                pause()?;
            }
            _ => invalid_input()?,
        }
    }
}

// ---- shared prompt helpers ----

fn prompt_date() -> Result<Option<NaiveDate>> {
    loop {
        let text = prompt("Date (YYYY-MM-DD, Enter for today, 'b' to back): ")?;
        if text.eq_ignore_ascii_case("b") {
            return Ok(None);
        }
        if text.is_empty() {
            return Ok(Some(Local::now().date_naive()));
        }
        match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            Ok(date) => return Ok(Some(date)),
            Err(_) => println!("Please enter a date like 2024-01-31."),
        }
    }
}

fn prompt_slot() -> Result<Option<MealSlot>> {
    loop {
        let text = prompt("Meal (breakfast/lunch/dinner/snack, 'b' to back): ")?;
        if text.eq_ignore_ascii_case("b") {
            return Ok(None);
        }
        match MealSlot::parse(&text) {
            Some(slot) => return Ok(Some(slot)),
            None => println!("Please enter one of: breakfast, lunch, dinner, snack."),
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut buffer = String::new();
    let bytes_read = io::stdin().lock().read_line(&mut buffer)?;
    if bytes_read == 0 {
        bail!("input stream closed");
    }
    Ok(buffer.trim().to_string())
}

fn pause() -> Result<()> {
    prompt("Press Enter to continue...")?;
    Ok(())
}

fn invalid_input() -> Result<()> {
    println!("Please enter a valid choice.");
    pause()
}

fn clear_screen() {
    print!("\x1B[2J\x1B[H");
    let _ = io::stdout().flush();
}

/// Uppercase the first letter of each whitespace-separated word, the way
/// the screens display stored lowercase names.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("overnight oats"), "Overnight Oats");
        assert_eq!(title_case("toast"), "Toast");
        assert_eq!(title_case(""), "");
    }
}
