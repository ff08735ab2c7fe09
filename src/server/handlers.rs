use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::authoring;
use crate::ingredient_catalog::IngredientCatalog;
use crate::meal_plan::{DayPlan, MealPlan, MealSlot, PlanEntry};
use crate::name_resolver::{self, Resolution, RECIPE_LOOKUP};
use crate::recipe_store::{normalize_name, IngredientLine, Recipe, RecipeStore};
use crate::settings::Settings;
use crate::shopping_list::{self, ShoppingList};
use crate::store::StoreError;

use super::AppState;

/// Error type for API handlers, rendered as a JSON `{error}` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// ---- recipes ----

/// GET /api/recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<RecipeStore>, ApiError> {
    Ok(Json(RecipeStore::load(&state.store)?))
}

/// GET /api/recipes/:name
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipes = RecipeStore::load(&state.store)?;
    recipes
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no recipe named '{}'", normalize_name(&name))))
}

#[derive(Debug, Deserialize)]
pub struct RecipeBody {
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub servings: Option<f64>,
}

/// PUT /api/recipes/:name
///
/// Creates or replaces the whole record, applying the same gates as the
/// authoring flow: valid name, at least one ingredient line, at least one
/// instruction step.
pub async fn put_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<RecipeBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let name = normalize_name(&name);
    if !authoring::is_valid_name(&name) {
        return Err(ApiError::BadRequest(
            "recipe names use letters and spaces only".to_string(),
        ));
    }
    if body.ingredients.is_empty() {
        return Err(ApiError::BadRequest(
            "a recipe needs at least one ingredient".to_string(),
        ));
    }
    if body.instructions.is_empty() {
        return Err(ApiError::BadRequest(
            "a recipe needs at least one instruction step".to_string(),
        ));
    }

    let mut recipes = RecipeStore::load(&state.store)?;
    let saved = recipes.insert(
        &name,
        Recipe {
            ingredients: body.ingredients,
            instructions: body.instructions,
            servings: body.servings.unwrap_or(1.0),
        },
    );
    recipes.save(&state.store)?;
    Ok(Json(json!({ "saved": saved })))
}

/// DELETE /api/recipes/:name
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut recipes = RecipeStore::load(&state.store)?;
    if recipes.remove(&name).is_none() {
        return Err(ApiError::NotFound(format!(
            "no recipe named '{}'",
            normalize_name(&name)
        )));
    }
    recipes.save(&state.store)?;
    Ok(Json(json!({ "deleted": normalize_name(&name) })))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub exact: Option<String>,
    pub candidates: Vec<CandidateView>,
}

/// GET /api/recipes/search?q=
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let recipes = RecipeStore::load(&state.store)?;
    let names = recipes.names();

    let response = match name_resolver::resolve_default(&params.q, &names, RECIPE_LOOKUP) {
        Resolution::Exact(name) => SearchResponse {
            exact: Some(name),
            candidates: Vec::new(),
        },
        Resolution::Candidates(candidates) => SearchResponse {
            exact: None,
            candidates: candidates
                .into_iter()
                .map(|c| CandidateView {
                    name: c.name,
                    score: c.score,
                })
                .collect(),
        },
        Resolution::NoMatch => SearchResponse {
            exact: None,
            candidates: Vec::new(),
        },
    };
    Ok(Json(response))
}

// ---- ingredients ----

/// GET /api/ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<IngredientCatalog>, ApiError> {
    Ok(Json(IngredientCatalog::load(&state.store)?))
}

#[derive(Debug, Deserialize)]
pub struct NewIngredient {
    pub name: String,
}

/// POST /api/ingredients
pub async fn add_ingredient(
    State(state): State<AppState>,
    Json(body): Json<NewIngredient>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let name = body.name.trim().to_lowercase();
    if name.is_empty() {
        return Err(ApiError::BadRequest("ingredient name is empty".to_string()));
    }

    let mut catalog = IngredientCatalog::load(&state.store)?;
    let created = catalog.insert(&name);
    if created {
        catalog.save(&state.store)?;
    }
    Ok(Json(json!({ "name": name, "created": created })))
}

// ---- meal plan ----

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub slots: DayPlan,
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    pub start: NaiveDate,
    pub day_count: u32,
    pub days: Vec<DayView>,
}

/// GET /api/plan?start=YYYY-MM-DD&days=N
///
/// Defaults: start today, day count from settings.
pub async fn get_plan(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<PlanView>, ApiError> {
    let plan = MealPlan::load(&state.store)?;
    let settings = Settings::load(&state.store)?;
    let start = params.start.unwrap_or_else(|| Local::now().date_naive());
    let day_count = params.days.unwrap_or(settings.days_to_view);

    let mut days = Vec::new();
    for offset in 0..day_count {
        let Some(date) = start.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        let slots = plan.day(date).cloned().unwrap_or_default();
        days.push(DayView { date, slots });
    }

    Ok(Json(PlanView {
        start,
        day_count,
        days,
    }))
}

fn parse_date(text: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a YYYY-MM-DD date", text)))
}

fn parse_slot(text: &str) -> Result<MealSlot, ApiError> {
    MealSlot::parse(text)
        .ok_or_else(|| ApiError::BadRequest(format!("'{}' is not a meal slot", text)))
}

/// POST /api/plan/:date/:slot
///
/// Body: `{recipe, servings?}` (a bare recipe-name string is also
/// accepted, matching the legacy entry shape).
pub async fn add_plan_entry(
    State(state): State<AppState>,
    Path((date, slot)): Path<(String, String)>,
    Json(entry): Json<PlanEntry>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let date = parse_date(&date)?;
    let slot = parse_slot(&slot)?;
    let recipe = normalize_name(&entry.recipe);
    if recipe.is_empty() {
        return Err(ApiError::BadRequest("recipe name is empty".to_string()));
    }

    let mut plan = MealPlan::load(&state.store)?;
    plan.add_entry(
        date,
        slot,
        PlanEntry {
            recipe,
            servings: entry.servings,
        },
    );
    plan.save(&state.store)?;
    Ok(Json(json!({ "date": date, "slot": slot.as_str() })))
}

/// DELETE /api/plan/:date/:slot/:index
pub async fn remove_plan_entry(
    State(state): State<AppState>,
    Path((date, slot, index)): Path<(String, String, usize)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let date = parse_date(&date)?;
    let slot = parse_slot(&slot)?;

    let mut plan = MealPlan::load(&state.store)?;
    let removed = plan
        .remove_entry(date, slot, index)
        .ok_or_else(|| ApiError::NotFound(format!("no entry {} on {} {}", index, date, slot.as_str())))?;
    plan.save(&state.store)?;
    Ok(Json(json!({ "removed": removed.recipe })))
}

// ---- shopping list ----

/// GET /api/shopping-list?start=YYYY-MM-DD&days=N
pub async fn shopping_list(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<ShoppingList>, ApiError> {
    let plan = MealPlan::load(&state.store)?;
    let recipes = RecipeStore::load(&state.store)?;
    let settings = Settings::load(&state.store)?;

    let start = params.start.unwrap_or_else(|| Local::now().date_naive());
    let days = params.days.unwrap_or(settings.days_to_view);

    Ok(Json(shopping_list::aggregate(start, days, &plan, &recipes)))
}

// ---- settings ----

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(Settings::load(&state.store)?))
}

/// PUT /api/settings
pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let settings = settings.clamped();
    settings.save(&state.store)?;
    Ok(Json(settings))
}
