use std::str::FromStr;

use askama::Template;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Response};
use diesel::prelude::*;
use serde::Deserialize;

use crate::error::PageError;
use crate::flash::Flash;
use crate::models::{NewRecipe, User};
use crate::schema::{recipes, users};
use crate::AppState;

/// Raw form fields as submitted. Everything arrives as text; coercion and
/// validation happen in [`validate`].
#[derive(Debug, Default, Deserialize)]
pub struct RecipeForm {
    pub name: Option<String>,
    pub instructions: Option<String>,
    pub prep_time: Option<String>,
    pub cost_estimate: Option<String>,
    pub author_id: Option<String>,
}

/// A recipe that passed validation and is ready to persist.
#[derive(Debug)]
pub(crate) struct ValidatedRecipe {
    pub name: String,
    pub instructions: String,
    pub prep_time_minutes: Option<i32>,
    pub cost_estimate: Option<f64>,
    pub author_id: i32,
}

#[derive(Template)]
#[template(path = "add_recipe.html")]
struct AddRecipePage {
    error: String,
    users: Vec<User>,
}

pub async fn show_form(State(state): State<AppState>) -> Result<Response, PageError> {
    let mut conn = state.pool.get()?;
    let users = load_users(&mut conn)?;

    let page = AddRecipePage {
        error: String::new(),
        users,
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<RecipeForm>,
) -> Result<Response, PageError> {
    let mut conn = state.pool.get()?;

    let recipe = match validate(&form, state.config.actor_id) {
        Ok(recipe) => recipe,
        Err(message) => {
            // Nothing is persisted; the form comes back with the user list
            // reloaded and the problem called out.
            let users = load_users(&mut conn)?;
            let page = AddRecipePage {
                error: message.to_string(),
                users,
            };
            return Ok(Html(page.render()?).into_response());
        }
    };

    let recipe_id = insert_recipe(&mut conn, &recipe)?;

    Ok(Flash::success("Recipe added successfully!")
        .redirect_to(&format!("/recipe/{recipe_id}"))
        .into_response())
}

/// Checks the required fields and coerces the optional ones. Unparseable
/// optional values count as absent, matching the form's lenient contract;
/// a missing author falls back to the configured actor.
fn validate(form: &RecipeForm, fallback_author: i32) -> Result<ValidatedRecipe, &'static str> {
    let name = form.name.as_deref().unwrap_or("").trim();
    let instructions = form.instructions.as_deref().unwrap_or("").trim();

    if name.is_empty() || instructions.is_empty() {
        return Err("Name and instructions are required");
    }

    Ok(ValidatedRecipe {
        name: name.to_string(),
        instructions: instructions.to_string(),
        prep_time_minutes: parse_field(&form.prep_time),
        cost_estimate: parse_field(&form.cost_estimate),
        author_id: parse_field(&form.author_id).unwrap_or(fallback_author),
    })
}

fn parse_field<T: FromStr>(input: &Option<String>) -> Option<T> {
    input.as_deref().and_then(|s| s.trim().parse().ok())
}

/// Inserts the recipe and returns the store-assigned id.
pub(crate) fn insert_recipe(
    conn: &mut SqliteConnection,
    recipe: &ValidatedRecipe,
) -> QueryResult<i32> {
    diesel::insert_into(recipes::table)
        .values(&NewRecipe {
            name: &recipe.name,
            instructions: &recipe.instructions,
            prep_time_minutes: recipe.prep_time_minutes,
            cost_estimate: recipe.cost_estimate,
            author_id: recipe.author_id,
        })
        .returning(recipes::recipe_id)
        .get_result(conn)
}

fn load_users(conn: &mut SqliteConnection) -> QueryResult<Vec<User>> {
    users::table
        .order(users::name.asc())
        .select(User::as_select())
        .load(conn)
}
