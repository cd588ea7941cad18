use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use diesel::prelude::*;

use crate::error::PageError;
use crate::flash::{Flash, FlashParams};
use crate::models::{Recipe, Review};
use crate::schema::{images, ingredients, recipe_ingredients, recipes, reviews, users};
use crate::AppState;

struct ImageItem {
    file_path: String,
    alt_text: String,
}

struct IngredientItem {
    name: String,
    quantity: String,
}

struct ReviewItem {
    reviewer: String,
    rating: i32,
    comment: String,
    posted_at: String,
}

#[derive(Template)]
#[template(path = "recipe_detail.html")]
struct DetailPage {
    flash_message: String,
    flash_kind: String,
    recipe_id: i32,
    name: String,
    instructions: String,
    author: String,
    prep: String,
    cost: String,
    created_at: String,
    images: Vec<ImageItem>,
    ingredients: Vec<IngredientItem>,
    reviews: Vec<ReviewItem>,
}

pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Query(params): Query<FlashParams>,
) -> Result<Response, PageError> {
    let mut conn = state.pool.get()?;

    let Some((recipe, author)) = find_recipe(&mut conn, recipe_id)? else {
        return Ok(Flash::error("Recipe not found")
            .redirect_to("/")
            .into_response());
    };

    let images = load_images(&mut conn, recipe_id)?;
    let reviews = load_reviews(&mut conn, recipe_id)?;
    let ingredients = load_ingredients(&mut conn, recipe_id)?;

    let (flash_message, flash_kind) = params.into_fields();
    let page = DetailPage {
        flash_message,
        flash_kind,
        recipe_id: recipe.recipe_id,
        name: recipe.name,
        instructions: recipe.instructions,
        author: author.unwrap_or_default(),
        prep: recipe
            .prep_time_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_default(),
        cost: recipe
            .cost_estimate
            .map(|c| format!("${c:.2}"))
            .unwrap_or_default(),
        created_at: recipe.created_at.format("%Y-%m-%d").to_string(),
        images: images
            .into_iter()
            .map(|(file_path, alt_text)| ImageItem {
                file_path,
                alt_text,
            })
            .collect(),
        ingredients: ingredients
            .into_iter()
            .map(|(name, quantity)| IngredientItem { name, quantity })
            .collect(),
        reviews: reviews
            .into_iter()
            .map(|(review, reviewer)| ReviewItem {
                reviewer: reviewer.unwrap_or_else(|| "Unknown".to_string()),
                rating: review.rating,
                comment: review.comment,
                posted_at: review.created_at.format("%Y-%m-%d %H:%M").to_string(),
            })
            .collect(),
    };
    Ok(Html(page.render()?).into_response())
}

/// The recipe row joined to its author's name. The left join keeps the
/// recipe even when the author id points nowhere.
pub(crate) fn find_recipe(
    conn: &mut SqliteConnection,
    recipe_id: i32,
) -> QueryResult<Option<(Recipe, Option<String>)>> {
    recipes::table
        .left_join(users::table)
        .filter(recipes::recipe_id.eq(recipe_id))
        .select((Recipe::as_select(), users::name.nullable()))
        .first(conn)
        .optional()
}

fn load_images(conn: &mut SqliteConnection, recipe_id: i32) -> QueryResult<Vec<(String, String)>> {
    images::table
        .filter(images::recipe_id.eq(recipe_id))
        .order(images::image_id.asc())
        .select((images::file_path, images::alt_text))
        .load(conn)
}

/// Reviews joined to reviewer names, newest first. The review id breaks
/// ties between reviews created within the same second.
pub(crate) fn load_reviews(
    conn: &mut SqliteConnection,
    recipe_id: i32,
) -> QueryResult<Vec<(Review, Option<String>)>> {
    reviews::table
        .left_join(users::table)
        .filter(reviews::recipe_id.eq(recipe_id))
        .order((reviews::created_at.desc(), reviews::review_id.desc()))
        .select((Review::as_select(), users::name.nullable()))
        .load(conn)
}

fn load_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i32,
) -> QueryResult<Vec<(String, String)>> {
    recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe_id))
        .select((ingredients::name, recipe_ingredients::quantity))
        .load(conn)
}
