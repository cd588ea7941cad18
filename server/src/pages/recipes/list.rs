use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use diesel::prelude::*;
use serde::Deserialize;

use crate::error::PageError;
use crate::flash::FlashParams;
use crate::models::Recipe;
use crate::schema::{dietary_tags, images, recipes};
use crate::AppState;

/// The listing shows a fixed rating and review count for every recipe;
/// aggregation over the reviews table is not implemented.
const LISTING_RATING: f64 = 4.5;
const LISTING_REVIEW_COUNT: i64 = 0;

/// One recipe in a listing, joined to at most one image.
#[derive(Debug)]
pub(crate) struct RecipeSummary {
    pub recipe_id: i32,
    pub name: String,
    pub instructions: String,
    pub prep_time_minutes: Option<i32>,
    pub cost_estimate: Option<f64>,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub avg_rating: f64,
    pub review_count: i64,
    pub tags: String,
}

/// Template-ready card for one listing entry. Optional fields are rendered
/// to display strings here so the templates stay declarative.
struct RecipeCard {
    recipe_id: i32,
    name: String,
    blurb: String,
    prep: String,
    cost: String,
    image_url: String,
    image_alt: String,
    rating: String,
    review_count: i64,
    tags: String,
}

impl From<RecipeSummary> for RecipeCard {
    fn from(summary: RecipeSummary) -> Self {
        RecipeCard {
            recipe_id: summary.recipe_id,
            name: summary.name,
            blurb: blurb(&summary.instructions),
            prep: summary
                .prep_time_minutes
                .map(|m| format!("{m} min"))
                .unwrap_or_default(),
            cost: summary
                .cost_estimate
                .map(|c| format!("${c:.2}"))
                .unwrap_or_default(),
            image_url: summary.image_url.unwrap_or_default(),
            image_alt: summary.image_alt.unwrap_or_default(),
            rating: format!("{:.1}", summary.avg_rating),
            review_count: summary.review_count,
            tags: summary.tags,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    flash_message: String,
    flash_kind: String,
    recipes: Vec<RecipeCard>,
}

#[derive(Template)]
#[template(path = "filter_recipes.html")]
struct BrowsePage {
    recipes: Vec<RecipeCard>,
    search: String,
    selected_tag: String,
    all_tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    pub search: Option<String>,
    pub tag: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<FlashParams>,
) -> Result<Response, PageError> {
    let mut conn = state.pool.get()?;

    let recipes = load_summaries(&mut conn, "")?;

    let (flash_message, flash_kind) = params.into_fields();
    let page = IndexPage {
        flash_message,
        flash_kind,
        recipes: recipes.into_iter().map(RecipeCard::from).collect(),
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Response, PageError> {
    let mut conn = state.pool.get()?;

    let search = params.search.unwrap_or_default();
    let recipes = load_summaries(&mut conn, &search)?;
    let all_tags = load_tag_names(&mut conn)?;

    // The tag selection is carried back into the selector but is not applied
    // to the query.
    let page = BrowsePage {
        recipes: recipes.into_iter().map(RecipeCard::from).collect(),
        search,
        selected_tag: params.tag.unwrap_or_default(),
        all_tags,
    };
    Ok(Html(page.render()?).into_response())
}

/// Loads all recipes ordered by name, each with at most one image. A
/// non-empty `search` restricts the result to recipes whose name or
/// instructions contain the term as a case-insensitive substring.
pub(crate) fn load_summaries(
    conn: &mut SqliteConnection,
    search: &str,
) -> QueryResult<Vec<RecipeSummary>> {
    let mut query = recipes::table.left_join(images::table).into_boxed();

    if !search.is_empty() {
        let pattern = like_pattern(search);
        query = query.filter(
            recipes::name
                .like(pattern.clone())
                .escape('\\')
                .or(recipes::instructions.like(pattern).escape('\\')),
        );
    }

    let rows: Vec<(Recipe, Option<String>, Option<String>)> = query
        .order((
            recipes::name.asc(),
            recipes::recipe_id.asc(),
            images::image_id.asc(),
        ))
        .select((
            Recipe::as_select(),
            images::file_path.nullable(),
            images::alt_text.nullable(),
        ))
        .load(conn)?;

    // The join yields one row per image; a recipe keeps its lowest-id image
    // and the extra rows are dropped.
    let mut summaries: Vec<RecipeSummary> = Vec::with_capacity(rows.len());
    for (recipe, image_url, image_alt) in rows {
        if summaries
            .last()
            .is_some_and(|s| s.recipe_id == recipe.recipe_id)
        {
            continue;
        }
        summaries.push(RecipeSummary {
            recipe_id: recipe.recipe_id,
            name: recipe.name,
            instructions: recipe.instructions,
            prep_time_minutes: recipe.prep_time_minutes,
            cost_estimate: recipe.cost_estimate,
            image_url,
            image_alt,
            avg_rating: LISTING_RATING,
            review_count: LISTING_REVIEW_COUNT,
            tags: String::new(),
        });
    }

    Ok(summaries)
}

/// Distinct dietary tag names for the filter selector, ordered by name.
pub(crate) fn load_tag_names(conn: &mut SqliteConnection) -> QueryResult<Vec<String>> {
    dietary_tags::table
        .select(dietary_tags::tag_name)
        .distinct()
        .order(dietary_tags::tag_name.asc())
        .load(conn)
}

/// Wildcard-wrap a user search term, escaping LIKE metacharacters so the
/// term only ever matches as a literal substring.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// First sentence-or-so of the instructions, for listing cards.
fn blurb(instructions: &str) -> String {
    const MAX: usize = 160;
    let first_line = instructions.lines().next().unwrap_or("");
    if first_line.chars().count() <= MAX {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(MAX).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_conn;
    use crate::pages::recipes::create::{insert_recipe, ValidatedRecipe};

    fn seed_recipe(conn: &mut SqliteConnection, name: &str, instructions: &str) -> i32 {
        insert_recipe(
            conn,
            &ValidatedRecipe {
                name: name.to_string(),
                instructions: instructions.to_string(),
                prep_time_minutes: None,
                cost_estimate: None,
                author_id: 1,
            },
        )
        .expect("insert failed")
    }

    fn seed_image(conn: &mut SqliteConnection, recipe_id: i32, path: &str) {
        diesel::insert_into(images::table)
            .values((
                images::recipe_id.eq(recipe_id),
                images::file_path.eq(path),
                images::alt_text.eq("photo"),
            ))
            .execute(conn)
            .expect("image insert failed");
    }

    #[test]
    fn listing_is_ordered_by_name_regardless_of_insertion_order() {
        let mut conn = test_conn();
        seed_recipe(&mut conn, "Waffles", "Mix and cook.");
        seed_recipe(&mut conn, "Apple Pie", "Bake it.");
        seed_recipe(&mut conn, "Miso Soup", "Simmer gently.");

        let names: Vec<String> = load_summaries(&mut conn, "")
            .expect("load failed")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Apple Pie", "Miso Soup", "Waffles"]);
    }

    #[test]
    fn search_matches_name_or_instructions_case_insensitively() {
        let mut conn = test_conn();
        seed_recipe(&mut conn, "Roasted Chicken", "Roast at 200C until done.");
        seed_recipe(&mut conn, "Fried Rice", "Add leftover CHICKEN and soy sauce.");
        seed_recipe(&mut conn, "Banana Bread", "Mash bananas, bake.");

        let names: Vec<String> = load_summaries(&mut conn, "chicken")
            .expect("load failed")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Fried Rice", "Roasted Chicken"]);
    }

    #[test]
    fn empty_search_returns_everything() {
        let mut conn = test_conn();
        seed_recipe(&mut conn, "Roasted Chicken", "Roast it.");
        seed_recipe(&mut conn, "Banana Bread", "Bake it.");

        let summaries = load_summaries(&mut conn, "").expect("load failed");
        assert_eq!(summaries.len(), 2);
    }

    #[test]
    fn a_recipe_keeps_its_lowest_id_image() {
        let mut conn = test_conn();
        let id = seed_recipe(&mut conn, "Tacos", "Assemble.");
        seed_image(&mut conn, id, "/images/tacos-1.png");
        seed_image(&mut conn, id, "/images/tacos-2.png");

        let summaries = load_summaries(&mut conn, "").expect("load failed");
        assert_eq!(summaries.len(), 1);
        assert_eq!(
            summaries[0].image_url.as_deref(),
            Some("/images/tacos-1.png")
        );
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("chicken"), "%chicken%");
        assert_eq!(like_pattern("50%_\\"), "%50\\%\\_\\\\%");
    }

    #[test]
    fn blurb_truncates_long_first_lines() {
        let short = blurb("Mix and cook.");
        assert_eq!(short, "Mix and cook.");

        let long = blurb(&"stir ".repeat(100));
        assert!(long.chars().count() <= 161);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn seeded_tags_populate_the_selector() {
        let mut conn = test_conn();
        let tags = load_tag_names(&mut conn).expect("load failed");
        assert!(tags.contains(&"vegetarian".to_string()));
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }
}
