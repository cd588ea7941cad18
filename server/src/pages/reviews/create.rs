use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Response};
use diesel::prelude::*;
use serde::Deserialize;

use crate::error::PageError;
use crate::flash::Flash;
use crate::models::NewReview;
use crate::schema::reviews;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewForm {
    pub rating: Option<String>,
    pub comment: Option<String>,
}

pub async fn submit(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Form(form): Form<ReviewForm>,
) -> Result<Response, PageError> {
    let detail_path = format!("/recipe/{recipe_id}");

    let Some(rating) = parse_rating(form.rating.as_deref()) else {
        return Ok(Flash::error("Please provide a valid rating (1-5)")
            .redirect_to(&detail_path)
            .into_response());
    };

    let mut conn = state.pool.get()?;

    // The recipe id is not checked first; a review for an unknown id is
    // stored as submitted.
    insert_review(
        &mut conn,
        recipe_id,
        state.config.actor_id,
        rating,
        form.comment.as_deref().unwrap_or(""),
    )?;

    Ok(Flash::success("Review added successfully!")
        .redirect_to(&detail_path)
        .into_response())
}

/// A rating is an integer from 1 to 5; anything else is rejected.
fn parse_rating(input: Option<&str>) -> Option<i32> {
    let rating: i32 = input?.trim().parse().ok()?;
    (1..=5).contains(&rating).then_some(rating)
}

pub(crate) fn insert_review(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    user_id: i32,
    rating: i32,
    comment: &str,
) -> QueryResult<usize> {
    diesel::insert_into(reviews::table)
        .values(&NewReview {
            recipe_id,
            user_id,
            rating,
            comment,
        })
        .execute(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_state;
    use crate::pages::recipes::create::{insert_recipe, ValidatedRecipe};
    use crate::pages::recipes::get::load_reviews;
    use axum::http::{header, StatusCode};

    fn seed_recipe(state: &AppState) -> i32 {
        let mut conn = state.pool.get().expect("pool failed");
        insert_recipe(
            &mut conn,
            &ValidatedRecipe {
                name: "Lentil Soup".to_string(),
                instructions: "Simmer lentils with aromatics.".to_string(),
                prep_time_minutes: Some(40),
                cost_estimate: Some(3.0),
                author_id: 1,
            },
        )
        .expect("insert failed")
    }

    fn review_form(rating: &str, comment: &str) -> ReviewForm {
        ReviewForm {
            rating: Some(rating.to_string()),
            comment: Some(comment.to_string()),
        }
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        assert_eq!(parse_rating(Some("0")), None);
        assert_eq!(parse_rating(Some("6")), None);
        assert_eq!(parse_rating(Some("four")), None);
        assert_eq!(parse_rating(Some("")), None);
        assert_eq!(parse_rating(None), None);
        assert_eq!(parse_rating(Some("1")), Some(1));
        assert_eq!(parse_rating(Some(" 5 ")), Some(5));
    }

    #[tokio::test]
    async fn out_of_range_rating_never_creates_a_row() {
        let (state, _db) = test_state();
        let recipe_id = seed_recipe(&state);

        for bad in ["0", "6"] {
            let response = submit(
                State(state.clone()),
                Path(recipe_id),
                Form(review_form(bad, "nope")),
            )
            .await
            .expect("handler failed");

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .expect("no location header");
            assert!(location.starts_with(&format!("/recipe/{recipe_id}?")));
            assert!(location.contains("kind=error"));
        }

        let mut conn = state.pool.get().expect("pool failed");
        assert!(load_reviews(&mut conn, recipe_id)
            .expect("load failed")
            .is_empty());
    }

    #[tokio::test]
    async fn valid_rating_adds_one_review_newest_first() {
        let (state, _db) = test_state();
        let recipe_id = seed_recipe(&state);

        {
            let mut conn = state.pool.get().expect("pool failed");
            insert_review(&mut conn, recipe_id, 1, 3, "Decent weeknight dinner.")
                .expect("insert failed");
        }

        let response = submit(
            State(state.clone()),
            Path(recipe_id),
            Form(review_form("5", "Family favorite now.")),
        )
        .await
        .expect("handler failed");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("no location header");
        assert!(location.starts_with(&format!("/recipe/{recipe_id}?")));
        assert!(location.contains("kind=success"));

        let mut conn = state.pool.get().expect("pool failed");
        let reviews = load_reviews(&mut conn, recipe_id).expect("load failed");
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].0.comment, "Family favorite now.");
        assert_eq!(reviews[0].0.rating, 5);
    }

    #[tokio::test]
    async fn comment_defaults_to_empty() {
        let (state, _db) = test_state();
        let recipe_id = seed_recipe(&state);

        let response = submit(
            State(state.clone()),
            Path(recipe_id),
            Form(ReviewForm {
                rating: Some("4".to_string()),
                comment: None,
            }),
        )
        .await
        .expect("handler failed");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let mut conn = state.pool.get().expect("pool failed");
        let reviews = load_reviews(&mut conn, recipe_id).expect("load failed");
        assert_eq!(reviews[0].0.comment, "");
    }
}
