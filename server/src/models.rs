use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub user_id: i32,
    pub name: String,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Recipe {
    pub recipe_id: i32,
    pub name: String,
    pub instructions: String,
    pub prep_time_minutes: Option<i32>,
    pub cost_estimate: Option<f64>,
    pub created_at: NaiveDateTime,
    pub author_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub name: &'a str,
    pub instructions: &'a str,
    pub prep_time_minutes: Option<i32>,
    pub cost_estimate: Option<f64>,
    pub author_id: i32,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    pub review_id: i32,
    pub recipe_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub recipe_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: &'a str,
}
