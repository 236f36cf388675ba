use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::{
        non_empty,
        reviews::{AddReviewForm, ReviewFormView},
    },
    error::{AppError, AppResult},
    response::ApiResponse,
    services::{movie_service, review_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/review/user/{user_id}/movie/{movie_id}/",
        get(review_form).post(add_review),
    )
}

#[utoipa::path(
    get,
    path = "/review/user/{user_id}/movie/{movie_id}/",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Review form", body = ApiResponse<ReviewFormView>),
        (status = 404, description = "User or movie not found")
    ),
    tag = "Reviews"
)]
pub async fn review_form(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<ReviewFormView>>> {
    let movie = movie_service::get_movie(&state, movie_id).await?;
    let user = user_service::get_user(&state, user_id).await?;
    let view = ReviewFormView {
        movie,
        user,
        fields: vec!["new_review".into(), "user_rating".into()],
    };
    Ok(Json(ApiResponse::success("Add review", view, None)))
}

#[utoipa::path(
    post,
    path = "/review/user/{user_id}/movie/{movie_id}/",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    request_body(content = AddReviewForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Review stored, redirect to the movie info page"),
        (status = 400, description = "Rating is not a whole number"),
        (status = 404, description = "User or movie not found")
    ),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
    Form(form): Form<AddReviewForm>,
) -> AppResult<Redirect> {
    let rating = parse_rating(form.user_rating)?;
    let text = non_empty(form.new_review);
    review_service::add_review(&state, user_id, movie_id, rating, text).await?;
    Ok(Redirect::to(&format!("/info/movie/{movie_id}/user/{user_id}")))
}

fn parse_rating(raw: Option<String>) -> AppResult<Option<i32>> {
    non_empty(raw)
        .map(|r| r.trim().parse::<i32>())
        .transpose()
        .map_err(|_| AppError::BadRequest("user_rating must be a whole number".into()))
}
