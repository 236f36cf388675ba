use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::{
        movies::{
            AddMovieForm, AddMovieView, DeleteMovieForm, DeleteMovieView, EnrichmentKind,
            EnrichmentResponse, MovieInfoView, Notice, TextGenerationError, UpdateAck,
            UpdateMovieRequest, UpdateMovieView,
        },
        non_empty,
        users::UserMoviesView,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::{
        favorite_service::{self, FavoriteOutcome},
        movie_service, review_service, user_service,
    },
    state::AppState,
};

const FOUND_COLOR: &str = "#56ABB3";
const NOT_FOUND_COLOR: &str = "red";
const ALREADY_LISTED_COLOR: &str = "orange";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/add_movie",
            get(add_movie_form).post(add_movie),
        )
        .route(
            "/users/{user_id}/delete_movie/{movie_id}",
            get(delete_movie_confirm).post(delete_movie),
        )
        .route(
            "/users/{user_id}/update_movie/{movie_id}",
            get(update_movie_form).post(update_movie),
        )
        .route(
            "/info/movie/{movie_id}/user/{user_id}",
            get(info_movie).post(info_movie),
        )
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/add_movie",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Add movie form", body = ApiResponse<AddMovieView>),
        (status = 404, description = "User not found")
    ),
    tag = "Movies"
)]
pub async fn add_movie_form(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<AddMovieView>>> {
    let user = user_service::get_user(&state, user_id).await?;
    let view = AddMovieView {
        user,
        movie: None,
        msg: None,
    };
    Ok(Json(ApiResponse::success("Add movie", view, None)))
}

/// `movie_title` searches the movie-info source; `add_this_movie` confirms the add.
#[utoipa::path(
    post,
    path = "/users/{user_id}/add_movie",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body(content = AddMovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Search result or updated favorites", body = ApiResponse<AddMovieView>),
        (status = 404, description = "User not found"),
        (status = 502, description = "Movie-info source unreachable")
    ),
    tag = "Movies"
)]
pub async fn add_movie(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Response> {
    let user = user_service::get_user(&state, user_id).await?;

    if let Some(title) = non_empty(form.movie_title) {
        let movie = state.movie_info.search(title.trim()).await?;
        let msg = if movie.is_not_found() {
            Notice::new(
                format!("No movie with the search entry \"{title}\" was found."),
                NOT_FOUND_COLOR,
            )
        } else {
            Notice::new(
                format!("Here is the movie found with the search entry \"{title}\""),
                FOUND_COLOR,
            )
        };
        let view = AddMovieView {
            user,
            movie: Some(movie),
            msg: Some(msg),
        };
        return Ok(Json(ApiResponse::success("Movie search", view, None)).into_response());
    }

    let Some(title) = non_empty(form.add_this_movie) else {
        let view = AddMovieView {
            user,
            movie: None,
            msg: None,
        };
        return Ok(Json(ApiResponse::success("Add movie", view, None)).into_response());
    };

    let data = state.movie_info.search(title.trim()).await?;
    let outcome = favorite_service::reconcile_favorite(&state, user_id, &data).await?;

    let msg = match outcome {
        FavoriteOutcome::AlreadyInList(_) => {
            let view = AddMovieView {
                user,
                msg: Some(Notice::new(
                    format!(
                        "The movie {} is already in your favorite movies list",
                        data.title
                    ),
                    ALREADY_LISTED_COLOR,
                )),
                movie: Some(data),
            };
            return Ok(Json(ApiResponse::success("Movie already listed", view, None)).into_response());
        }
        FavoriteOutcome::NotFound => {
            let view = AddMovieView {
                user,
                movie: Some(data),
                msg: Some(Notice::new(
                    format!("No movie with the search entry \"{title}\" was found."),
                    NOT_FOUND_COLOR,
                )),
            };
            return Ok(Json(ApiResponse::success("Movie search", view, None)).into_response());
        }
        FavoriteOutcome::Rejected => return Err(AppError::NotFound),
        FavoriteOutcome::Linked(_) | FavoriteOutcome::Created { .. } => {
            format!("\"{title}\" was added to your movie list!")
        }
    };

    let movies = favorite_service::list_user_movies(&state, user_id).await?;
    let total = movies.len() as i64;
    let mut view = UserMoviesView::new(user, movies);
    view.msg = Some(msg);
    Ok(Json(ApiResponse::success("Movie added", view, Some(Meta::new(total)))).into_response())
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/delete_movie/{movie_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Confirmation prompt", body = ApiResponse<DeleteMovieView>),
        (status = 404, description = "User or movie not found")
    ),
    tag = "Movies"
)]
pub async fn delete_movie_confirm(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<DeleteMovieView>>> {
    let view = confirmation_view(&state, user_id, movie_id).await?;
    Ok(Json(ApiResponse::success("Confirm delete", view, None)))
}

async fn confirmation_view(
    state: &AppState,
    user_id: i32,
    movie_id: i32,
) -> AppResult<DeleteMovieView> {
    let user = user_service::get_user(state, user_id).await?;
    let movie = movie_service::get_movie(state, movie_id).await?;
    Ok(DeleteMovieView {
        user,
        movie,
        msg: "Are you sure you want to delete this movie from your favourite movies.".into(),
        deleted: false,
    })
}

/// Only a `delete` field equal to `"delete"` removes the movie from the list.
#[utoipa::path(
    post,
    path = "/users/{user_id}/delete_movie/{movie_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    request_body(content = DeleteMovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Removed from favorites or confirmation prompt", body = ApiResponse<DeleteMovieView>),
        (status = 404, description = "User, movie or favorite not found")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
    Form(form): Form<DeleteMovieForm>,
) -> AppResult<Json<ApiResponse<DeleteMovieView>>> {
    let mut view = confirmation_view(&state, user_id, movie_id).await?;

    if form.delete.as_deref() != Some("delete") {
        return Ok(Json(ApiResponse::success("Confirm delete", view, None)));
    }

    if !favorite_service::remove_favorite(&state, user_id, movie_id).await? {
        return Err(AppError::NotFound);
    }

    view.msg = format!(
        "The film \" {} \" was deleted from your favorite movies list.",
        view.movie.title
    );
    view.deleted = true;
    Ok(Json(ApiResponse::success("Movie removed", view, None)))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/update_movie/{movie_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Update form", body = ApiResponse<UpdateMovieView>),
        (status = 404, description = "User or movie not found")
    ),
    tag = "Movies"
)]
pub async fn update_movie_form(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<UpdateMovieView>>> {
    let (movie, director) = movie_service::get_movie_with_director(&state, movie_id).await?;
    let user = user_service::get_user(&state, user_id).await?;
    let view = UpdateMovieView {
        user,
        movie,
        bio: director.bio.clone(),
        director,
        msg: "Click Submit to save the new data".into(),
    };
    Ok(Json(ApiResponse::success("Update movie", view, None)))
}

/// Without `prompt` the body is merged into the stored movie; `bio` and `description`
/// ask the text generator instead.
#[utoipa::path(
    post,
    path = "/users/{user_id}/update_movie/{movie_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Fields merged or text generated", body = EnrichmentResponse),
        (status = 400, description = "Unknown prompt"),
        (status = 404, description = "User or movie not found"),
        (status = 500, description = "Failed to generate text", body = TextGenerationError)
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateMovieRequest>,
) -> AppResult<Response> {
    movie_service::get_movie(&state, movie_id).await?;
    user_service::get_user(&state, user_id).await?;

    let Some(prompt) = non_empty(payload.prompt) else {
        movie_service::update_info(&state, movie_id, payload.fields).await?;
        let ack = UpdateAck {
            response: "FINE".into(),
        };
        return Ok((StatusCode::OK, Json(ack)).into_response());
    };

    let kind = EnrichmentKind::from_prompt(&prompt)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown prompt {prompt}")))?;

    match movie_service::enrich(&state, movie_id, kind).await {
        Ok(generated) => Ok(Json(generated).into_response()),
        Err(AppError::TextGeneration(err)) => {
            tracing::error!(movie_id, error = %err, "text generation failed");
            let body = TextGenerationError {
                error: "Failed to generate text".into(),
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    get,
    path = "/info/movie/{movie_id}/user/{user_id}",
    params(
        ("movie_id" = i32, Path, description = "Movie ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Movie details with reviews, newest first", body = ApiResponse<MovieInfoView>),
        (status = 404, description = "User or movie not found")
    ),
    tag = "Movies"
)]
pub async fn info_movie(
    State(state): State<AppState>,
    Path((movie_id, user_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<MovieInfoView>>> {
    let (movie, director) = movie_service::get_movie_with_director(&state, movie_id).await?;
    let user = user_service::get_user(&state, user_id).await?;
    let genres = movie_service::movie_genres(&state, movie_id).await?;
    let reviews = review_service::movie_reviews(&state, movie_id).await?;
    let total = reviews.len() as i64;

    let view = MovieInfoView {
        movie,
        director,
        genres,
        user,
        reviews,
    };
    Ok(Json(ApiResponse::success("Movie info", view, Some(Meta::new(total)))))
}
