use axum::{
    Form, Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use crate::{
    data_manager::{DataManager, SqliteDataManager},
    dto::{
        movies::{ApiMovieForm, ApiMovieSummary, MovieUpdate},
        users::CreateUserRequest,
    },
    error::{AppError, AppResult},
    external::NOT_FOUND_TITLE,
    models::{Movie, User},
    response::{ApiResponse, Meta},
    services::{favorite_service::FavoriteOutcome, movie_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route("/users/{user_id}/movies", get(get_user_favorite_movies))
        .route(
            "/users/{user_id}/movies/{movie_id}",
            delete(remove_user_movie),
        )
        .route("/add_movie/{user_id}/movie", post(add_movie_for_user))
        .route("/movies/{movie_id}", patch(update_movie))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<User>>)
    ),
    tag = "Api"
)]
pub async fn get_users(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = SqliteDataManager::new(state).get_all_users().await?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::success("Users", users, Some(Meta::new(total)))))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body(content = CreateUserRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "User name is required")
    ),
    tag = "Api"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let name = form.user_name.unwrap_or_default();
    let user = SqliteDataManager::new(state).add_user(&name).await?;
    Ok(Json(ApiResponse::success("User created", user, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/movies",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Favorite movies of the user", body = ApiResponse<Vec<ApiMovieSummary>>)
    ),
    tag = "Api"
)]
pub async fn get_user_favorite_movies(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<ApiMovieSummary>>>> {
    let movies = SqliteDataManager::new(state.clone())
        .get_user_movies(user_id)
        .await?;

    let directors = movie_service::directors_for(&state, &movies).await?;
    let items: Vec<ApiMovieSummary> = movies
        .into_iter()
        .map(|movie| {
            let director = directors.get(&movie.director_id).cloned();
            ApiMovieSummary::new(movie, director)
        })
        .collect();

    let total = items.len() as i64;
    Ok(Json(ApiResponse::success("Movies", items, Some(Meta::new(total)))))
}

#[utoipa::path(
    post,
    path = "/api/add_movie/{user_id}/movie",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body(content = ApiMovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Movie in the user's favorites", body = ApiResponse<Movie>),
        (status = 400, description = "Title missing"),
        (status = 404, description = "User not found")
    ),
    tag = "Api"
)]
pub async fn add_movie_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Form(form): Form<ApiMovieForm>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let data = form
        .into_movie_data()
        .filter(|d| d.title != NOT_FOUND_TITLE)
        .ok_or_else(|| AppError::BadRequest("A movie title is required".into()))?;

    let outcome = SqliteDataManager::new(state).add_movie(user_id, &data).await?;
    let message = match &outcome {
        FavoriteOutcome::AlreadyInList(_) => "Movie already in favorites",
        FavoriteOutcome::Linked(_) => "Movie linked",
        FavoriteOutcome::Created { .. } => "Movie created",
        FavoriteOutcome::NotFound | FavoriteOutcome::Rejected => return Err(AppError::NotFound),
    };

    let movie = outcome.movie().cloned().ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(message, movie, Some(Meta::empty()))))
}

#[utoipa::path(
    patch,
    path = "/api/movies/{movie_id}",
    params(
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    request_body = MovieUpdate,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<Movie>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Api"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Json(update): Json<MovieUpdate>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let movie = SqliteDataManager::new(state)
        .update_movie(movie_id, update)
        .await?;
    Ok(Json(ApiResponse::success("Updated", movie, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/movies/{movie_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Favorite not found")
    ),
    tag = "Api"
)]
pub async fn remove_user_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let removed = SqliteDataManager::new(state)
        .delete_movie(user_id, movie_id)
        .await?;

    if !removed {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Removed from favorites",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
