use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::{
        FormView, non_empty,
        users::{CreateUserRequest, UserListView, UserMoviesView, UserSearchQuery, UsersForm},
    },
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    services::{favorite_service, user_service},
    state::AppState,
};

const SELECT_USER_MSG: &str = "Select a user from the list. Or click Start.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(manage_users))
        .route("/add_user", get(add_user_form).post(add_user))
        .route("/users/{user_id}", get(user_movies))
}

async fn search_or_list(
    state: &AppState,
    search_name: Option<String>,
) -> AppResult<(Vec<User>, String)> {
    let Some(search_name) = non_empty(search_name) else {
        return Ok((user_service::list_users(state).await?, SELECT_USER_MSG.into()));
    };

    let users = user_service::search_users(state, search_name.trim()).await?;
    if users.is_empty() {
        let msg = format!("No user was found with the name {search_name}");
        return Ok((user_service::list_users(state).await?, msg));
    }
    Ok((users, SELECT_USER_MSG.into()))
}

fn user_list_response(users: Vec<User>, msg: String) -> Json<ApiResponse<UserListView>> {
    let total = users.len() as i64;
    Json(ApiResponse::success(
        "Users",
        UserListView { users, msg },
        Some(Meta::new(total)),
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    params(
        ("search_name" = Option<String>, Query, description = "Substring of the user name")
    ),
    responses(
        (status = 200, description = "List users", body = ApiResponse<UserListView>)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> AppResult<Json<ApiResponse<UserListView>>> {
    let (users, msg) = search_or_list(&state, query.search_name).await?;
    Ok(user_list_response(users, msg))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body(content = UsersForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User deleted or users searched", body = ApiResponse<UserListView>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn manage_users(
    State(state): State<AppState>,
    Form(form): Form<UsersForm>,
) -> AppResult<Json<ApiResponse<UserListView>>> {
    if let Some(raw_id) = non_empty(form.user_id) {
        let user_id = raw_id
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::BadRequest(format!("Invalid user id {raw_id}")))?;
        let deleted = user_service::delete_user(&state, user_id).await?;
        let msg = format!(
            "\"{} | {}\" was deleted from the users list.",
            deleted.id, deleted.name
        );
        let users = user_service::list_users(&state).await?;
        return Ok(user_list_response(users, msg));
    }

    let (users, msg) = search_or_list(&state, form.search_name).await?;
    Ok(user_list_response(users, msg))
}

#[utoipa::path(
    get,
    path = "/add_user",
    responses(
        (status = 200, description = "Add user form", body = ApiResponse<FormView>)
    ),
    tag = "Users"
)]
pub async fn add_user_form() -> Json<ApiResponse<FormView>> {
    Json(ApiResponse::success(
        "Add user",
        FormView::new("/add_user", &["user_name"]).with_msg("Enter the name of the new user"),
        None,
    ))
}

#[utoipa::path(
    post,
    path = "/add_user",
    request_body(content = CreateUserRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "User created, redirect to /users"),
        (status = 400, description = "User name is required")
    ),
    tag = "Users"
)]
pub async fn add_user(
    State(state): State<AppState>,
    Form(form): Form<CreateUserRequest>,
) -> AppResult<Redirect> {
    let name = form.user_name.unwrap_or_default();
    user_service::add_user(&state, &name).await?;
    Ok(Redirect::to("/users"))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User favorites, newest first", body = ApiResponse<UserMoviesView>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn user_movies(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserMoviesView>>> {
    let user = user_service::get_user(&state, user_id).await?;
    let movies = favorite_service::list_user_movies(&state, user_id).await?;
    let total = movies.len() as i64;
    Ok(Json(ApiResponse::success(
        "User movies",
        UserMoviesView::new(user, movies),
        Some(Meta::new(total)),
    )))
}
