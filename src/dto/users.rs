use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Movie, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub user_name: Option<String>,
}

/// Form posted to `/users`: either a user to delete or a name to search for.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UsersForm {
    pub user_id: Option<String>,
    pub search_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserSearchQuery {
    pub search_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListView {
    pub users: Vec<User>,
    pub msg: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserMoviesView {
    pub user: User,
    pub movies: Vec<Movie>,
    pub count_user_movies: usize,
    pub msg: Option<String>,
}

impl UserMoviesView {
    pub fn new(user: User, movies: Vec<Movie>) -> Self {
        Self {
            count_user_movies: movies.len(),
            user,
            movies,
            msg: None,
        }
    }
}
