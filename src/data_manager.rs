//! Storage capability set behind the JSON API.

use crate::{
    dto::movies::MovieUpdate,
    error::AppResult,
    external::omdb::MovieData,
    models::{Movie, User},
    services::{
        favorite_service::{self, FavoriteOutcome},
        movie_service, user_service,
    },
    state::AppState,
};

#[allow(async_fn_in_trait)]
pub trait DataManager {
    /// All registered users.
    async fn get_all_users(&self) -> AppResult<Vec<User>>;

    /// A user's favorites, most recently added first.
    async fn get_user_movies(&self, user_id: i32) -> AppResult<Vec<Movie>>;

    async fn add_user(&self, name: &str) -> AppResult<User>;

    /// Adds a movie to a user's favorites, reusing an existing row with the same title.
    async fn add_movie(&self, user_id: i32, data: &MovieData) -> AppResult<FavoriteOutcome>;

    async fn update_movie(&self, movie_id: i32, update: MovieUpdate) -> AppResult<Movie>;

    /// Removes the movie from the user's favorites; the movie itself is kept.
    async fn delete_movie(&self, user_id: i32, movie_id: i32) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct SqliteDataManager {
    state: AppState,
}

impl SqliteDataManager {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl DataManager for SqliteDataManager {
    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        user_service::list_users(&self.state).await
    }

    async fn get_user_movies(&self, user_id: i32) -> AppResult<Vec<Movie>> {
        favorite_service::list_user_movies(&self.state, user_id).await
    }

    async fn add_user(&self, name: &str) -> AppResult<User> {
        user_service::add_user(&self.state, name).await
    }

    async fn add_movie(&self, user_id: i32, data: &MovieData) -> AppResult<FavoriteOutcome> {
        favorite_service::reconcile_favorite(&self.state, user_id, data).await
    }

    async fn update_movie(&self, movie_id: i32, update: MovieUpdate) -> AppResult<Movie> {
        let (movie, _director) = movie_service::update_info(&self.state, movie_id, update).await?;
        Ok(movie)
    }

    async fn delete_movie(&self, user_id: i32, movie_id: i32) -> AppResult<bool> {
        favorite_service::remove_favorite(&self.state, user_id, movie_id).await
    }
}
