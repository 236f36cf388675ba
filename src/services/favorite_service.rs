use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;

use crate::{
    entity::{
        directors::ActiveModel as DirectorActive,
        genres::{ActiveModel as GenreActive, Column as GenreCol, Entity as Genres},
        movie_genres::{
            ActiveModel as MovieGenreActive, Column as MovieGenreCol, Entity as MovieGenres,
        },
        movies::{ActiveModel as MovieActive, Column as MovieCol, Entity as Movies},
        user_movies::{ActiveModel as UserMovieActive, Column as UserMovieCol, Entity as UserMovies},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    external::{NOT_AVAILABLE, omdb::MovieData},
    models::{Director, Movie},
    state::AppState,
};

/// What happened when a title was added to a user's favorites.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteOutcome {
    /// The user already has a movie with this title; nothing changed.
    AlreadyInList(Movie),
    /// The movie existed; only the association was added.
    Linked(Movie),
    /// Director, movie and association were all created.
    Created { movie: Movie, director: Director },
    /// The lookup result was the not-found sentinel; nothing is stored.
    NotFound,
    /// The user or the resolved movie has no row.
    Rejected,
}

impl FavoriteOutcome {
    pub fn movie(&self) -> Option<&Movie> {
        match self {
            FavoriteOutcome::AlreadyInList(movie)
            | FavoriteOutcome::Linked(movie)
            | FavoriteOutcome::Created { movie, .. } => Some(movie),
            FavoriteOutcome::NotFound | FavoriteOutcome::Rejected => None,
        }
    }
}

/// A user's favorite movies, most recently added first.
pub async fn list_user_movies(state: &AppState, user_id: i32) -> AppResult<Vec<Movie>> {
    let movies = sqlx::query_as::<_, Movie>(
        r#"
        SELECT m.*
        FROM user_movies um
        JOIN movies m ON m.id = um.movie_id
        WHERE um.user_id = ?
        ORDER BY um.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(movies)
}

/// Adds `data` to the user's favorites, creating the movie only when its exact title is unknown.
pub async fn reconcile_favorite(
    state: &AppState,
    user_id: i32,
    data: &MovieData,
) -> AppResult<FavoriteOutcome> {
    if data.is_not_found() {
        return Ok(FavoriteOutcome::NotFound);
    }

    if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
        tracing::warn!(user_id, "favorite rejected: user not found");
        return Ok(FavoriteOutcome::Rejected);
    }

    let favorites = list_user_movies(state, user_id).await?;
    if let Some(movie) = favorites.into_iter().find(|m| m.title == data.title) {
        tracing::info!(user_id, title = %data.title, "movie already in favorites");
        return Ok(FavoriteOutcome::AlreadyInList(movie));
    }

    if let Some(existing) = find_movie_by_title(state, &data.title).await? {
        return link_existing(state, user_id, existing).await;
    }

    match create_movie(state, data).await? {
        NewMovie::Inserted { movie, director } => {
            if !connect_user_movie(state, user_id, movie.id).await? {
                return Ok(FavoriteOutcome::Rejected);
            }
            tracing::info!(user_id, movie_id = movie.id, title = %movie.title, "movie created");
            Ok(FavoriteOutcome::Created { movie, director })
        }
        NewMovie::AlreadyStored(movie) => link_existing(state, user_id, movie).await,
    }
}

async fn link_existing(state: &AppState, user_id: i32, movie: Movie) -> AppResult<FavoriteOutcome> {
    if !connect_user_movie(state, user_id, movie.id).await? {
        return Ok(FavoriteOutcome::Rejected);
    }
    tracing::info!(user_id, movie_id = movie.id, "existing movie linked");
    Ok(FavoriteOutcome::Linked(movie))
}

pub async fn find_movie_by_title(state: &AppState, title: &str) -> AppResult<Option<Movie>> {
    let movie = Movies::find()
        .filter(MovieCol::Title.eq(title))
        .one(&state.orm)
        .await?
        .map(Movie::from);
    Ok(movie)
}

enum NewMovie {
    Inserted { movie: Movie, director: Director },
    AlreadyStored(Movie),
}

/// Director and movie are written together. Losing the title race to a concurrent insert
/// rolls both back and hands out the winner's row.
async fn create_movie(state: &AppState, data: &MovieData) -> AppResult<NewMovie> {
    let txn = state.orm.begin().await?;

    let director = add_director(&txn, &data.director).await?;
    match add_movie(&txn, director.id, data).await? {
        Some(movie) => {
            link_genres(&txn, movie.id, &data.genre).await?;
            txn.commit().await?;
            Ok(NewMovie::Inserted { movie, director })
        }
        None => {
            txn.rollback().await?;
            tracing::warn!(title = %data.title, "movie inserted concurrently, linking existing row");
            let movie = find_movie_by_title(state, &data.title)
                .await?
                .ok_or(AppError::NotFound)?;
            Ok(NewMovie::AlreadyStored(movie))
        }
    }
}

/// Always inserts a new row; directors are not matched by name.
pub async fn add_director<C>(conn: &C, name: &str) -> AppResult<Director>
where
    C: ConnectionTrait,
{
    let name = if name.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        name
    };
    let director = DirectorActive {
        id: NotSet,
        name: Set(Some(name.to_string())),
        birth: NotSet,
        death: NotSet,
        bio: NotSet,
    }
    .insert(conn)
    .await?;
    Ok(Director::from(director))
}

/// Returns `None` when a movie with the same title already exists.
pub async fn add_movie<C>(conn: &C, director_id: i32, data: &MovieData) -> AppResult<Option<Movie>>
where
    C: ConnectionTrait,
{
    let active = MovieActive {
        id: NotSet,
        title: Set(data.title.clone()),
        genre: Set(Some(data.genre.clone())),
        year: Set(Some(data.year.clone())),
        rating: Set(Some(data.rating_text())),
        poster: Set(Some(data.poster.clone())),
        description: Set(Some(data.description.clone())),
        director_id: Set(director_id),
    };

    let inserted = Movies::insert(active)
        .on_conflict(OnConflict::column(MovieCol::Title).do_nothing().to_owned())
        .exec(conn)
        .await;

    let movie_id = match inserted {
        Ok(result) => result.last_insert_id,
        Err(DbErr::RecordNotInserted) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let movie = Movies::find_by_id(movie_id)
        .one(conn)
        .await?
        .map(Movie::from)
        .ok_or(AppError::NotFound)?;
    Ok(Some(movie))
}

/// Links the movie to one genre row per comma-separated name, creating genres as needed.
pub async fn link_genres<C>(conn: &C, movie_id: i32, genre_list: &str) -> AppResult<()>
where
    C: ConnectionTrait,
{
    for name in genre_names(genre_list) {
        let genre_id = match Genres::find()
            .filter(GenreCol::Name.eq(name))
            .one(conn)
            .await?
        {
            Some(genre) => genre.id,
            None => {
                GenreActive {
                    id: NotSet,
                    name: Set(Some(name.to_string())),
                    details: NotSet,
                }
                .insert(conn)
                .await?
                .id
            }
        };

        let linked = MovieGenres::insert(MovieGenreActive {
            movie_id: Set(movie_id),
            genre_id: Set(genre_id),
        })
        .on_conflict(
            OnConflict::columns([MovieGenreCol::MovieId, MovieGenreCol::GenreId])
                .do_nothing()
                .to_owned(),
        )
        .exec(conn)
        .await;

        match linked {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

pub fn genre_names(genre_list: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in genre_list.split(',').map(str::trim) {
        if name.is_empty() || name == NOT_AVAILABLE || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}

/// Links user and movie. `false` when either row is missing; an existing link counts as success.
pub async fn connect_user_movie(state: &AppState, user_id: i32, movie_id: i32) -> AppResult<bool> {
    let user = Users::find_by_id(user_id).one(&state.orm).await?;
    let movie = Movies::find_by_id(movie_id).one(&state.orm).await?;
    if user.is_none() || movie.is_none() {
        tracing::warn!(user_id, movie_id, "cannot link: user or movie not found");
        return Ok(false);
    }

    let inserted = UserMovies::insert(UserMovieActive {
        id: NotSet,
        user_id: Set(user_id),
        movie_id: Set(movie_id),
    })
    .on_conflict(
        OnConflict::columns([UserMovieCol::UserId, UserMovieCol::MovieId])
            .do_nothing()
            .to_owned(),
    )
    .exec(&state.orm)
    .await;

    match inserted {
        Ok(_) => Ok(true),
        Err(DbErr::RecordNotInserted) => {
            tracing::debug!(user_id, movie_id, "favorite already linked");
            Ok(true)
        }
        Err(err) => Err(err.into()),
    }
}

/// Deletes only the association row. `false` when user, movie or link is missing.
pub async fn remove_favorite(state: &AppState, user_id: i32, movie_id: i32) -> AppResult<bool> {
    let user = Users::find_by_id(user_id).one(&state.orm).await?;
    let movie = Movies::find_by_id(movie_id).one(&state.orm).await?;
    if user.is_none() || movie.is_none() {
        tracing::warn!(user_id, movie_id, "cannot remove favorite: user or movie not found");
        return Ok(false);
    }

    let result = UserMovies::delete_many()
        .filter(UserMovieCol::UserId.eq(user_id))
        .filter(UserMovieCol::MovieId.eq(movie_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Ok(false);
    }
    tracing::info!(user_id, movie_id, "favorite removed");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_names_skip_placeholders_and_duplicates() {
        assert_eq!(
            genre_names("Action, Sci-Fi, ,Action"),
            vec!["Action", "Sci-Fi"]
        );
        assert!(genre_names("N/A").is_empty());
        assert!(genre_names("").is_empty());
    }
}
