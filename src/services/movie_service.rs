use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};

use crate::{
    dto::movies::{EnrichmentKind, EnrichmentResponse, MovieUpdate},
    entity::{
        directors::{ActiveModel as DirectorActive, Column as DirectorCol, Entity as Directors},
        genres::Entity as Genres,
        movies::{ActiveModel as MovieActive, Entity as Movies},
    },
    error::{AppError, AppResult},
    external::NOT_AVAILABLE,
    models::{Director, Genre, Movie},
    state::AppState,
};

pub async fn get_movie(state: &AppState, id: i32) -> AppResult<Movie> {
    match Movies::find_by_id(id).one(&state.orm).await? {
        Some(movie) => Ok(Movie::from(movie)),
        None => Err(AppError::NotFound),
    }
}

pub async fn get_movie_with_director(state: &AppState, id: i32) -> AppResult<(Movie, Director)> {
    let found = Movies::find_by_id(id)
        .find_also_related(Directors)
        .one(&state.orm)
        .await?;
    match found {
        Some((movie, Some(director))) => Ok((Movie::from(movie), Director::from(director))),
        Some((movie, None)) => Err(AppError::Internal(anyhow::anyhow!(
            "movie {} references missing director {}",
            movie.id,
            movie.director_id
        ))),
        None => Err(AppError::NotFound),
    }
}

/// Directors of the given movies keyed by id.
pub async fn directors_for(state: &AppState, movies: &[Movie]) -> AppResult<HashMap<i32, Director>> {
    let mut ids: Vec<i32> = movies.iter().map(|m| m.director_id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let directors = Directors::find()
        .filter(DirectorCol::Id.is_in(ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|d| (d.id, Director::from(d)))
        .collect();
    Ok(directors)
}

pub async fn movie_genres(state: &AppState, id: i32) -> AppResult<Vec<Genre>> {
    let movie = match Movies::find_by_id(id).one(&state.orm).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    let genres = movie
        .find_related(Genres)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Genre::from)
        .collect();
    Ok(genres)
}

/// Applies every non-empty field of `update`; everything else keeps its stored value.
pub async fn update_info(
    state: &AppState,
    movie_id: i32,
    update: MovieUpdate,
) -> AppResult<(Movie, Director)> {
    let txn = state.orm.begin().await?;

    let (movie, director) = match Movies::find_by_id(movie_id)
        .find_also_related(Directors)
        .one(&txn)
        .await?
    {
        Some((movie, Some(director))) => (movie, director),
        Some((movie, None)) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "movie {} references missing director {}",
                movie.id,
                movie.director_id
            )));
        }
        None => return Err(AppError::NotFound),
    };

    let mut movie_active: MovieActive = movie.clone().into();
    if let Some(description) = filled(update.description) {
        movie_active.description = Set(Some(description));
    }
    if let Some(rating) = filled(update.rating) {
        movie_active.rating = Set(Some(rating));
    }
    if let Some(genre) = filled(update.genre) {
        movie_active.genre = Set(Some(genre));
    }

    let mut director_active: DirectorActive = director.clone().into();
    if let Some(bio) = filled(update.bio) {
        director_active.bio = Set(Some(bio));
    }
    if let Some(birth) = filled(update.birth) {
        director_active.birth = Set(Some(birth));
    }
    if let Some(death) = filled(update.death) {
        director_active.death = Set(Some(death));
    }

    let movie = if movie_active.is_changed() {
        movie_active.update(&txn).await?
    } else {
        movie
    };
    let director = if director_active.is_changed() {
        director_active.update(&txn).await?
    } else {
        director
    };

    txn.commit().await?;

    tracing::info!(movie_id, director_id = director.id, "movie info updated");
    Ok((Movie::from(movie), Director::from(director)))
}

fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Asks the text generator for director or movie text. Nothing is stored.
pub async fn enrich(
    state: &AppState,
    movie_id: i32,
    kind: EnrichmentKind,
) -> AppResult<EnrichmentResponse> {
    let (movie, director) = get_movie_with_director(state, movie_id).await?;
    let director_name = director.name.as_deref().unwrap_or(NOT_AVAILABLE);

    match kind {
        EnrichmentKind::Bio => {
            let bio = state
                .text_gen
                .generate(&bio_prompt(&movie.title, director_name))
                .await?;
            let birth = state
                .text_gen
                .generate(&birth_prompt(&movie.title, director_name))
                .await?;
            let death = state
                .text_gen
                .generate(&death_prompt(&movie.title, director_name))
                .await?;
            Ok(EnrichmentResponse {
                response: bio.text,
                birth: Some(birth.text),
                death: Some(death.text),
            })
        }
        EnrichmentKind::Description => {
            let description = state
                .text_gen
                .generate(&description_prompt(&movie.title, director_name))
                .await?;
            Ok(EnrichmentResponse {
                response: description.text,
                birth: None,
                death: None,
            })
        }
    }
}

pub fn bio_prompt(title: &str, director: &str) -> String {
    format!(
        "Get a short text about the biography of the director of the movie '{title}', '{director}'."
    )
}

pub fn birth_prompt(title: &str, director: &str) -> String {
    format!(
        "Get only the birthday data without extra text in the format day/month/year of the director of the movie '{title}', '{director}'."
    )
}

pub fn death_prompt(title: &str, director: &str) -> String {
    format!(
        "Get only the death day data without any extra text in the format day/month/year of the director of the movie '{title}', '{director}'."
    )
}

pub fn description_prompt(title: &str, director: &str) -> String {
    format!("Get a short text about the movie '{title}' of the director '{director}'.")
}
