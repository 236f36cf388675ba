use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{non_empty, reviews::ReviewWithAuthor},
    external::{
        NOT_AVAILABLE,
        omdb::{MovieData, Rating, or_not_available},
    },
    models::{Director, Genre, Movie, User},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddMovieForm {
    pub movie_title: Option<String>,
    pub add_this_movie: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notice {
    pub text: String,
    pub color: String,
}

impl Notice {
    pub fn new(text: impl Into<String>, color: &str) -> Self {
        Self {
            text: text.into(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddMovieView {
    pub user: User,
    pub movie: Option<MovieData>,
    pub msg: Option<Notice>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteMovieForm {
    pub delete: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteMovieView {
    pub user: User,
    pub movie: Movie,
    pub msg: String,
    pub deleted: bool,
}

/// Sparse update: only non-empty values overwrite what is stored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MovieUpdate {
    #[serde(default, deserialize_with = "string_or_number")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub birth: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub death: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMovieRequest {
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub fields: MovieUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentKind {
    Bio,
    Description,
}

impl EnrichmentKind {
    pub fn from_prompt(prompt: &str) -> Option<Self> {
        match prompt {
            "bio" => Some(Self::Bio),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnrichmentResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UpdateAck {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TextGenerationError {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateMovieView {
    pub user: User,
    pub movie: Movie,
    pub director: Director,
    pub bio: Option<String>,
    pub msg: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieInfoView {
    pub movie: Movie,
    pub director: Director,
    pub genres: Vec<Genre>,
    pub user: User,
    pub reviews: Vec<ReviewWithAuthor>,
}

/// Fields accepted by the JSON API when adding a movie without a lookup.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ApiMovieForm {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
}

impl ApiMovieForm {
    /// `None` when no title was given. The title is used as sent.
    pub fn into_movie_data(self) -> Option<MovieData> {
        let title = non_empty(self.title)?;
        let rating = match non_empty(self.rating) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(score) if score.is_finite() => Rating::Score(score),
                _ => Rating::NotAvailable,
            },
            None => Rating::NotAvailable,
        };
        Some(MovieData {
            poster: or_not_available(self.poster.as_deref()),
            title,
            year: or_not_available(self.year.as_deref()),
            genre: or_not_available(self.genre.as_deref()),
            director: or_not_available(self.director.as_deref()),
            rating: Some(rating),
            description: or_not_available(self.description.as_deref()),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiMovieSummary {
    pub id: i32,
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub director: String,
}

impl ApiMovieSummary {
    pub fn new(movie: Movie, director: Option<Director>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            genre: movie.genre,
            year: movie.year,
            director: director
                .and_then(|d| d.name)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
