use std::{fmt, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use super::{NOT_AVAILABLE, NOT_FOUND_TITLE};
use crate::error::{AppError, AppResult};

/// Raw body of a movie-info lookup by title.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbPayload {
    #[serde(default)]
    pub response: String,
    pub poster: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    #[serde(default)]
    pub ratings: Vec<OmdbRating>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    pub source: Option<String>,
    pub value: String,
}

impl OmdbPayload {
    pub fn not_found() -> Self {
        Self {
            response: "False".to_string(),
            error: Some("Movie not found!".to_string()),
            ..Default::default()
        }
    }

    pub fn is_found(&self) -> bool {
        self.response == "True"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    NotAvailable,
}

impl Rating {
    /// Drops the three-character unit suffix (`/10`) and parses the rest.
    pub fn parse(value: &str) -> Self {
        let Some((cut, _)) = value.char_indices().rev().nth(2) else {
            return Rating::NotAvailable;
        };
        match value[..cut].trim().parse::<f64>() {
            Ok(score) if score.is_finite() => Rating::Score(score),
            _ => Rating::NotAvailable,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(score) if score.fract() == 0.0 => write!(f, "{score:.1}"),
            Rating::Score(score) => write!(f, "{score}"),
            Rating::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Movie attributes as stored, after normalization of a lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieData {
    pub poster: String,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub director: String,
    #[schema(value_type = Option<String>)]
    pub rating: Option<Rating>,
    pub description: String,
}

impl MovieData {
    pub fn not_found() -> Self {
        Self {
            poster: String::new(),
            title: NOT_FOUND_TITLE.to_string(),
            year: String::new(),
            genre: String::new(),
            director: String::new(),
            rating: None,
            description: String::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.title == NOT_FOUND_TITLE
    }

    pub fn rating_text(&self) -> String {
        self.rating
            .map(|rating| rating.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

pub fn or_not_available(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Titles are matched exactly, so they keep their whitespace.
pub fn title_or_not_available(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn normalize(payload: &OmdbPayload) -> MovieData {
    if !payload.is_found() {
        return MovieData::not_found();
    }

    let rating = match payload.ratings.first() {
        Some(entry) => Rating::parse(&entry.value),
        None => {
            tracing::debug!(title = ?payload.title, "no rating entry in movie-info payload");
            Rating::NotAvailable
        }
    };

    MovieData {
        poster: or_not_available(payload.poster.as_deref()),
        title: title_or_not_available(payload.title.as_deref()),
        year: or_not_available(payload.year.as_deref()),
        genre: or_not_available(payload.genre.as_deref()),
        director: or_not_available(payload.director.as_deref()),
        rating: Some(rating),
        description: or_not_available(payload.plot.as_deref()),
    }
}

#[derive(Clone)]
pub struct MovieInfoClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MovieInfoClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("movie-web-app/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Non-success statuses are logged and reported as a miss.
    pub async fn fetch(&self, title: &str) -> AppResult<OmdbPayload> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, title, "movie-info lookup failed");
            return Ok(OmdbPayload::not_found());
        }

        response.json::<OmdbPayload>().await.map_err(AppError::from)
    }

    pub async fn search(&self, title: &str) -> AppResult<MovieData> {
        let payload = self.fetch(title).await?;
        Ok(normalize(&payload))
    }
}
