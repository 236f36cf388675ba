use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::entity::{directors, genres, movies, reviews, users};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub director_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Director {
    pub id: i32,
    pub name: Option<String>,
    pub birth: Option<String>,
    pub death: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub review_id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: Option<i32>,
    pub text: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            genre: model.genre,
            year: model.year,
            rating: model.rating,
            poster: model.poster,
            description: model.description,
            director_id: model.director_id,
        }
    }
}

impl From<directors::Model> for Director {
    fn from(model: directors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            birth: model.birth,
            death: model.death,
            bio: model.bio,
        }
    }
}

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            details: model.details,
        }
    }
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            review_id: model.review_id,
            user_id: model.user_id,
            movie_id: model.movie_id,
            rating: model.rating,
            text: model.text,
        }
    }
}
