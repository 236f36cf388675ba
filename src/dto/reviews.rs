use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Movie, Review, User};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddReviewForm {
    pub new_review: Option<String>,
    pub user_rating: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub author: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewFormView {
    pub movie: Movie,
    pub user: User,
    pub fields: Vec<String>,
}
