use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::reviews::ReviewWithAuthor,
    entity::{
        movies::Entity as Movies,
        reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    models::Review,
    state::AppState,
};

/// Author shown for a review whose user no longer exists.
pub const NO_USER: &str = "No user";

/// Reviews of a movie, newest first.
pub async fn list_reviews(state: &AppState, movie_id: i32) -> AppResult<Vec<Review>> {
    let reviews = Reviews::find()
        .filter(ReviewCol::MovieId.eq(movie_id))
        .order_by_desc(ReviewCol::ReviewId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();
    Ok(reviews)
}

pub async fn movie_reviews(state: &AppState, movie_id: i32) -> AppResult<Vec<ReviewWithAuthor>> {
    let reviews = list_reviews(state, movie_id).await?;

    let mut user_ids: Vec<i32> = reviews.iter().map(|r| r.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let names: HashMap<i32, String> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(UserCol::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect()
    };

    Ok(with_authors(reviews, &names))
}

pub fn with_authors(reviews: Vec<Review>, names: &HashMap<i32, String>) -> Vec<ReviewWithAuthor> {
    reviews
        .into_iter()
        .map(|review| {
            let author = names
                .get(&review.user_id)
                .cloned()
                .unwrap_or_else(|| NO_USER.to_string());
            ReviewWithAuthor { review, author }
        })
        .collect()
}

pub async fn add_review(
    state: &AppState,
    user_id: i32,
    movie_id: i32,
    rating: Option<i32>,
    text: Option<String>,
) -> AppResult<Review> {
    if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }
    if Movies::find_by_id(movie_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let review = ReviewActive {
        review_id: NotSet,
        user_id: Set(user_id),
        movie_id: Set(movie_id),
        rating: Set(rating),
        text: Set(text),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(review_id = review.review_id, user_id, movie_id, "review added");
    Ok(Review::from(review))
}

pub async fn delete_reviews_by_user<C>(conn: &C, user_id: i32) -> AppResult<u64>
where
    C: ConnectionTrait,
{
    let result = Reviews::delete_many()
        .filter(ReviewCol::UserId.eq(user_id))
        .exec(conn)
        .await?;
    tracing::debug!(user_id, deleted = result.rows_affected, "reviews deleted");
    Ok(result.rows_affected)
}
