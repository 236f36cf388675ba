use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    entity::{
        user_movies::{Column as UserMovieCol, Entity as UserMovies},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    models::User,
    services::review_service,
    state::AppState,
};

pub async fn list_users(state: &AppState) -> AppResult<Vec<User>> {
    let users = Users::find()
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(users)
}

/// Case-insensitive (ASCII) substring match on the user name.
pub async fn search_users(state: &AppState, search_name: &str) -> AppResult<Vec<User>> {
    let users = Users::find()
        .filter(UserCol::Name.contains(search_name))
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(users)
}

pub async fn find_user(state: &AppState, id: i32) -> AppResult<Option<User>> {
    let user = Users::find_by_id(id).one(&state.orm).await?.map(User::from);
    Ok(user)
}

pub async fn get_user(state: &AppState, id: i32) -> AppResult<User> {
    match find_user(state, id).await? {
        Some(user) => Ok(user),
        None => Err(AppError::NotFound),
    }
}

pub async fn add_user(state: &AppState, name: &str) -> AppResult<User> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("User name is required".into()));
    }

    let user = UserActive {
        id: NotSet,
        name: Set(name.to_string()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, name = %user.name, "user created");
    Ok(User::from(user))
}

/// Removes the user's reviews and favorites before the user row, all in one transaction.
pub async fn delete_user(state: &AppState, id: i32) -> AppResult<User> {
    let txn = state.orm.begin().await?;

    let user = match Users::find_by_id(id).one(&txn).await? {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };

    let reviews_deleted = review_service::delete_reviews_by_user(&txn, id).await?;
    let favorites_deleted = UserMovies::delete_many()
        .filter(UserMovieCol::UserId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    Users::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        user_id = id,
        reviews_deleted,
        favorites_deleted,
        "user deleted"
    );
    Ok(User::from(user))
}
