mod common;

use movie_web_app::{
    dto::movies::MovieUpdate,
    entity::{
        movies::Entity as Movies,
        reviews::{Column as ReviewCol, Entity as Reviews},
        user_movies::Entity as UserMovies,
        users::Entity as Users,
    },
    error::AppError,
    external::omdb::{MovieData, Rating},
    models::Movie,
    services::{favorite_service, movie_service, review_service, user_service},
    state::AppState,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

async fn stored_movie(state: &AppState, user_id: i32, title: &str) -> anyhow::Result<Movie> {
    let data = MovieData {
        poster: "N/A".into(),
        title: title.to_string(),
        year: "1979".into(),
        genre: "Horror".into(),
        director: "Ridley Scott".into(),
        rating: Some(Rating::Score(8.5)),
        description: "In space no one can hear you scream.".into(),
    };
    let outcome = favorite_service::reconcile_favorite(state, user_id, &data).await?;
    Ok(outcome.movie().cloned().expect("movie stored"))
}

#[tokio::test]
async fn reviews_come_back_newest_first() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let movie = stored_movie(&state, user.id, "Alien").await?;

    let mut ids = Vec::new();
    for (rating, text) in [(3, "fine"), (5, "classic"), (4, "tense")] {
        let review =
            review_service::add_review(&state, user.id, movie.id, Some(rating), Some(text.into()))
                .await?;
        ids.push(review.review_id);
    }

    let listed: Vec<i32> = review_service::list_reviews(&state, movie.id)
        .await?
        .into_iter()
        .map(|r| r.review_id)
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
    Ok(())
}

#[tokio::test]
async fn reviews_carry_author_names() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let ada = user_service::add_user(&state, "Ada").await?;
    let grace = user_service::add_user(&state, "Grace").await?;
    let movie = stored_movie(&state, ada.id, "Alien").await?;

    review_service::add_review(&state, ada.id, movie.id, Some(5), None).await?;
    review_service::add_review(&state, grace.id, movie.id, None, Some("too scary".into())).await?;

    let reviews = review_service::movie_reviews(&state, movie.id).await?;
    let authors: Vec<&str> = reviews.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["Grace", "Ada"]);
    assert_eq!(reviews[0].review.text.as_deref(), Some("too scary"));
    assert_eq!(reviews[1].review.rating, Some(5));
    Ok(())
}

#[tokio::test]
async fn review_needs_existing_user_and_movie() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;

    let err = review_service::add_review(&state, user.id, 77, Some(1), None)
        .await
        .expect_err("movie does not exist");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn deleting_user_removes_reviews_and_favorites_only() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let ada = user_service::add_user(&state, "Ada").await?;
    let grace = user_service::add_user(&state, "Grace").await?;
    let movie = stored_movie(&state, ada.id, "Alien").await?;
    favorite_service::connect_user_movie(&state, grace.id, movie.id).await?;

    review_service::add_review(&state, ada.id, movie.id, Some(5), Some("mine".into())).await?;
    review_service::add_review(&state, ada.id, movie.id, Some(4), Some("again".into())).await?;
    review_service::add_review(&state, grace.id, movie.id, Some(3), Some("theirs".into())).await?;

    let deleted = user_service::delete_user(&state, ada.id).await?;
    assert_eq!(deleted.name, "Ada");

    let ada_reviews = Reviews::find()
        .filter(ReviewCol::UserId.eq(ada.id))
        .count(&state.orm)
        .await?;
    assert_eq!(ada_reviews, 0);
    assert_eq!(Reviews::find().count(&state.orm).await?, 1);
    assert_eq!(UserMovies::find().count(&state.orm).await?, 1);
    assert_eq!(Movies::find().count(&state.orm).await?, 1);
    assert!(user_service::find_user(&state, ada.id).await?.is_none());

    let err = user_service::delete_user(&state, ada.id)
        .await
        .expect_err("already deleted");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn field_merge_only_applies_filled_values() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let movie = stored_movie(&state, user.id, "Alien").await?;

    let update = MovieUpdate {
        description: Some(String::new()),
        rating: Some("9.9".into()),
        genre: None,
        bio: Some("British director.".into()),
        birth: Some("30/11/1937".into()),
        death: Some(String::new()),
    };
    let (updated, director) = movie_service::update_info(&state, movie.id, update).await?;

    assert_eq!(updated.rating.as_deref(), Some("9.9"));
    assert_eq!(updated.genre.as_deref(), Some("Horror"));
    assert_eq!(
        updated.description.as_deref(),
        Some("In space no one can hear you scream.")
    );
    assert_eq!(director.bio.as_deref(), Some("British director."));
    assert_eq!(director.birth.as_deref(), Some("30/11/1937"));
    assert_eq!(director.death, None);

    let (reloaded, _) = movie_service::get_movie_with_director(&state, movie.id).await?;
    assert_eq!(reloaded, updated);
    Ok(())
}

#[tokio::test]
async fn empty_merge_changes_nothing() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let movie = stored_movie(&state, user.id, "Alien").await?;

    let (unchanged, _) =
        movie_service::update_info(&state, movie.id, MovieUpdate::default()).await?;
    assert_eq!(unchanged, movie);

    let err = movie_service::update_info(&state, 404, MovieUpdate::default())
        .await
        .expect_err("unknown movie");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn blank_user_name_is_refused() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let err = user_service::add_user(&state, "   ")
        .await
        .expect_err("blank name");
    assert!(matches!(err, AppError::BadRequest(_)));

    user_service::add_user(&state, "Ada Lovelace").await?;
    user_service::add_user(&state, "Grace Hopper").await?;
    let found = user_service::search_users(&state, "love").await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ada Lovelace");
    Ok(())
}

#[tokio::test]
async fn review_of_vanished_user_shows_placeholder() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let ada = user_service::add_user(&state, "Ada").await?;
    let grace = user_service::add_user(&state, "Grace").await?;
    let movie = stored_movie(&state, ada.id, "Alien").await?;
    review_service::add_review(&state, grace.id, movie.id, Some(2), Some("gone".into())).await?;
    review_service::add_review(&state, ada.id, movie.id, Some(5), Some("still here".into())).await?;

    // Drop the user row directly, leaving the review behind.
    state.orm.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
    Users::delete_by_id(grace.id).exec(&state.orm).await?;

    let reviews = review_service::movie_reviews(&state, movie.id).await?;
    let authors: Vec<&str> = reviews.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["Ada", "No user"]);
    assert_eq!(reviews[1].review.text.as_deref(), Some("gone"));
    Ok(())
}
