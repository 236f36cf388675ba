mod common;

use movie_web_app::{
    entity::{
        directors::Entity as Directors,
        movies::{Column as MovieCol, Entity as Movies},
        user_movies::{Column as UserMovieCol, Entity as UserMovies},
    },
    external::omdb::{MovieData, Rating},
    services::{favorite_service, movie_service, user_service},
    state::AppState,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait};

fn movie(title: &str, director: &str) -> MovieData {
    MovieData {
        poster: format!("https://posters.example/{title}.jpg"),
        title: title.to_string(),
        year: "1995".into(),
        genre: "Crime, Drama".into(),
        director: director.to_string(),
        rating: Some(Rating::Score(8.3)),
        description: format!("Plot of {title}"),
    }
}

async fn links_between(state: &AppState, user_id: i32, movie_id: i32) -> anyhow::Result<u64> {
    let count = UserMovies::find()
        .filter(UserMovieCol::UserId.eq(user_id))
        .filter(UserMovieCol::MovieId.eq(movie_id))
        .count(&state.orm)
        .await?;
    Ok(count)
}

#[tokio::test]
async fn favoriting_twice_keeps_one_link() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let heat = movie("Heat", "Michael Mann");

    let first = favorite_service::reconcile_favorite(&state, user.id, &heat).await?;
    let created = match first {
        favorite_service::FavoriteOutcome::Created { movie, director } => {
            assert_eq!(director.name.as_deref(), Some("Michael Mann"));
            assert_eq!(movie.director_id, director.id);
            assert_eq!(movie.rating.as_deref(), Some("8.3"));
            movie
        }
        other => panic!("expected a new movie, got {other:?}"),
    };

    let second = favorite_service::reconcile_favorite(&state, user.id, &heat).await?;
    assert_eq!(
        second,
        favorite_service::FavoriteOutcome::AlreadyInList(created.clone())
    );
    assert_eq!(links_between(&state, user.id, created.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn known_title_is_shared_between_users() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let ada = user_service::add_user(&state, "Ada").await?;
    let grace = user_service::add_user(&state, "Grace").await?;
    let heat = movie("Heat", "Michael Mann");

    favorite_service::reconcile_favorite(&state, ada.id, &heat).await?;
    let outcome = favorite_service::reconcile_favorite(&state, grace.id, &heat).await?;
    let linked = match outcome {
        favorite_service::FavoriteOutcome::Linked(movie) => movie,
        other => panic!("expected a link to the stored movie, got {other:?}"),
    };

    let rows = Movies::find()
        .filter(MovieCol::Title.eq("Heat"))
        .count(&state.orm)
        .await?;
    assert_eq!(rows, 1);
    assert_eq!(links_between(&state, ada.id, linked.id).await?, 1);
    assert_eq!(links_between(&state, grace.id, linked.id).await?, 1);
    assert_eq!(Directors::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn title_match_is_exact() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;

    favorite_service::reconcile_favorite(&state, user.id, &movie("Heat", "Michael Mann")).await?;
    let outcome =
        favorite_service::reconcile_favorite(&state, user.id, &movie("heat", "Michael Mann")).await?;

    assert!(matches!(
        outcome,
        favorite_service::FavoriteOutcome::Created { .. }
    ));
    assert_eq!(Movies::find().count(&state.orm).await?, 2);
    Ok(())
}

#[tokio::test]
async fn not_found_sentinel_is_never_stored() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;

    let outcome =
        favorite_service::reconcile_favorite(&state, user.id, &MovieData::not_found()).await?;

    assert_eq!(outcome, favorite_service::FavoriteOutcome::NotFound);
    assert_eq!(Movies::find().count(&state.orm).await?, 0);
    assert_eq!(Directors::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_user_is_rejected_without_writes() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let outcome = favorite_service::reconcile_favorite(&state, 42, &movie("Heat", "Michael Mann")).await?;

    assert_eq!(outcome, favorite_service::FavoriteOutcome::Rejected);
    assert_eq!(Movies::find().count(&state.orm).await?, 0);
    assert!(!favorite_service::connect_user_movie(&state, 42, 1).await?);
    Ok(())
}

#[tokio::test]
async fn connect_requires_existing_movie() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;

    assert!(!favorite_service::connect_user_movie(&state, user.id, 99).await?);
    assert_eq!(UserMovies::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn removing_favorite_keeps_movie_and_director() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let outcome =
        favorite_service::reconcile_favorite(&state, user.id, &movie("Heat", "Michael Mann")).await?;
    let stored = outcome.movie().cloned().expect("stored movie");

    assert!(favorite_service::remove_favorite(&state, user.id, stored.id).await?);
    assert!(!favorite_service::remove_favorite(&state, user.id, stored.id).await?);

    assert_eq!(links_between(&state, user.id, stored.id).await?, 0);
    let (movie, director) = movie_service::get_movie_with_director(&state, stored.id).await?;
    assert_eq!(movie.title, "Heat");
    assert_eq!(director.name.as_deref(), Some("Michael Mann"));
    Ok(())
}

#[tokio::test]
async fn favorites_are_listed_newest_first() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    for title in ["Heat", "Alien", "Brazil"] {
        favorite_service::reconcile_favorite(&state, user.id, &movie(title, "Someone")).await?;
    }

    let titles: Vec<String> = favorite_service::list_user_movies(&state, user.id)
        .await?
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, vec!["Brazil", "Alien", "Heat"]);
    Ok(())
}

#[tokio::test]
async fn each_new_movie_gets_its_own_director_row() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;

    favorite_service::reconcile_favorite(&state, user.id, &movie("Inception", "Christopher Nolan")).await?;
    favorite_service::reconcile_favorite(&state, user.id, &movie("Tenet", "Christopher Nolan")).await?;

    assert_eq!(Directors::find().count(&state.orm).await?, 2);
    Ok(())
}

#[tokio::test]
async fn new_movie_is_linked_to_its_genres() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let heat = favorite_service::reconcile_favorite(&state, user.id, &movie("Heat", "Michael Mann"))
        .await?
        .movie()
        .cloned()
        .expect("movie");
    let casino = favorite_service::reconcile_favorite(&state, user.id, &movie("Casino", "Martin Scorsese"))
        .await?
        .movie()
        .cloned()
        .expect("movie");

    let names: Vec<Option<String>> = movie_service::movie_genres(&state, heat.id)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&Some("Crime".to_string())));
    assert!(names.contains(&Some("Drama".to_string())));

    // Genre rows are shared between movies.
    let casino_genres = movie_service::movie_genres(&state, casino.id).await?;
    let heat_genres = movie_service::movie_genres(&state, heat.id).await?;
    let mut casino_ids: Vec<i32> = casino_genres.iter().map(|g| g.id).collect();
    let mut heat_ids: Vec<i32> = heat_genres.iter().map(|g| g.id).collect();
    casino_ids.sort_unstable();
    heat_ids.sort_unstable();
    assert_eq!(casino_ids, heat_ids);
    Ok(())
}

#[tokio::test]
async fn missing_rating_is_stored_as_placeholder() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;
    let mut data = movie("Heat", "Michael Mann");
    data.rating = Some(Rating::NotAvailable);

    let stored = favorite_service::reconcile_favorite(&state, user.id, &data)
        .await?
        .movie()
        .cloned()
        .expect("movie");
    assert_eq!(stored.rating.as_deref(), Some("N/A"));
    Ok(())
}

#[tokio::test]
async fn padded_title_is_stored_and_matched_unchanged() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = user_service::add_user(&state, "Ada").await?;

    favorite_service::reconcile_favorite(&state, user.id, &movie("Heat", "Michael Mann")).await?;
    let padded = favorite_service::reconcile_favorite(&state, user.id, &movie(" Heat ", "Michael Mann"))
        .await?;
    let stored = match padded {
        favorite_service::FavoriteOutcome::Created { movie, .. } => movie,
        other => panic!("expected a separate movie, got {other:?}"),
    };
    assert_eq!(stored.title, " Heat ");

    let again = favorite_service::reconcile_favorite(&state, user.id, &movie(" Heat ", "Michael Mann"))
        .await?;
    assert_eq!(
        again,
        favorite_service::FavoriteOutcome::AlreadyInList(stored.clone())
    );
    let found = favorite_service::find_movie_by_title(&state, " Heat ").await?;
    assert_eq!(found.map(|m| m.id), Some(stored.id));
    assert_eq!(Movies::find().count(&state.orm).await?, 2);
    Ok(())
}

#[tokio::test]
async fn duplicate_title_insert_is_skipped_and_rolled_back() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let heat = movie("Heat", "Michael Mann");

    let txn = state.orm.begin().await?;
    let director = favorite_service::add_director(&txn, &heat.director).await?;
    let first = favorite_service::add_movie(&txn, director.id, &heat).await?;
    txn.commit().await?;
    let first = first.expect("first insert stores the movie");

    let txn = state.orm.begin().await?;
    let late_director = favorite_service::add_director(&txn, &heat.director).await?;
    let second = favorite_service::add_movie(&txn, late_director.id, &heat).await?;
    assert!(second.is_none());
    txn.rollback().await?;

    assert_eq!(Movies::find().count(&state.orm).await?, 1);
    assert_eq!(Directors::find().count(&state.orm).await?, 1);
    let stored = favorite_service::find_movie_by_title(&state, "Heat").await?;
    assert_eq!(stored, Some(first));
    Ok(())
}
