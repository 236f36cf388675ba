#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use movie_web_app::{
    db::{create_memory_conn, run_migrations},
    external::{gemini::TextGenClient, omdb::MovieInfoClient},
    state::AppState,
};
use serde_json::{Value, json};

// Nothing listens here, so any outbound call fails fast.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

pub async fn setup_state() -> anyhow::Result<AppState> {
    setup_state_with(UNREACHABLE, UNREACHABLE).await
}

pub async fn setup_state_with(omdb_url: &str, gemini_url: &str) -> anyhow::Result<AppState> {
    let orm = create_memory_conn().await?;
    run_migrations(&orm).await?;

    let timeout = Duration::from_secs(5);
    let movie_info = MovieInfoClient::new(omdb_url, "test-key", timeout)?;
    let text_gen = TextGenClient::new(gemini_url, "test-key", "test-model", timeout)?;
    Ok(AppState::new(orm, movie_info, text_gen))
}

pub async fn spawn_server(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{addr}/"))
}

pub fn omdb_payload(title: &str, director: &str, rating: Option<&str>) -> Value {
    let ratings: Vec<Value> = rating
        .map(|r| vec![json!({ "Source": "Internet Movie Database", "Value": r })])
        .unwrap_or_default();
    json!({
        "Title": title,
        "Year": "2010",
        "Genre": "Action, Sci-Fi",
        "Director": director,
        "Plot": format!("Plot of {title}"),
        "Poster": format!("https://posters.example/{title}.jpg"),
        "Ratings": ratings,
        "Response": "True"
    })
}

async fn fake_omdb(Query(params): Query<HashMap<String, String>>) -> Response {
    let title = params.get("t").cloned().unwrap_or_default();
    match title.as_str() {
        "Inception" => Json(omdb_payload("Inception", "Christopher Nolan", Some("8.8/10"))).into_response(),
        "Tenet" => Json(omdb_payload("Tenet", "Christopher Nolan", None)).into_response(),
        "Broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(json!({ "Response": "False", "Error": "Movie not found!" })).into_response(),
    }
}

/// Movie-info stand-in: knows `Inception` and `Tenet`, fails on `Broken`.
pub async fn spawn_fake_omdb() -> anyhow::Result<String> {
    spawn_server(Router::new().route("/", get(fake_omdb))).await
}

async fn fake_generate(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let text = if prompt.contains("birthday") {
        "17/12/1936".to_string()
    } else if prompt.contains("death day") {
        "alive".to_string()
    } else {
        format!("generated: {prompt}")
    };
    Json(json!({
        "candidates": [ { "content": { "parts": [ { "text": text } ] } } ]
    }))
}

/// Text-generation stand-in that answers every prompt.
pub async fn spawn_fake_gemini() -> anyhow::Result<String> {
    spawn_server(Router::new().route("/v1beta/models/{*rest}", post(fake_generate))).await
}

/// Text-generation stand-in that always fails.
pub async fn spawn_failing_gemini() -> anyhow::Result<String> {
    let router = Router::new().route(
        "/v1beta/models/{*rest}",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    spawn_server(router).await
}
