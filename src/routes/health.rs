use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::response::{ApiResponse, Meta};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct HomeData {
    pub name: String,
    pub description: String,
    pub links: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page", body = ApiResponse<HomeData>),
    ),
    tag = "Health"
)]
pub async fn home() -> Json<ApiResponse<HomeData>> {
    let data = HomeData {
        name: "Movie Web App".to_string(),
        description: "Create users and keep a list of favorite movies.".to_string(),
        links: vec!["/users".to_string(), "/add_user".to_string(), "/docs".to_string()],
    };
    Json(ApiResponse::success("Home", data, None))
}
