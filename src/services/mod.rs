pub mod favorite_service;
pub mod movie_service;
pub mod review_service;
pub mod user_service;
