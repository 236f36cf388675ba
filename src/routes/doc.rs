use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        FormView,
        movies::{
            AddMovieForm, AddMovieView, ApiMovieForm, ApiMovieSummary, DeleteMovieForm,
            DeleteMovieView, EnrichmentResponse, MovieInfoView, MovieUpdate, Notice,
            TextGenerationError, UpdateAck, UpdateMovieRequest, UpdateMovieView,
        },
        reviews::{AddReviewForm, ReviewFormView, ReviewWithAuthor},
        users::{CreateUserRequest, UserListView, UserMoviesView, UsersForm},
    },
    external::omdb::MovieData,
    models::{Director, Genre, Movie, Review, User},
    response::{ApiResponse, Meta},
    routes::{api, health, movies, reviews, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::home,
        users::list_users,
        users::manage_users,
        users::add_user_form,
        users::add_user,
        users::user_movies,
        movies::add_movie_form,
        movies::add_movie,
        movies::delete_movie_confirm,
        movies::delete_movie,
        movies::update_movie_form,
        movies::update_movie,
        movies::info_movie,
        reviews::review_form,
        reviews::add_review,
        api::get_users,
        api::create_user,
        api::get_user_favorite_movies,
        api::add_movie_for_user,
        api::update_movie,
        api::remove_user_movie
    ),
    components(
        schemas(
            User,
            Movie,
            Director,
            Genre,
            Review,
            MovieData,
            Notice,
            FormView,
            UsersForm,
            CreateUserRequest,
            UserListView,
            UserMoviesView,
            AddMovieForm,
            AddMovieView,
            DeleteMovieForm,
            DeleteMovieView,
            MovieUpdate,
            UpdateMovieRequest,
            UpdateMovieView,
            UpdateAck,
            EnrichmentResponse,
            TextGenerationError,
            MovieInfoView,
            ReviewWithAuthor,
            ReviewFormView,
            AddReviewForm,
            ApiMovieForm,
            ApiMovieSummary,
            Meta,
            ApiResponse<User>,
            ApiResponse<Movie>,
            ApiResponse<UserListView>,
            ApiResponse<UserMoviesView>,
            ApiResponse<MovieInfoView>
        )
    ),
    tags(
        (name = "Health", description = "Health check and home"),
        (name = "Users", description = "User pages"),
        (name = "Movies", description = "Favorite movie pages"),
        (name = "Reviews", description = "Review pages"),
        (name = "Api", description = "JSON API"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
