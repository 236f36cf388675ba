pub mod directors;
pub mod genres;
pub mod movie_genres;
pub mod movies;
pub mod reviews;
pub mod user_movies;
pub mod users;

pub use directors::Entity as Directors;
pub use genres::Entity as Genres;
pub use movie_genres::Entity as MovieGenres;
pub use movies::Entity as Movies;
pub use reviews::Entity as Reviews;
pub use user_movies::Entity as UserMovies;
pub use users::Entity as Users;
