use crate::{
    db::{DbPool, OrmConn},
    external::{gemini::TextGenClient, omdb::MovieInfoClient},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub movie_info: MovieInfoClient,
    pub text_gen: TextGenClient,
}

impl AppState {
    /// The sqlx pool is the one backing `orm`, so raw queries and ORM calls share connections.
    pub fn new(orm: OrmConn, movie_info: MovieInfoClient, text_gen: TextGenClient) -> Self {
        let pool = orm.get_sqlite_connection_pool().clone();
        Self {
            pool,
            orm,
            movie_info,
            text_gen,
        }
    }
}
