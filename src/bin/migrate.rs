use movie_web_app::{
    config::DEFAULT_DATABASE_URL,
    db::{create_orm_conn, ensure_sqlite_dir, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    ensure_sqlite_dir(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    println!("Tables created in the database.");
    Ok(())
}
