use notes_portal::{
    app_state::AppState, config::Config, db, routes, startup, storage::ObjectStorageClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db_pool = db::create_pool(&config.database_url)?;

    let mut conn = db_pool.get()?;
    db::run_migrations(&mut conn)?;
    tracing::info!("Database migrations completed");

    let created = startup::seed_courses(&mut conn, &config.seed_courses)?;
    tracing::info!("Seeded {} new course(s)", created);
    drop(conn);

    let storage_client = ObjectStorageClient::new(
        config.storage_base_url.clone(),
        config.storage_bucket.clone(),
        config.storage_api_key.clone(),
    );

    let state = AppState::new(db_pool, storage_client, config.clone());
    let app = routes::app(state)?;

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
