//! Fixtures shared by the database-backed tests.

use crate::app_state::AppState;
use crate::config::Config;
use crate::db::{create_pool, run_migrations, DbPool};
use crate::storage::ObjectStorageClient;

pub fn create_test_config(storage_base_url: &str) -> Config {
    Config {
        database_url: std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/notes_portal_test".to_string()),
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_base_url: storage_base_url.trim_end_matches('/').to_string(),
        storage_api_key: "test-key".to_string(),
        storage_bucket: "notes".to_string(),
        cors_allowed_origin: "http://localhost:3000".to_string(),
        max_file_size_bytes: 1024,
        seed_courses: vec!["Intro Biology".to_string(), "Linear Algebra".to_string()],
    }
}

pub fn setup_test_db(config: &Config) -> DbPool {
    let pool = create_pool(&config.database_url).expect("Failed to create test pool");
    let mut conn = pool.get().expect("Failed to get connection");

    run_migrations(&mut conn).expect("Failed to run migrations");

    pool
}

pub fn create_test_app_state(storage_base_url: &str) -> AppState {
    let config = create_test_config(storage_base_url);
    let db_pool = setup_test_db(&config);
    let storage_client = ObjectStorageClient::new(
        config.storage_base_url.clone(),
        config.storage_bucket.clone(),
        config.storage_api_key.clone(),
    );

    AppState::new(db_pool, storage_client, config)
}

pub fn cleanup_test_db(pool: &DbPool) {
    use diesel::prelude::*;

    let mut conn = pool.get().expect("Failed to get connection");

    diesel::sql_query("TRUNCATE TABLE links, files, courses RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .ok();
}
