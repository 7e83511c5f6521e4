#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use category_service::api::routes::AppState;
use category_service::application::CategoryService;
use category_service::domain::CategoryId;
use category_service::infrastructure::db::migrations::run_migrations;
use category_service::infrastructure::product_gateway::ProductGateway;
use category_service::infrastructure::repositories::CategoryRepository;
use once_cell::sync::Lazy;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::Connection;
use tokio::sync::{Mutex, MutexGuard};

pub mod fixtures;
pub mod mocks;

static TEST_DB_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestDb {
    pool: PgPool,
    _db_lock_conn: PgConnection,
    _lock: MutexGuard<'static, ()>,
}

impl TestDb {
    /// Connects to the test database, migrates it and empties it.
    /// Returns `None` when no database url is set outside CI.
    pub async fn new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = env::var("TEST_DATABASE_URL")
            .ok()
            .or_else(|| env::var("DATABASE_URL").ok());

        let url = match url {
            Some(u) => u,
            None => {
                if env::var("CI").is_ok() {
                    panic!(
                        "DATABASE_URL or TEST_DATABASE_URL not set in CI. \
                        Integration tests require a database connection."
                    );
                }
                eprintln!("Skipping test: DATABASE_URL or TEST_DATABASE_URL not set (run locally)");
                return None;
            }
        };

        let lock = Lazy::force(&TEST_DB_MUTEX).lock().await;

        // Serializes resets across test binaries.
        let mut db_lock_conn = PgConnection::connect(&url).await.ok()?;
        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(42_i64)
            .execute(&mut db_lock_conn)
            .await
            .ok()?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .ok()?;

        run_migrations(&pool).await.ok()?;
        reset_database(&pool).await.ok()?;

        Some(Self {
            pool,
            _db_lock_conn: db_lock_conn,
            _lock: lock,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub async fn insert_category(
    pool: &PgPool,
    name: &str,
    parent_id: Option<CategoryId>,
) -> Result<CategoryId, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO categories (name, parent_id) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(parent_id)
        .fetch_one(pool)
        .await
}

/// App state over the given collaborators; the pool points at a closed port
/// and never connects.
pub fn app_state(
    category_repo: Arc<dyn CategoryRepository>,
    product_gateway: Arc<dyn ProductGateway>,
) -> AppState {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://127.0.0.1:1/category_service_test")
        .expect("lazy pool should be created");

    AppState {
        category_service: Arc::new(CategoryService::new(category_repo, product_gateway)),
        db_pool: pool,
    }
}

async fn reset_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE categories RESTART IDENTITY CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}
