use std::sync::Arc;

use camp_manager::{
    app_state::AppState,
    get_postgres_pool,
    services::data_stores::{
        HashmapCampStore, HashmapRoomStore, HashmapWorkerStore, JsonFileStore,
        PostgresCampStore, PostgresRoomStore, PostgresWorkerStore,
    },
    utils::{
        constants::{APP_ADDRESS, DATABASE_URL, DATA_FILE, STORE_BACKEND},
        tracing::init_tracing,
    },
    Application,
};
use color_eyre::eyre::{bail, Result, WrapErr};
use sqlx::PgPool;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialise tracing");

    let app_state = configure_app_state()
        .await
        .expect("Failed to configure data stores");

    let app = Application::build(app_state, &APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}

async fn configure_app_state() -> Result<AppState> {
    tracing::info!("Using {} store backend", STORE_BACKEND.as_str());

    let app_state = match STORE_BACKEND.as_str() {
        "memory" => AppState::new(
            Arc::new(RwLock::new(HashmapCampStore::default())),
            Arc::new(RwLock::new(HashmapRoomStore::default())),
            Arc::new(RwLock::new(HashmapWorkerStore::default())),
        ),
        "json" => {
            let store = JsonFileStore::open(DATA_FILE.as_str())
                .await
                .wrap_err("Failed to open JSON data file")?;
            AppState::new(
                Arc::new(RwLock::new(store.clone())),
                Arc::new(RwLock::new(store.clone())),
                Arc::new(RwLock::new(store)),
            )
        }
        "postgres" => {
            let pg_pool = configure_postgresql().await?;
            AppState::new(
                Arc::new(RwLock::new(PostgresCampStore::new(pg_pool.clone()))),
                Arc::new(RwLock::new(PostgresRoomStore::new(pg_pool.clone()))),
                Arc::new(RwLock::new(PostgresWorkerStore::new(pg_pool))),
            )
        }
        other => bail!("Unknown store backend: {other}"),
    };

    Ok(app_state)
}

async fn configure_postgresql() -> Result<PgPool> {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}
