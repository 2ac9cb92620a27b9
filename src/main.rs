//! Student Model API server.
//!
//! Configuration comes from `STUDENT_MODEL__*` environment variables (see
//! [`student_model::config::AppConfig`]). Invalid configuration is fatal.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use student_model::adapters::auth::{JwtConfig, JwtSessionValidator};
use student_model::adapters::http::{build_router, AuthState, HttpSettings, LearningHandlers};
use student_model::adapters::learning::{
    InMemoryKnowledgeStateRepository, InMemoryLearningProfileRepository,
    PostgresKnowledgeStateRepository, PostgresLearningProfileRepository,
};
use student_model::config::{AppConfig, AuthConfig, DatabaseConfig, StorageBackend};
use student_model::ports::{KnowledgeStateRepository, LearningProfileRepository};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        backend = ?config.database.backend,
        "Starting student model service"
    );

    let (profiles, knowledge) = build_repositories(&config.database).await?;
    let validator: AuthState = Arc::new(build_validator(&config.auth)?);
    let handlers = LearningHandlers::from_repositories(profiles, knowledge);

    let settings = HttpSettings {
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = build_router(handlers, validator, &settings);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_repositories(
    database: &DatabaseConfig,
) -> Result<
    (
        Arc<dyn LearningProfileRepository>,
        Arc<dyn KnowledgeStateRepository>,
    ),
    BoxError,
> {
    match database.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory profile storage; data is lost on restart");
            Ok((
                Arc::new(InMemoryLearningProfileRepository::new()),
                Arc::new(InMemoryKnowledgeStateRepository::new()),
            ))
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .min_connections(database.min_connections)
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .idle_timeout(database.idle_timeout())
                .max_lifetime(database.max_lifetime())
                .connect(&database.url)
                .await?;

            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database migrations applied");
            }

            Ok((
                Arc::new(PostgresLearningProfileRepository::new(pool.clone())),
                Arc::new(PostgresKnowledgeStateRepository::new(pool)),
            ))
        }
    }
}

fn build_validator(auth: &AuthConfig) -> Result<JwtSessionValidator, BoxError> {
    let mut jwt = JwtConfig::new(auth.jwt_secret.clone()).with_leeway(auth.leeway_secs);
    if let Some(issuer) = &auth.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }
    if let Some(audience) = &auth.audience {
        jwt = jwt.with_audience(audience.clone());
    }
    Ok(JwtSessionValidator::new(jwt)?)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
