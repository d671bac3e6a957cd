use std::sync::Arc;

use auth::Authenticator;
use catalog_service::config::Config;
use catalog_service::config::StorageBackend;
use catalog_service::domain::product::ports::ProductRepository;
use catalog_service::domain::product::ports::ProductServicePort;
use catalog_service::domain::product::service::ProductService;
use catalog_service::domain::user::bootstrap::ensure_seed_user;
use catalog_service::domain::user::models::SeedUser;
use catalog_service::domain::user::models::Username;
use catalog_service::domain::user::ports::AuthServicePort;
use catalog_service::domain::user::ports::UserRepository;
use catalog_service::domain::user::service::AuthService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::InMemoryProductRepository;
use catalog_service::outbound::repositories::InMemoryUserRepository;
use catalog_service::outbound::repositories::PostgresProductRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Services = (Arc<dyn ProductServicePort>, Arc<dyn AuthServicePort>);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.expiration_seconds,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let (product_service, auth_service) = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresProductRepository::new(pg_pool.clone())),
                Arc::new(PostgresUserRepository::new(pg_pool)),
                Arc::clone(&authenticator),
                &config,
            )
            .await?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");

            build_services(
                Arc::new(InMemoryProductRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                Arc::clone(&authenticator),
                &config,
            )
            .await?
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(product_service, auth_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

/// Seed the bootstrap account and wire the domain services onto the given stores.
async fn build_services<PR, UR>(
    product_repository: Arc<PR>,
    user_repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    config: &Config,
) -> Result<Services, anyhow::Error>
where
    PR: ProductRepository,
    UR: UserRepository,
{
    let seed = SeedUser {
        username: Username::new(config.bootstrap.username.clone())?,
        password: config.bootstrap.password.clone(),
    };
    let created =
        ensure_seed_user(user_repository.as_ref(), authenticator.password_hasher(), &seed).await?;
    tracing::info!(username = %seed.username, created, "Bootstrap account checked");

    let token_ttl = chrono::Duration::seconds(config.jwt.expiration_seconds);

    let product_service: Arc<dyn ProductServicePort> =
        Arc::new(ProductService::new(product_repository));
    let auth_service: Arc<dyn AuthServicePort> =
        Arc::new(AuthService::new(user_repository, authenticator, token_ttl));

    Ok((product_service, auth_service))
}
