use std::sync::Arc;

use auth::Authenticator;
use catalog_service::book::service::BookService;
use catalog_service::config::Config;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use catalog_service::outbound::clients::GeminiClient;
use catalog_service::outbound::clients::GoogleTokenVerifier;
use catalog_service::outbound::clients::MidtransClient;
use catalog_service::outbound::repositories::PostgresBookRepository;
use catalog_service::outbound::repositories::PostgresFavoriteRepository;
use catalog_service::outbound::repositories::PostgresTransactionRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use catalog_service::payment::service::PaymentService;
use catalog_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

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
        http_port = config.server.http_port,
        midtrans_production = config.midtrans.is_production,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let http_client = reqwest::Client::new();

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool.clone()));
    let favorite_repository = Arc::new(PostgresFavoriteRepository::new(pg_pool.clone()));
    let transaction_repository = Arc::new(PostgresTransactionRepository::new(pg_pool));

    let identity_verifier = Arc::new(GoogleTokenVerifier::new(
        http_client.clone(),
        config.google.client_id,
    ));
    let content_generator = Arc::new(GeminiClient::new(http_client.clone(), config.gemini.api_key));
    let payment_gateway = Arc::new(MidtransClient::new(
        http_client,
        config.midtrans.server_key,
        config.midtrans.is_production,
    ));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository.clone(),
            identity_verifier,
        )),
        book_service: Arc::new(BookService::new(
            book_repository,
            favorite_repository,
            content_generator,
        )),
        payment_service: Arc::new(PaymentService::new(
            transaction_repository,
            user_repository,
            payment_gateway,
        )),
        authenticator,
    };

    let address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
