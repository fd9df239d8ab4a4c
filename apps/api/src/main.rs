use std::net::SocketAddr;
use std::sync::Arc;

use tally_api::config::Config;
use tally_api::graphql::SchemaBuilder;
use tally_api::repositories::{TodoRepository, UserRepository};
use tally_api::routes::app_router;
use tally_api::services::{seed, AuthService, IdentityProvider, PasswordService};
use tally_oauth_client::OAuthClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment,
        ownership = config.access_policy.ownership,
        "Starting Tally API server on port {}",
        config.port
    );

    let users = UserRepository::new();
    let todos = TodoRepository::new();
    let passwords = PasswordService::new(config.password_hash)?;

    let provider: Option<Arc<dyn IdentityProvider>> = match OAuthClient::new(config.oauth.clone()) {
        Ok(client) => {
            if !client.config().has_client_credentials() {
                tracing::warn!(
                    "OAuth client id/secret not set, delegated password login is unavailable"
                );
            }
            tracing::info!(base_url = %client.config().base_url, "Identity provider configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Identity provider disabled");
            None
        }
    };

    if config.seed_sample_data {
        seed::seed_sample_data(&users, &todos, &passwords).await?;
    }

    if let Some(admin) = &config.admin {
        seed::bootstrap_admin(&users, &passwords, &admin.email, &admin.password).await?;
    }

    let auth_service = AuthService::new(users.clone(), passwords, provider);

    let schema = SchemaBuilder::new()
        .users(users)
        .todos(todos)
        .auth_service(auth_service)
        .access_policy(config.access_policy)
        .build()?;
    tracing::info!("GraphQL schema built");

    let app = app_router(schema);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL Playground available at http://{}:{}/graphql/playground",
        addr.ip(),
        addr.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
