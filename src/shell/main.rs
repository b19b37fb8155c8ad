use anyhow::Context;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, Router, response::Html, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use job_bookmarks::shared::core::clock::SystemClock;
use job_bookmarks::shared::infrastructure::key_value_store::KeyValueStore;
use job_bookmarks::shared::infrastructure::key_value_store::file_system::FileKeyValueStore;
use job_bookmarks::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use job_bookmarks::shell::config::{Config, StorageKind};
use job_bookmarks::shell::graphql::{AppSchema, build_schema};
use job_bookmarks::shell::http::router;
use job_bookmarks::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;

    let storage: Arc<dyn KeyValueStore> = match config.storage {
        StorageKind::File => Arc::new(
            FileKeyValueStore::open(config.data_dir.clone())
                .await
                .with_context(|| format!("opening data dir {}", config.data_dir.display()))?,
        ),
        StorageKind::Memory => Arc::new(InMemoryKeyValueStore::new()),
    };

    let state = AppState::new(storage, Arc::new(SystemClock));

    // A failed first load is not fatal: the store stays dirty and retries on the next mutation.
    if let Err(err) = state.store.refresh().await {
        tracing::warn!(error = %err, cause = ?err, "initial bookmark load failed");
    }

    let schema = build_schema(state.clone());

    let app = Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .merge(router(state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    tracing::info!(storage = ?config.storage, "GraphQL endpoint: http://{}/gql", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
