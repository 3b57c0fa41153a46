use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};
use config::{ApiConfig, StoreKind};
use devblog_lib::{
    db::content_db::ContentDB,
    errors::StoreError,
    repos::{r_memory::MemoryPostsRepo, r_posts::PostsRepo, r_posts::PostsStore},
};
use state::AppState;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument, trace, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod config;
pub mod constants;
pub mod controllers;
pub mod errors;
pub mod middleware;
pub mod state;
pub mod utils;

use controllers::{
    c_admin::{delete_blog, method_not_allowed, update_blog},
    c_posts::{get_post, get_posts, get_slugs},
};
use middleware::log_gateway_errors;

#[tokio::main]
async fn main() {
    // initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    trace!("tracing subscriber initialized");

    let config = ApiConfig::load().expect("Unable to load configuration.");

    let store = connect_to_store(&config).await;
    let state = AppState::new(store, config.admin_tokens());

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .expect("CORS origin is not a valid header value.");

    // build our application
    let app = init_api(state, cors_origin);

    // run our app
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Host and port do not form a socket address.");
    serve(app, addr).await;
}

#[instrument(skip(config))]
async fn connect_to_store(config: &ApiConfig) -> Arc<dyn PostsStore> {
    match config.store {
        StoreKind::Surreal => {
            let db = ContentDB::connect((&config.db).into())
                .await
                .expect("Unable to connect to database. Is it running?");

            info!("connected to content store at {}", config.db.address);
            Arc::new(PostsRepo::new(db))
        }
        StoreKind::Memory => {
            warn!("using the in-memory store, changes will not outlive this process");
            let repo = memory_store(config).expect("Unable to load the seed file.");
            Arc::new(repo)
        }
    }
}

/// Builds the in-memory store, filled from `seed_file` when one is configured.
fn memory_store(config: &ApiConfig) -> Result<MemoryPostsRepo, StoreError> {
    let repo = MemoryPostsRepo::new();

    match &config.seed_file {
        Some(path) => {
            repo.seed_from_file(path)?;
        }
        None => warn!("no seed file configured, the in-memory store starts empty"),
    }

    Ok(repo)
}

pub fn init_api(state: AppState, cors_origin: HeaderValue) -> Router {
    // configure cors
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        // admin mutation routes, guarded by the shared secrets in the body
        .route(
            "/api/blogs/update",
            post(update_blog).fallback(method_not_allowed),
        )
        .route(
            "/api/blogs/delete",
            delete(delete_blog).fallback(method_not_allowed),
        )
        //
        // anonymous public posts routes
        .route("/api/posts", get(get_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/slugs", get(get_slugs))
        //
        .layer(from_fn(log_gateway_errors))
        .layer(TraceLayer::new_for_http())
        // ^^ CORS layer ^^
        .layer(cors)
        .with_state(state)
}

#[instrument(skip(app))]
async fn serve(app: Router, addr: SocketAddr) {
    let listener = TcpListener::bind(addr)
        .await
        .expect("Unable to bind the listen address.");
    info!("listening on {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Server stopped unexpectedly.");
}

#[cfg(test)]
mod tests {
    use devblog_lib::models::post::{Post, Slug};
    use serde_json::json;

    use super::*;

    fn seed_post(id: &str, slug: &str) -> Post {
        Post {
            id: id.into(),
            title: format!("Title of {}", slug),
            slug: Slug {
                current: slug.into(),
            },
            author: String::from("Ada Lovelace"),
            excerpt: String::from("Excerpt"),
            main_image: None,
            content: json!([]),
            published_at: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn memory_store_is_filled_from_the_seed_file() {
        let path =
            std::env::temp_dir().join(format!("devblog-main-seed-{}.json", std::process::id()));
        std::fs::write(
            &path,
            serde_json::to_string(&vec![seed_post("1", "hello-world"), seed_post("2", "second")])
                .unwrap(),
        )
        .unwrap();

        let config = ApiConfig {
            store: StoreKind::Memory,
            seed_file: Some(path.display().to_string()),
            ..Default::default()
        };
        let store = memory_store(&config);
        std::fs::remove_file(&path).unwrap();

        let store = store.unwrap();
        assert_eq!(store.select_slugs().await.unwrap(), vec!["hello-world", "second"]);
        assert_eq!(
            store.select_post_id_by_slug("hello-world").await.unwrap(),
            Some(String::from("1"))
        );
    }

    #[tokio::test]
    async fn memory_store_without_seed_starts_empty() {
        let config = ApiConfig {
            store: StoreKind::Memory,
            ..Default::default()
        };

        let store = memory_store(&config).unwrap();
        assert!(store.select_posts().await.unwrap().is_empty());
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let config = ApiConfig {
            store: StoreKind::Memory,
            seed_file: Some(String::from("/nonexistent/devblog-seed.json")),
            ..Default::default()
        };

        assert!(matches!(
            memory_store(&config),
            Err(StoreError::InvalidSeed(_))
        ));
    }
}
