pub(crate) mod cli;
pub(crate) mod seed;

use api_ui::config::AuthConfig as UIAuthConfig;
use api_ui::config::WebConfig as UIWebConfig;
use api_ui::layers::make_cors_middleware;
use api_ui::router::create_router as create_ui_router;
use api_ui::router::ui_open_api_spec;
use api_ui::state::AppState as UIAppState;
use axum::{Json, Router, routing::get};
use clap::Parser;
use core_executor::{ExecutorConfig, PgQueryExecutor};
use core_hints::{HintConfig, LlmHintService};
use core_history::SlateDBHistoryStore;
use core_utils::Db;
use dotenv::dotenv;
use object_store::path::Path;
use slatedb::{Db as SlateDb, config::DbOptions};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

const TARGETS: [&str; 7] = [
    "sqlcheckd",
    "api_ui",
    "core_checker",
    "core_executor",
    "core_hints",
    "core_history",
    "core_utils",
];

#[tokio::main]
#[allow(clippy::expect_used, clippy::too_many_lines)]
async fn main() {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    let auth_config = UIAuthConfig::new(opts.jwt_secret());
    if !auth_config.is_enabled() {
        tracing::warn!("JWT_SECRET is not set, attempt history endpoints are disabled");
    }
    let web_config = UIWebConfig {
        host: opts.host.clone(),
        port: opts.port,
        allow_origin: opts.cors_allow_origin.clone(),
    };
    let executor_config = ExecutorConfig::new(opts.statement_timeout(), opts.preview_row_limit);
    let hint_config = HintConfig::default().with_api_key(opts.llm_api_key.clone());
    if hint_config.backend().is_none() {
        tracing::warn!("LLM_API_KEY is not configured, hints run in mock mode");
    }

    let object_store = opts
        .object_store_backend()
        .expect("Failed to create object store");
    let db = Db::new(Arc::new(
        SlateDb::open_with_opts(
            Path::from(opts.slatedb_prefix.clone()),
            DbOptions::default(),
            object_store,
        )
        .await
        .expect("Failed to start Slate DB"),
    ));
    let history_store = Arc::new(SlateDBHistoryStore::new(db.clone()));

    if let Some(path) = &opts.assignments_file {
        let added = seed::seed_from_file(history_store.as_ref(), path)
            .await
            .expect("Failed to load assignments");
        tracing::info!(added, path = %path.display(), "Assignments loaded");
    }

    let pool = PgPoolOptions::new()
        .max_connections(opts.pg_max_connections)
        .connect(&opts.database_url)
        .await
        .expect("Failed to connect to PostgreSQL");

    let ui_state = UIAppState::new(
        Arc::new(PgQueryExecutor::new(pool.clone(), executor_config.clone())),
        history_store.clone(),
        history_store,
        Arc::new(LlmHintService::new(hint_config).expect("Failed to create hint service")),
        executor_config.preview_row_limit,
        Arc::new(web_config.clone()),
        Arc::new(auth_config),
    );

    let ui_router = Router::new().nest("/api", create_ui_router().with_state(ui_state));
    let ui_router = match &web_config.allow_origin {
        Some(allow_origin) => ui_router.layer(
            make_cors_middleware(allow_origin).expect("Failed to create CORS middleware"),
        ),
        None => ui_router,
    };

    let router = Router::new()
        .merge(ui_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ui_open_api_spec()))
        .route("/health", get(|| async { Json("OK") }))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(
            executor_config.statement_timeout + std::time::Duration::from_secs(30),
        ))
        .layer(CatchPanicLayer::new())
        .into_make_service_with_connect_info::<SocketAddr>();

    let host = web_config.host.clone();
    let port = web_config.port;
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to get local address");
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(Arc::new(db.clone())))
        .await
        .expect("Failed to start server");

    pool.close().await;
}

fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };
    let level: LevelFilter = opts.tracing_level.clone().into();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(LevelFilter::DEBUG))
                                .with_default(LevelFilter::DEBUG)
                        }
                    },
                    // No var set: use the --tracing-level option
                    _ => Targets::default()
                        .with_targets(targets_with_level(level))
                        .with_default(level),
                }),
        )
        .init();
}

/// This func will wait for a signal to shutdown the service.
/// It will wait for either a Ctrl+C signal or a SIGTERM signal.
///
/// # Panics
/// If the function fails to install the signal handler, it will panic.
#[allow(
    clippy::expect_used,
    clippy::redundant_pub_crate,
    clippy::cognitive_complexity
)]
async fn shutdown_signal(db: Arc<Db>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            db.close().await.expect("Failed to close database");
            tracing::warn!("Ctrl+C received, starting graceful shutdown");
        },
        () = terminate => {
            db.close().await.expect("Failed to close database");
            tracing::warn!("SIGTERM received, starting graceful shutdown");
        },
    }
}
