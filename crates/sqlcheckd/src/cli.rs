use clap::{Parser, ValueEnum};
use object_store::{ObjectStore, Result as ObjectStoreResult, local::LocalFileSystem, memory::InMemory};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        long,
        env = "BIND_HOST",
        default_value = "localhost",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(
        long,
        env = "BIND_PORT",
        default_value = "3001",
        help = "Port to bind to"
    )]
    pub port: u16,

    #[arg(
        long,
        env = "PG_URI",
        hide_env_values = true,
        help = "Connection string of the sandbox PostgreSQL database",
        help_heading = "Sandbox Database Options"
    )]
    pub database_url: String,

    #[arg(
        long,
        env = "PG_MAX_CONNECTIONS",
        default_value = "10",
        help = "Size of the sandbox connection pool",
        help_heading = "Sandbox Database Options"
    )]
    pub pg_max_connections: u32,

    #[arg(
        long,
        env = "STATEMENT_TIMEOUT_MS",
        default_value = "5000",
        help = "Statement timeout applied to every submitted query",
        help_heading = "Sandbox Database Options"
    )]
    pub statement_timeout_ms: u64,

    #[arg(
        long,
        env = "PREVIEW_ROW_LIMIT",
        default_value = "100",
        help = "Rows returned by a table preview",
        help_heading = "Sandbox Database Options"
    )]
    pub preview_row_limit: u32,

    #[arg(
        short,
        long,
        value_enum,
        env = "OBJECT_STORE_BACKEND",
        default_value = "memory",
        help = "Backend to use for assignments and attempts"
    )]
    backend: StoreBackend,

    #[arg(
        long,
        env = "FILE_STORAGE_PATH",
        required_if_eq("backend", "file"),
        help_heading = "File Backend Options",
        help = "Path to the directory where files will be stored"
    )]
    file_storage_path: Option<PathBuf>,

    #[arg(short, long, env = "SLATEDB_PREFIX", default_value = "state")]
    pub slatedb_prefix: String,

    // should unset JWT_SECRET env var after loading
    #[arg(
        long,
        env = "JWT_SECRET",
        hide_env_values = true,
        help = "JWT secret for auth"
    )]
    jwt_secret: Option<String>,

    #[arg(
        long,
        env = "LLM_API_KEY",
        hide_env_values = true,
        help = "Gemini or OpenAI api key for hints, mock hints when unset"
    )]
    pub llm_api_key: Option<String>,

    #[arg(long, env = "CORS_ALLOW_ORIGIN", help = "CORS Allow Origin")]
    pub cors_allow_origin: Option<String>,

    #[arg(
        long,
        env = "ASSIGNMENTS_FILE",
        help = "YAML file with assignments loaded at startup"
    )]
    pub assignments_file: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overrided by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum StoreBackend {
    File,
    Memory,
}

impl CliOpts {
    pub fn object_store_backend(&self) -> ObjectStoreResult<Arc<dyn ObjectStore>> {
        match (self.backend, &self.file_storage_path) {
            (StoreBackend::File, Some(path)) => {
                if !path.is_dir() {
                    fs::create_dir_all(path).map_err(|err| object_store::Error::Generic {
                        store: "LocalFileSystem",
                        source: Box::new(err),
                    })?;
                }
                LocalFileSystem::new_with_prefix(path).map(|fs| Arc::new(fs) as Arc<dyn ObjectStore>)
            }
            // clap requires the path for the file backend
            (StoreBackend::File, None) | (StoreBackend::Memory, _) => {
                Ok(Arc::new(InMemory::new()) as Arc<dyn ObjectStore>)
            }
        }
    }

    #[must_use]
    pub const fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    // method resets a secret env
    pub fn jwt_secret(&self) -> String {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        self.jwt_secret.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TracingLevel {
    Off,
    Info,
    Debug,
    Trace,
}

#[allow(clippy::from_over_into)]
impl Into<LevelFilter> for TracingLevel {
    fn into(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
