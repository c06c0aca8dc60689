use std::env;

use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hr_engine::api::{create_router, AppState};
use hr_engine::config::ConfigLoader;

/// Process settings read from the environment.
#[derive(Debug, Clone)]
struct ServerSettings {
    host: String,
    port: u16,
    config_dir: String,
}

impl ServerSettings {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            host: env::var("HR_ENGINE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("HR_ENGINE_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("HR_ENGINE_PORT must be a valid port number"),
            config_dir: env::var("HR_ENGINE_CONFIG_DIR")
                .unwrap_or_else(|_| "./config/default".to_string()),
        }
    }

    fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hr_engine=debug,tower_http=info")),
        )
        .init();

    let settings = ServerSettings::from_env();

    let config = match ConfigLoader::load(&settings.config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %settings.config_dir, error = %err, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    info!(
        name = %config.metadata().name,
        version = %config.metadata().version,
        currency = %config.metadata().currency,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = settings.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");
    info!("HR engine listening on http://{}", addr);

    axum::serve(listener, app).await.expect("Server failed");
}
