use std::env;
use std::error::Error;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::service::SeedData;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/co_2025";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    let jurisdiction = config.jurisdiction();
    info!(
        config_dir = %config_dir,
        jurisdiction = %jurisdiction.code,
        effective_year = jurisdiction.effective_year,
        "Loaded payroll rules"
    );

    let seed = match env::var("PAYROLL_SEED_FILE") {
        Ok(path) => {
            let seed = SeedData::load(&path)?;
            info!(
                seed_file = %path,
                employees = seed.employees.len(),
                periods = seed.periods.len(),
                "Loaded seed data"
            );
            seed
        }
        Err(_) => SeedData::default(),
    };

    let app = create_router(AppState::in_memory(&config, seed));
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Payroll engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
