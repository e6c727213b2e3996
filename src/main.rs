use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url_mesh::config::{self, ServiceKind};

/// URL shortener services.
#[derive(Parser)]
#[command(name = "url-mesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service to run in this process
    #[arg(value_enum)]
    service: ServiceKind,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env(cli.service)?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    url_mesh::server::run(config).await
}

fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
