use clap::Parser;
use scout::core::config::{self, CliOverrides, ScoutConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "scout", about = "Terminal client for a JSON search endpoint")]
struct Args {
    /// Search endpoint root; `/query` is appended
    #[arg(long)]
    base_uri: Option<String>,

    /// Search method sent with every query
    #[arg(short, long)]
    method: Option<String>,

    /// Run this search on startup
    #[arg(short, long)]
    query: Option<String>,

    /// Results per page
    #[arg(long)]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to scout.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("scout.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}, falling back to defaults");
        ScoutConfig::default()
    });
    let cli = CliOverrides {
        base_uri: args.base_uri,
        method: args.method,
        page_size: args.page_size,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Scout starting up against {}", resolved.base_uri);

    scout::tui::run(resolved, args.query)
}
