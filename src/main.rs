use anyhow::{Context, Result};
use gdpscraper::{run_etl, EtlConfig, FileProgressLog};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) fixed run configuration ──────────────────────────────────
    let config = EtlConfig::default();
    let log = FileProgressLog::new(&config.log_path);
    let client = Client::new();
    info!(url = %config.url, "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let report = run_etl(&config, &client, &log, &mut std::io::stdout())
        .await
        .with_context(|| format!("ETL run from {}", config.url))?;

    info!(
        rows = report.rows,
        csv = %report.csv_path.display(),
        db = %report.db_path.display(),
        "all done"
    );
    Ok(())
}
