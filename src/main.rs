mod analysis;
mod config;
mod dataset;
mod error;
mod pipeline;
mod report;
mod storage;

use anyhow::Result;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comment_pulse=info".into()),
        )
        .init();

    info!("Loading configuration...");
    let config = config::AppConfig::load()?;
    info!("Data directory: {}", config.data.dir.display());

    let summary = pipeline::run(&config)
        .await
        .inspect_err(|e| error!("Run aborted: {:#}", e))?;

    info!(
        "Extracted {} comments into {}, analyzed {}",
        summary.extracted,
        summary.comments_csv.display(),
        summary.analyzed
    );
    match &summary.outputs.wordcloud {
        Some(wordcloud) => info!(
            "Done! Report images: {} and {}",
            summary.outputs.chart.display(),
            wordcloud.display()
        ),
        None => info!(
            "Done! Report image: {} (word cloud skipped, no text)",
            summary.outputs.chart.display()
        ),
    }

    Ok(())
}
