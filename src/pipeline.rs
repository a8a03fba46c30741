use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::analysis::{self, SentimentTagger, TextCleaner};
use crate::config::AppConfig;
use crate::dataset::{self, RemoteFetchCache};
use crate::report::{ReportOutputs, ReportRenderer};
use crate::storage::{read_comments, CommentWriter};

#[derive(Debug)]
pub struct RunSummary {
    pub comments_csv: PathBuf,
    pub extracted: usize,
    pub analyzed: usize,
    pub outputs: ReportOutputs,
}

/// One full pass: extract comments to CSV, then integrate, clean, tag and render.
pub async fn run(config: &AppConfig) -> Result<RunSummary> {
    // Collection
    let dataset_path = dataset::find_dataset(&config.data)?;
    let videos = dataset::load_videos(&dataset_path)?;

    let mut cache = RemoteFetchCache::new(&config.fetch)?;
    let comments = dataset::extract(&videos, &mut cache).await;
    let extracted = comments.len();

    let writer = CommentWriter::new(config.data.comments_path());
    writer.write(&comments)?;

    // Analysis
    let stored = read_comments(writer.path())?;
    let rows = analysis::integrate(stored, &videos);

    info!("Preprocessing comment text...");
    let cleaner = TextCleaner::new(&config.lexicon)?;
    let cleaned = analysis::clean_rows(rows, &cleaner);

    info!("Tagging sentiment (keyword based)...");
    let tagger = SentimentTagger::new(&config.lexicon);
    let tagged = analysis::tag_rows(cleaned, &tagger);
    analysis::log_summary(&analysis::sentiment_counts(&tagged));

    let outputs = ReportRenderer::new(&config.report, &config.data.dir).render(&tagged)?;

    Ok(RunSummary {
        comments_csv: writer.path().to_path_buf(),
        extracted,
        analyzed: tagged.len(),
        outputs,
    })
}
