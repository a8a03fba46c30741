pub mod cleaner;
pub mod integrate;
pub mod sentiment;
pub mod types;

pub use cleaner::TextCleaner;
pub use integrate::integrate;
pub use sentiment::{Sentiment, SentimentTagger};
pub use types::{CleanedRow, IntegratedRow, TaggedRow};

use tracing::info;

/// Attach cleaned text, dropping rows whose text cleans to nothing.
pub fn clean_rows(rows: Vec<IntegratedRow>, cleaner: &TextCleaner) -> Vec<CleanedRow> {
    let total = rows.len();
    let cleaned: Vec<CleanedRow> = rows
        .into_iter()
        .filter_map(|row| {
            let cleaned = cleaner.clean(row.comment.text.as_deref())?;
            Some(CleanedRow { row, cleaned })
        })
        .collect();

    info!(
        "Cleaned text: kept {} rows, dropped {} (stickers or empty)",
        cleaned.len(),
        total - cleaned.len()
    );
    cleaned
}

pub fn tag_rows(rows: Vec<CleanedRow>, tagger: &SentimentTagger) -> Vec<TaggedRow> {
    rows.into_iter()
        .map(|row| TaggedRow {
            sentiment: tagger.tag(&row.cleaned),
            row,
        })
        .collect()
}

/// Rows per sentiment, most frequent first; ties keep `Sentiment::all()` order.
pub fn sentiment_counts(rows: &[TaggedRow]) -> Vec<(Sentiment, usize)> {
    let mut counts: Vec<(Sentiment, usize)> = Sentiment::all()
        .iter()
        .map(|s| (*s, rows.iter().filter(|r| r.sentiment == *s).count()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn log_summary(counts: &[(Sentiment, usize)]) {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    for (sentiment, count) in counts {
        let share = if total > 0 {
            *count as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        info!("{}: {} ({:.1}%)", sentiment, count, share);
    }
}
