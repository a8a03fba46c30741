pub mod pie;
pub mod wordcloud;

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analysis::{sentiment_counts, TaggedRow};
use crate::config::ReportConfig;

/// Image files produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutputs {
    pub chart: PathBuf,
    /// `None` when no cleaned text survived.
    pub wordcloud: Option<PathBuf>,
}

pub struct ReportRenderer {
    config: ReportConfig,
    out_dir: PathBuf,
}

impl ReportRenderer {
    pub fn new(config: &ReportConfig, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: config.clone(),
            out_dir: out_dir.into(),
        }
    }

    pub fn render(&self, rows: &[TaggedRow]) -> Result<ReportOutputs> {
        std::fs::create_dir_all(&self.out_dir).context("Failed to create report directory")?;

        info!("Rendering sentiment chart...");
        let caption = format!(
            "{} comments · generated {}",
            rows.len(),
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        );
        let chart_svg = pie::render_pie(
            &sentiment_counts(rows),
            &self.config.colors,
            &self.config.chart_title,
            &caption,
        );
        let chart = self.out_dir.join(&self.config.chart_file);
        write_file(&chart, &chart_svg)?;
        info!("Saved chart: {}", chart.display());

        info!("Rendering word cloud...");
        let corpus = rows
            .iter()
            .map(TaggedRow::cleaned)
            .collect::<Vec<_>>()
            .join(" ");

        let stopwords: HashSet<String> = self.config.stopwords.iter().cloned().collect();
        let words = wordcloud::word_frequencies(&corpus, &stopwords, self.config.max_words);
        let wordcloud = if words.is_empty() {
            warn!("Not enough text to build a word cloud, skipping");
            None
        } else {
            let path = self.out_dir.join(&self.config.wordcloud_file);
            write_file(&path, &wordcloud::render_wordcloud(&words, &self.config))?;
            info!("Saved word cloud: {}", path.display());
            Some(path)
        };

        Ok(ReportOutputs { chart, wordcloud })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Escape text for SVG/XML content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CleanedRow, IntegratedRow, Sentiment};
    use crate::dataset::CommentRecord;

    fn tagged(cleaned: &str, sentiment: Sentiment) -> TaggedRow {
        TaggedRow {
            row: CleanedRow {
                row: IntegratedRow {
                    comment: CommentRecord::default(),
                    play_count: None,
                    digg_count: None,
                },
                cleaned: cleaned.to_string(),
            },
            sentiment,
        }
    }

    #[test]
    fn test_writes_both_images() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ReportRenderer::new(&ReportConfig::default(), dir.path());
        let outputs = renderer
            .render(&[
                tagged("mèo cute", Sentiment::Positive),
                tagged("dở", Sentiment::Negative),
            ])
            .unwrap();

        assert_eq!(outputs.chart, dir.path().join("sentiment_final.svg"));
        assert_eq!(outputs.wordcloud, Some(dir.path().join("wordcloud_final.svg")));

        let chart = std::fs::read_to_string(&outputs.chart).unwrap();
        assert!(chart.contains(">50.0%<"));
        let cloud = std::fs::read_to_string(dir.path().join("wordcloud_final.svg")).unwrap();
        assert!(cloud.contains(">mèo</text>"));
    }

    #[test]
    fn test_empty_corpus_skips_word_cloud() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ReportRenderer::new(&ReportConfig::default(), dir.path());
        let outputs = renderer.render(&[]).unwrap();

        assert!(outputs.chart.is_file());
        assert_eq!(outputs.wordcloud, None);
        assert!(!dir.path().join("wordcloud_final.svg").exists());
    }

    #[test]
    fn test_stopwords_only_corpus_skips_word_cloud() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            stopwords: vec!["và".into()],
            ..ReportConfig::default()
        };
        let outputs = ReportRenderer::new(&config, dir.path())
            .render(&[tagged("và", Sentiment::Neutral)])
            .unwrap();
        assert_eq!(outputs.wordcloud, None);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
