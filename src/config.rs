use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub fetch: FetchConfig,
    pub lexicon: LexiconConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    /// Preferred scraper export; any other `*.json` in `dir` is used as a fallback.
    pub dataset_file: String,
    pub comments_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            dataset_file: "dataset_tiktok-scraper_2026-02-05_18-13-38-530.json".to_string(),
            comments_file: "comments_only.csv".to_string(),
        }
    }
}

impl DataConfig {
    pub fn comments_path(&self) -> PathBuf {
        self.dir.join(&self.comments_file)
    }
}

/// Settings for the HTTP session used to download remote comment datasets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_ms: 200,
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
            accept: "application/json".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub sticker_marker: String,
    /// Ordered (slang, replacement) pairs, applied as whole words.
    pub teencode: Vec<(String, String)>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        let pairs = [
            ("ko", "không"),
            ("k", "không"),
            ("đc", "được"),
            ("j", "gì"),
            ("khum", "không"),
        ];
        Self {
            sticker_marker: "[sticker]".to_string(),
            teencode: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            positive: to_strings(&["hay", "tuyệt", "vui", "thích", "ok", "hài", "mèo", "cute", "mê"]),
            negative: to_strings(&["dở", "tệ", "buồn", "ghét", "xấu"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub chart_file: String,
    pub wordcloud_file: String,
    pub chart_title: String,
    pub colors: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub max_words: usize,
    pub stopwords: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_file: "sentiment_final.svg".to_string(),
            wordcloud_file: "wordcloud_final.svg".to_string(),
            chart_title: "Phân bổ cảm xúc người xem".to_string(),
            colors: to_strings(&["#99ff99", "#66b3ff", "#ff9999"]),
            width: 800,
            height: 400,
            background: "white".to_string(),
            max_words: 200,
            stopwords: Vec::new(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("COMMENT_PULSE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            warn!("{} not found, using built-in defaults", path.display());
            AppConfig::default()
        };

        if let Ok(dir) = std::env::var("COMMENT_PULSE_DATA_DIR") {
            config.data.dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&config_text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
