use std::fmt;

use crate::config::LexiconConfig;

/// Keyword-based polarity of a cleaned comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    /// Equal keyword hits, including none at all.
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    pub fn all() -> &'static [Sentiment] {
        &[Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct SentimentTagger {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentTagger {
    pub fn new(lexicon: &LexiconConfig) -> Self {
        Self {
            positive: lexicon.positive.clone(),
            negative: lexicon.negative.clone(),
        }
    }

    /// Each keyword found anywhere in `cleaned` counts once for its side.
    pub fn tag(&self, cleaned: &str) -> Sentiment {
        let hits = |keywords: &[String]| {
            keywords
                .iter()
                .filter(|k| !k.is_empty() && cleaned.contains(k.as_str()))
                .count()
        };

        let positive = hits(&self.positive);
        let negative = hits(&self.negative);

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}
