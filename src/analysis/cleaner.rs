use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::config::LexiconConfig;

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention pattern"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid symbol pattern"));

/// Normalizes comment text before keyword tagging.
pub struct TextCleaner {
    sticker_marker: String,
    teencode: Vec<(Regex, String)>,
}

impl TextCleaner {
    pub fn new(lexicon: &LexiconConfig) -> Result<Self> {
        let teencode = lexicon
            .teencode
            .iter()
            .filter(|(slang, _)| !slang.is_empty())
            .map(|(slang, replacement)| {
                let pattern = format!(r"\b{}\b", regex::escape(slang));
                Regex::new(&pattern)
                    .with_context(|| format!("Invalid teencode entry {:?}", slang))
                    .map(|re| (re, replacement.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sticker_marker: lexicon.sticker_marker.to_lowercase(),
            teencode,
        })
    }

    /// `None` for stickers and for text with nothing left after cleaning.
    pub fn clean(&self, text: Option<&str>) -> Option<String> {
        let text = text?;
        if !self.sticker_marker.is_empty() && text.to_lowercase().contains(&self.sticker_marker) {
            return None;
        }

        let without_mentions = MENTION.replace_all(text, "");
        let cleaned = self.expand_teencode(without_mentions.to_lowercase());
        let cleaned = NON_WORD.replace_all(&cleaned, "");
        // stripping symbols can join a split slang word ("đ.c"), so substitute once more
        let cleaned = self.expand_teencode(cleaned.into_owned());

        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn expand_teencode(&self, mut text: String) -> String {
        for (slang, replacement) in &self.teencode {
            text = slang.replace_all(&text, NoExpand(replacement)).into_owned();
        }
        text
    }
}
