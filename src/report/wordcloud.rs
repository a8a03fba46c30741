use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use super::escape;
use crate::config::ReportConfig;

const MIN_FONT: f64 = 12.0;
const SPIRAL_STEP: f64 = 0.1;
const MAX_SPIRAL_STEPS: usize = 4000;
/// Average glyph advance relative to the font size.
const GLYPH_WIDTH: f64 = 0.6;

const PALETTE: &[&str] = &[
    "#440154", "#3b528b", "#21918c", "#5ec962", "#fde725", "#31688e", "#35b779", "#443983",
];

/// Most frequent words of `text`, highest count first, ties in alphabetical order.
pub fn word_frequencies(text: &str, stopwords: &HashSet<String>, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        if !stopwords.contains(word) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut words: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(max_words);
    words
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedWord {
    word: String,
    size: f64,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl PlacedWord {
    fn overlaps(&self, x: f64, y: f64, w: f64, h: f64) -> bool {
        x < self.x + self.w && self.x < x + w && y < self.y + self.h && self.y < y + h
    }
}

/// Place words along an Archimedean spiral from the canvas centre, biggest first.
/// Words that find no free spot are left out.
fn layout(words: &[(String, usize)], width: f64, height: f64) -> Vec<PlacedWord> {
    let Some(max_count) = words.iter().map(|(_, n)| *n).max() else {
        return Vec::new();
    };
    let max_font = (height / 5.0).max(MIN_FONT);
    let (cx, cy) = (width / 2.0, height / 2.0);
    let aspect = height / width;

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());
    for (word, count) in words {
        let size = MIN_FONT + (max_font - MIN_FONT) * (*count as f64 / max_count as f64);
        let w = word.chars().count() as f64 * size * GLYPH_WIDTH;
        let h = size;
        if w > width || h > height {
            continue;
        }

        for step in 0..MAX_SPIRAL_STEPS {
            let t = step as f64 * SPIRAL_STEP;
            let x = cx + t * 2.0 * t.cos() - w / 2.0;
            let y = cy + t * 2.0 * aspect * t.sin() - h / 2.0;

            let inside = x >= 0.0 && y >= 0.0 && x + w <= width && y + h <= height;
            if inside && !placed.iter().any(|p| p.overlaps(x, y, w, h)) {
                placed.push(PlacedWord {
                    word: word.clone(),
                    size,
                    x,
                    y,
                    w,
                    h,
                });
                break;
            }
        }
    }
    placed
}

pub fn render_wordcloud(words: &[(String, usize)], report: &ReportConfig) -> String {
    let width = f64::from(report.width);
    let height = f64::from(report.height);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">
<rect width="100%" height="100%" fill="{}"/>"#,
        escape(&report.background)
    );

    for (i, word) in layout(words, width, height).iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            word.x + word.w / 2.0,
            word.y + word.h / 2.0,
            word.size,
            PALETTE[i % PALETTE.len()],
            escape(&word.word),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(w, n)| (w.to_string(), *n)).collect()
    }

    #[test]
    fn test_frequencies_sorted_and_limited() {
        let stopwords: HashSet<String> = ["là".to_string()].into_iter().collect();
        let freq = word_frequencies("mèo là mèo hay là cute cute mèo", &stopwords, 2);
        assert_eq!(freq, words(&[("mèo", 3), ("cute", 2)]));
    }

    #[test]
    fn test_frequency_ties_are_alphabetical() {
        let freq = word_frequencies("b a c", &HashSet::new(), 10);
        assert_eq!(freq, words(&[("a", 1), ("b", 1), ("c", 1)]));
    }

    #[test]
    fn test_layout_has_no_overlaps_and_stays_on_canvas() {
        let input: Vec<(String, usize)> = (0..60).map(|i| (format!("word{}", i), 60 - i)).collect();
        let placed = layout(&input, 800.0, 400.0);
        assert!(!placed.is_empty());
        assert_eq!(placed[0].word, "word0");

        for (i, a) in placed.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0 && a.x + a.w <= 800.0 && a.y + a.h <= 400.0);
            for b in &placed[i + 1..] {
                assert!(!a.overlaps(b.x, b.y, b.w, b.h), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_most_frequent_word_is_largest() {
        let placed = layout(&words(&[("mèo", 10), ("hay", 1)]), 800.0, 400.0);
        assert_eq!(placed.len(), 2);
        assert!(placed[0].size > placed[1].size);
        assert_eq!(placed[0].size, 80.0);
        assert_eq!(placed[1].size, MIN_FONT + (80.0 - MIN_FONT) * 0.1);
    }

    #[test]
    fn test_render_is_deterministic_and_escaped() {
        let report = ReportConfig::default();
        let input = words(&[("mèo", 3), ("<b>", 1)]);
        let svg = render_wordcloud(&input, &report);
        assert_eq!(svg, render_wordcloud(&input, &report));
        assert!(svg.contains(r#"width="800" height="400""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains(">mèo</text>"));
        assert!(svg.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_empty_layout() {
        assert!(layout(&[], 800.0, 400.0).is_empty());
    }
}
