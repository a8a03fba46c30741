use std::f64::consts::PI;
use std::fmt::Write;

use super::escape;
use crate::analysis::Sentiment;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const CX: f64 = 260.0;
const CY: f64 = 260.0;
const RADIUS: f64 = 170.0;

/// Pie chart of `counts` (already in drawing order) as an SVG document.
pub fn render_pie(counts: &[(Sentiment, usize)], colors: &[String], title: &str, caption: &str) -> String {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
<rect width="100%" height="100%" fill="white"/>
<text x="{tx}" y="40" font-size="20" text-anchor="middle">{title}</text>
"#,
        w = WIDTH,
        h = HEIGHT,
        tx = WIDTH / 2.0,
        title = escape(title),
    );

    if total == 0 {
        let _ = writeln!(
            svg,
            r##"<circle cx="{CX}" cy="{CY}" r="{RADIUS}" fill="none" stroke="#999999" stroke-dasharray="6 4"/>
<text x="{CX}" y="{CY}" font-size="16" text-anchor="middle" fill="#666666">no data</text>"##
        );
    }

    let slices: Vec<(usize, Sentiment, usize)> = counts
        .iter()
        .enumerate()
        .filter(|(_, (_, n))| *n > 0)
        .map(|(i, (s, n))| (i, *s, *n))
        .collect();

    // start at 12 o'clock, clockwise
    let mut angle = -PI / 2.0;
    for &(i, sentiment, count) in &slices {
        let fraction = count as f64 / total as f64;
        let sweep = fraction * 2.0 * PI;
        let fill = pick_color(colors, i);

        if slices.len() == 1 {
            let _ = writeln!(
                svg,
                r#"<circle cx="{CX}" cy="{CY}" r="{RADIUS}" fill="{fill}" stroke="white" stroke-width="2"/>"#
            );
        } else {
            let (x0, y0) = point(angle, RADIUS);
            let (x1, y1) = point(angle + sweep, RADIUS);
            let large_arc = if sweep > PI { 1 } else { 0 };
            let _ = writeln!(
                svg,
                r#"<path d="M {CX} {CY} L {x0:.2} {y0:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{fill}" stroke="white" stroke-width="2"/>"#
            );
        }

        let (lx, ly) = point(angle + sweep / 2.0, RADIUS * 0.6);
        let _ = writeln!(
            svg,
            r#"<text x="{lx:.2}" y="{ly:.2}" font-size="14" text-anchor="middle">{:.1}%</text>"#,
            fraction * 100.0
        );
        let (nx, ny) = point(angle + sweep / 2.0, RADIUS * 1.15);
        let anchor = if nx < CX { "end" } else { "start" };
        let _ = writeln!(
            svg,
            r#"<text x="{nx:.2}" y="{ny:.2}" font-size="14" text-anchor="{anchor}">{}</text>"#,
            sentiment.label()
        );

        angle += sweep;
    }

    for (i, (sentiment, count)) in counts.iter().enumerate() {
        let y = 110.0 + i as f64 * 26.0;
        let _ = writeln!(
            svg,
            r#"<rect x="480" y="{ry}" width="16" height="16" fill="{fill}"/>
<text x="504" y="{ty}" font-size="14">{label} ({count})</text>"#,
            ry = y - 13.0,
            ty = y,
            fill = pick_color(colors, i),
            label = sentiment.label(),
        );
    }

    let _ = writeln!(
        svg,
        r##"<text x="{x}" y="{y}" font-size="11" text-anchor="end" fill="#888888">{caption}</text>
</svg>"##,
        x = WIDTH - 10.0,
        y = HEIGHT - 10.0,
        caption = escape(caption),
    );
    svg
}

fn pick_color(colors: &[String], i: usize) -> &str {
    if colors.is_empty() {
        "#cccccc"
    } else {
        colors[i % colors.len()].as_str()
    }
}

fn point(angle: f64, radius: f64) -> (f64, f64) {
    (CX + radius * angle.cos(), CY + radius * angle.sin())
}
