//! Language proportion pie chart.
//!
//! Slices follow the engine's descending-duration order. Labels are drawn
//! only for slices at or above 1%; the legend lists every entry, so small
//! languages stay discoverable without cluttering the pie.

use std::f64::consts::PI;
use std::fmt::Write;

use ds_core::ProcessedLanguageEntry;

use super::{Theme, escape};

const WIDTH: i64 = 760;
const HEIGHT: i64 = 460;
const CENTER_X: f64 = 240.0;
const CENTER_Y: f64 = 230.0;
const RADIUS: f64 = 170.0;
const LEGEND_X: i64 = 500;
const LEGEND_Y: i64 = 84;
const LEGEND_STEP: i64 = 22;

/// Below this share a slice keeps its color but loses its labels.
const LABEL_THRESHOLD: f64 = 1.0;

fn point(angle_degrees: f64, radius: f64) -> (f64, f64) {
    let radians = angle_degrees * PI / 180.0;
    (
        CENTER_X + radius * radians.cos(),
        CENTER_Y + radius * radians.sin(),
    )
}

/// Renders the language proportion chart.
///
/// Percentages are normalized against their own sum, so the pie always
/// closes even if the entries were filtered upstream.
#[expect(
    clippy::too_many_lines,
    reason = "slices, labels and legend are one sequential drawing pass"
)]
pub fn render(languages: &[ProcessedLanguageEntry], theme: Theme) -> String {
    let palette = theme.palette();

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="Helvetica, Arial, sans-serif">"#
    )
    .unwrap();
    writeln!(
        svg,
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="{}"/>"#,
        palette.background
    )
    .unwrap();
    writeln!(
        svg,
        r#"<text x="40" y="40" font-size="16" font-weight="bold" fill="{}">Coding Time by Language</text>"#,
        palette.text
    )
    .unwrap();

    let total: f64 = languages.iter().map(|l| l.percent.max(0.0)).sum();

    if total > 0.0 {
        // Start at twelve o'clock and sweep clockwise.
        let mut angle = -90.0;
        for (i, language) in languages.iter().enumerate() {
            let share = language.percent.max(0.0) / total;
            if share <= 0.0 {
                continue;
            }
            let color = palette.accents[i % palette.accents.len()];

            if share >= 0.9999 {
                // A degenerate arc would collapse; draw the full disc.
                writeln!(
                    svg,
                    r#"<circle cx="{CENTER_X}" cy="{CENTER_Y}" r="{RADIUS}" fill="{color}"/>"#
                )
                .unwrap();
            } else {
                let sweep = share * 360.0;
                let (x0, y0) = point(angle, RADIUS);
                let (x1, y1) = point(angle + sweep, RADIUS);
                let large_arc = i32::from(sweep > 180.0);
                writeln!(
                    svg,
                    r#"<path d="M {CENTER_X:.2} {CENTER_Y:.2} L {x0:.2} {y0:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{color}"/>"#
                )
                .unwrap();
            }

            if language.percent >= LABEL_THRESHOLD {
                let mid = angle + share * 180.0;
                let (px, py) = point(mid, RADIUS * 0.62);
                writeln!(
                    svg,
                    r##"<text x="{px:.2}" y="{py:.2}" font-size="11" font-weight="bold" text-anchor="middle" fill="#ffffff">{:.1}%</text>"##,
                    language.percent
                )
                .unwrap();

                let (nx, ny) = point(mid, RADIUS * 1.12);
                let anchor = if mid.to_radians().cos() >= 0.0 {
                    "start"
                } else {
                    "end"
                };
                writeln!(
                    svg,
                    r#"<text x="{nx:.2}" y="{ny:.2}" font-size="11" font-weight="bold" text-anchor="{anchor}" fill="{}">{}</text>"#,
                    palette.text,
                    escape(&language.name)
                )
                .unwrap();
            }

            angle += share * 360.0;
        }
    }

    // Legend lists every language, including those below the threshold.
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="{}" stroke="{}"/>"#,
        LEGEND_X - 16,
        LEGEND_Y - 24,
        WIDTH - LEGEND_X - 24,
        languages.len() as i64 * LEGEND_STEP + 36,
        palette.card_background,
        palette.card_border
    )
    .unwrap();
    for (i, language) in languages.iter().enumerate() {
        let color = palette.accents[i % palette.accents.len()];
        let y = LEGEND_Y + i as i64 * LEGEND_STEP;
        writeln!(
            svg,
            r#"<rect x="{LEGEND_X}" y="{}" width="12" height="12" rx="2" fill="{color}"/>"#,
            y - 10
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text x="{}" y="{y}" font-size="11" fill="{}">{} ({:.1}%)</text>"#,
            LEGEND_X + 18,
            palette.text,
            escape(&language.name),
            language.percent
        )
        .unwrap();
    }

    svg.push_str("</svg>\n");
    svg
}
