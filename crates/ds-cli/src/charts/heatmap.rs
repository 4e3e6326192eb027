//! GitHub-style contribution calendar heatmap.
//!
//! Weeks are columns (Sunday row 0 through Saturday row 6), ending on the
//! week containing `today`. Cell intensity is bucketed at quartiles of the
//! busiest day in the window.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{Datelike, Duration, NaiveDate};

use ds_core::DailyContribution;

use super::Theme;

/// Columns in the grid: 52 full weeks plus the current one.
const WEEKS: i64 = 53;
/// Cell pitch (cell size plus gap).
const CELL: i64 = 14;
const CELL_SIZE: i64 = 12;
/// Left margin for day-of-week labels.
const LEFT: i64 = 36;
/// Top margin for the title and month labels.
const TOP: i64 = 48;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Row index in GitHub orientation: Sunday is 0, Saturday is 6.
fn weekday_row(date: NaiveDate) -> i64 {
    i64::from((date.weekday().num_days_from_monday() + 1) % 7)
}

/// Intensity bucket for a day, relative to the busiest day.
#[expect(
    clippy::cast_precision_loss,
    reason = "daily contribution counts are far below f64 precision limits"
)]
fn level(count: u64, max: u64) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let ratio = count as f64 / max as f64;
    if ratio <= 0.25 {
        1
    } else if ratio <= 0.5 {
        2
    } else if ratio <= 0.75 {
        3
    } else {
        4
    }
}

/// Renders the contribution heatmap for the year ending at `today`.
///
/// Contributions from both hosts are summed per day; dates outside the
/// window are ignored and future cells are not drawn.
#[expect(
    clippy::too_many_lines,
    reason = "grid, labels and legend are one sequential drawing pass"
)]
pub fn render(contributions: &[DailyContribution], today: NaiveDate, theme: Theme) -> String {
    let palette = theme.palette();

    // The grid ends on the Saturday of the current week.
    let end_of_week = today + Duration::days(6 - weekday_row(today));
    let start = end_of_week - Duration::days(WEEKS * 7 - 1);

    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for contribution in contributions {
        if contribution.date >= start && contribution.date <= today {
            *counts.entry(contribution.date).or_default() += u64::from(contribution.count);
        }
    }
    let total: u64 = counts.values().sum();
    let max = counts.values().copied().max().unwrap_or(0);

    let width = LEFT + WEEKS * CELL + 12;
    let height = TOP + 7 * CELL + 40;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="Helvetica, Arial, sans-serif">"#
    )
    .unwrap();
    writeln!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        palette.background
    )
    .unwrap();

    // Title
    writeln!(
        svg,
        r#"<text x="{LEFT}" y="22" font-size="16" font-weight="bold" fill="{}">Contributions in Last Year ({total} total)</text>"#,
        palette.text
    )
    .unwrap();

    // Day-of-week labels on alternating rows
    for (row, label) in [(1, "Mon"), (3, "Wed"), (5, "Fri")] {
        let y = TOP + row * CELL + CELL_SIZE - 2;
        writeln!(
            svg,
            r#"<text x="{}" y="{y}" font-size="9" text-anchor="end" fill="{}">{label}</text>"#,
            LEFT - 6,
            palette.muted
        )
        .unwrap();
    }

    // Month labels where the month changes from column to column
    let mut previous_month = 0;
    for week in 0..WEEKS {
        let week_start = start + Duration::days(week * 7);
        if week_start > today {
            break;
        }
        let month = week_start.month();
        if month != previous_month {
            let x = LEFT + week * CELL;
            writeln!(
                svg,
                r#"<text x="{x}" y="{}" font-size="9" fill="{}">{}</text>"#,
                TOP - 8,
                palette.muted,
                MONTHS[month as usize - 1]
            )
            .unwrap();
            previous_month = month;
        }
    }

    // Day cells
    for week in 0..WEEKS {
        for row in 0..7 {
            let date = start + Duration::days(week * 7 + row);
            if date > today {
                continue;
            }
            let count = counts.get(&date).copied().unwrap_or(0);
            let fill = palette.heatmap[level(count, max)];
            let x = LEFT + week * CELL;
            let y = TOP + row * CELL;
            writeln!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="2" fill="{fill}" stroke="{}" stroke-width="1"/>"#,
                palette.cell_border
            )
            .unwrap();
        }
    }

    // Legend: Less -> More, annotated with the busiest day
    let legend_y = TOP + 7 * CELL + 18;
    let legend_x = LEFT + (WEEKS - 10) * CELL;
    writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="9" text-anchor="end" fill="{}">Less</text>"#,
        legend_x - 6,
        legend_y + CELL_SIZE - 3,
        palette.muted
    )
    .unwrap();
    for (i, color) in palette.heatmap.iter().enumerate() {
        let x = legend_x + i as i64 * CELL;
        writeln!(
            svg,
            r#"<rect x="{x}" y="{legend_y}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="2" fill="{color}" stroke="{}" stroke-width="1"/>"#,
            palette.cell_border
        )
        .unwrap();
    }
    writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="9" fill="{}">More (max: {max})</text>"#,
        legend_x + 5 * CELL + 6,
        legend_y + CELL_SIZE - 3,
        palette.muted
    )
    .unwrap();

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::ContributionSource;

    fn day(date: &str, count: u32, source: ContributionSource) -> DailyContribution {
        DailyContribution {
            date: date.parse().unwrap(),
            count,
            source,
        }
    }

    // 2025-01-18 is a Saturday, so the grid is exactly full.
    const SATURDAY: &str = "2025-01-18";

    #[test]
    fn full_grid_draws_every_cell() {
        let today: NaiveDate = SATURDAY.parse().unwrap();
        let svg = render(&[], today, Theme::Light);

        // 53 weeks * 7 days + background + 5 legend swatches
        let rects = svg.matches("<rect").count();
        assert_eq!(rects, 53 * 7 + 1 + 5);
    }

    #[test]
    fn future_cells_are_not_drawn() {
        // 2025-01-15 is a Wednesday (row 3): Thu/Fri/Sat of the final week
        // are in the future.
        let today: NaiveDate = "2025-01-15".parse().unwrap();
        let svg = render(&[], today, Theme::Light);

        let rects = svg.matches("<rect").count();
        assert_eq!(rects, 53 * 7 - 3 + 1 + 5);
    }

    #[test]
    fn title_reports_window_total() {
        let today: NaiveDate = SATURDAY.parse().unwrap();
        let contributions = vec![
            day("2025-01-10", 3, ContributionSource::Github),
            day("2025-01-10", 2, ContributionSource::Gitea),
            day("2025-01-11", 1, ContributionSource::Github),
        ];

        let svg = render(&contributions, today, Theme::Light);
        assert!(svg.contains("Contributions in Last Year (6 total)"));
    }

    #[test]
    fn out_of_window_contributions_are_ignored() {
        let today: NaiveDate = SATURDAY.parse().unwrap();
        let contributions = vec![
            day("2022-01-01", 50, ContributionSource::Github),
            day("2025-01-10", 1, ContributionSource::Github),
        ];

        let svg = render(&contributions, today, Theme::Light);
        assert!(svg.contains("(1 total)"));
        assert!(svg.contains("(max: 1)"));
    }

    #[test]
    fn busiest_day_gets_the_top_intensity() {
        let today: NaiveDate = SATURDAY.parse().unwrap();
        let contributions = vec![day("2025-01-10", 9, ContributionSource::Github)];

        let svg = render(&contributions, today, Theme::Light);
        let top = Theme::Light.palette().heatmap[4];
        assert!(svg.contains(top), "busiest cell should use {top}");
    }

    #[test]
    fn dark_theme_uses_dark_background() {
        let today: NaiveDate = SATURDAY.parse().unwrap();
        let svg = render(&[], today, Theme::Dark);
        assert!(svg.contains(r##"fill="#0d1117""##));
    }

    #[test]
    fn level_buckets_at_quartiles() {
        assert_eq!(level(0, 100), 0);
        assert_eq!(level(25, 100), 1);
        assert_eq!(level(26, 100), 2);
        assert_eq!(level(50, 100), 2);
        assert_eq!(level(75, 100), 3);
        assert_eq!(level(100, 100), 4);
        assert_eq!(level(5, 0), 0);
    }

    #[test]
    fn weekday_rows_follow_github_orientation() {
        // 2025-01-12 is a Sunday, 2025-01-18 a Saturday.
        assert_eq!(weekday_row("2025-01-12".parse().unwrap()), 0);
        assert_eq!(weekday_row("2025-01-13".parse().unwrap()), 1);
        assert_eq!(weekday_row("2025-01-18".parse().unwrap()), 6);
    }
}
