//! Summary statistics card.
//!
//! One horizontal card with five tiles: total repositories, total
//! contributions, per-host contributions, and total stars. Tile accents are
//! fixed regardless of theme; only the card surfaces change.

use std::fmt::Write;

use ds_core::{ContributionSource, DailyContribution, HostStats, contribution};

use super::Theme;

const WIDTH: i64 = 850;
const HEIGHT: i64 = 200;
const TILE_WIDTH: i64 = 150;
const TILE_HEIGHT: i64 = 100;
const TILE_GAP: i64 = 12;
const TILES_X: i64 = 35;
const TILES_Y: i64 = 60;

/// Renders the summary card from both hosts' statistics and the merged
/// contribution window.
pub fn render(
    github: &HostStats,
    gitea: &HostStats,
    contributions: &[DailyContribution],
    theme: Theme,
) -> String {
    let palette = theme.palette();
    let combined = github.merged(*gitea);

    let total = contribution::total_contributions(contributions);
    let from_github = contribution::contributions_from(contributions, ContributionSource::Github);
    let from_gitea = contribution::contributions_from(contributions, ContributionSource::Gitea);

    let tiles: [(&str, &str, u64, &str); 5] = [
        ("Total", "Repositories", u64::from(combined.total_repos), "#58a6ff"),
        ("Total Contributions", "(in Last Year)", total, "#56d364"),
        ("GitHub Contributions", "(in Last Year)", from_github, "#c297ff"),
        ("Gitea Contributions", "(in Last Year)", from_gitea, "#76e3ea"),
        ("Total Stars", "", combined.total_stars, "#f0883e"),
    ];

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
        r#"<rect x="10" y="10" width="{}" height="{}" rx="10" fill="{}" stroke="{}" stroke-width="2"/>"#,
        WIDTH - 20,
        HEIGHT - 20,
        palette.card_background,
        palette.card_border
    )
    .unwrap();
    writeln!(
        svg,
        r#"<text x="30" y="42" font-size="14" font-weight="bold" fill="{}">Coding Statistics Overview</text>"#,
        palette.text
    )
    .unwrap();

    for (i, (line_one, line_two, value, accent)) in tiles.iter().enumerate() {
        let x = TILES_X + i as i64 * (TILE_WIDTH + TILE_GAP);
        let center = x + TILE_WIDTH / 2;

        writeln!(
            svg,
            r#"<rect x="{x}" y="{TILES_Y}" width="{TILE_WIDTH}" height="{TILE_HEIGHT}" rx="6" fill="{}" stroke="{}" stroke-width="1.5"/>"#,
            palette.background,
            palette.card_border
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text x="{center}" y="{}" font-size="26" font-weight="bold" text-anchor="middle" fill="{accent}">{value}</text>"#,
            TILES_Y + 42
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text x="{center}" y="{}" font-size="9" text-anchor="middle" fill="{}">{line_one}</text>"#,
            TILES_Y + 68,
            palette.muted
        )
        .unwrap();
        if !line_two.is_empty() {
            writeln!(
                svg,
                r#"<text x="{center}" y="{}" font-size="9" text-anchor="middle" fill="{}">{line_two}</text>"#,
                TILES_Y + 80,
                palette.muted
            )
            .unwrap();
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, count: u32, source: ContributionSource) -> DailyContribution {
        DailyContribution {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            count,
            source,
        }
    }

    fn sample() -> (HostStats, HostStats, Vec<DailyContribution>) {
        let github = HostStats {
            total_repos: 12,
            total_stars: 340,
            total_forks: 9,
        };
        let gitea = HostStats {
            total_repos: 5,
            total_stars: 2,
            total_forks: 0,
        };
        let contributions = vec![
            day(3, 7, ContributionSource::Github),
            day(4, 2, ContributionSource::Github),
            day(4, 4, ContributionSource::Gitea),
        ];
        (github, gitea, contributions)
    }

    #[test]
    fn card_shows_combined_values() {
        let (github, gitea, contributions) = sample();
        let svg = render(&github, &gitea, &contributions, Theme::Light);

        // 12 + 5 repositories, 7 + 2 + 4 contributions, 340 + 2 stars.
        assert!(svg.contains(">17</text>"));
        assert!(svg.contains(">13</text>"));
        assert!(svg.contains(">342</text>"));
    }

    #[test]
    fn card_splits_contributions_by_host() {
        let (github, gitea, contributions) = sample();
        let svg = render(&github, &gitea, &contributions, Theme::Light);

        assert!(svg.contains(">9</text>"), "GitHub share");
        assert!(svg.contains(">4</text>"), "Gitea share");
        assert!(svg.contains("GitHub Contributions"));
        assert!(svg.contains("Gitea Contributions"));
    }

    #[test]
    fn card_draws_five_tiles() {
        let (github, gitea, contributions) = sample();
        let svg = render(&github, &gitea, &contributions, Theme::Light);

        // Background + card + 5 tiles.
        assert_eq!(svg.matches("<rect").count(), 7);
        assert!(svg.contains("Coding Statistics Overview"));
    }

    #[test]
    fn tile_accents_are_theme_independent() {
        let (github, gitea, contributions) = sample();
        let light = render(&github, &gitea, &contributions, Theme::Light);
        let dark = render(&github, &gitea, &contributions, Theme::Dark);

        for accent in ["#58a6ff", "#56d364", "#c297ff", "#76e3ea", "#f0883e"] {
            assert!(light.contains(accent));
            assert!(dark.contains(accent));
        }
    }

    #[test]
    fn empty_inputs_render_zeroes() {
        let svg = render(
            &HostStats::default(),
            &HostStats::default(),
            &[],
            Theme::Dark,
        );
        assert!(svg.contains(">0</text>"));
    }
}
