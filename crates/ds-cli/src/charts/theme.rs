//! Chart color themes, following GitHub's light and dark UI palettes.

/// Rendering theme. Every chart is produced once per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// File-name suffix for this theme.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

/// Colors used across the charts.
#[derive(Debug)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub card_background: &'static str,
    pub card_border: &'static str,
    pub cell_border: &'static str,
    /// Heatmap intensity scale, empty to busiest.
    pub heatmap: [&'static str; 5],
    /// Accent colors cycled across chart series.
    pub accents: [&'static str; 10],
}

const LIGHT: Palette = Palette {
    background: "#ffffff",
    text: "#24292f",
    muted: "#57606a",
    card_background: "#f6f8fa",
    card_border: "#d0d7de",
    cell_border: "#ffffff",
    heatmap: ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
    accents: [
        "#0969da", "#1a7f37", "#cf222e", "#bc4c00", "#8250df", "#1b7c83", "#fb8500", "#d15704",
        "#116329", "#0550ae",
    ],
};

const DARK: Palette = Palette {
    background: "#0d1117",
    text: "#c9d1d9",
    muted: "#8b949e",
    card_background: "#161b22",
    card_border: "#30363d",
    cell_border: "#30363d",
    heatmap: ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"],
    accents: [
        "#58a6ff", "#56d364", "#f85149", "#db6d28", "#c297ff", "#76e3ea", "#ffa657", "#f0883e",
        "#7ee787", "#79c0ff",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_match_file_suffixes() {
        assert_eq!(Theme::Light.name(), "light");
        assert_eq!(Theme::Dark.name(), "dark");
    }

    #[test]
    fn palettes_differ_per_theme() {
        assert_ne!(
            Theme::Light.palette().background,
            Theme::Dark.palette().background
        );
    }
}
