use serde::Serialize;

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Parse a user-supplied theme name. Returns None for anything unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

/// The complete color set for one theme mode.
///
/// Palettes are only ever built whole by [`Palette::light`] or
/// [`Palette::dark`]; there is no way to mix tokens from both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub mode: ThemeMode,

    // Backgrounds
    pub page_bg: &'static str,
    pub sidebar_bg: &'static str,
    pub card_bg: &'static str,
    pub card_shadow: &'static str,

    // Text tiers
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,

    // Borders
    pub border_color: &'static str,
    pub border_light: &'static str,

    // Table
    pub table_header_bg: &'static str,
    pub table_hover_bg: &'static str,

    // Sidebar
    pub sidebar_hover: &'static str,
    pub sidebar_active: &'static str,
    pub sidebar_active_text: &'static str,

    // KPI icon backgrounds
    pub kpi_blue_icon: &'static str,
    pub kpi_green_icon: &'static str,
    pub kpi_orange_icon: &'static str,
    pub kpi_purple_icon: &'static str,
    pub kpi_red_icon: &'static str,

    // Status pills
    pub pill_green: &'static str,
    pub pill_orange: &'static str,
    pub pill_red: &'static str,
    pub pill_blue: &'static str,
    pub pill_yellow: &'static str,
    pub pill_gray: &'static str,
    pub pill_green_text: &'static str,
    pub pill_orange_text: &'static str,
    pub pill_red_text: &'static str,
    pub pill_blue_text: &'static str,
    pub pill_yellow_text: &'static str,
    pub pill_gray_text: &'static str,

    // Overdue card
    pub overdue_good_border: &'static str,
    pub overdue_bad_border: &'static str,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            page_bg: "#f5f5f5",
            sidebar_bg: "#ffffff",
            card_bg: "#ffffff",
            card_shadow: "0 1px 3px rgba(0,0,0,0.1)",
            text_primary: "#333333",
            text_secondary: "#666666",
            text_muted: "#999999",
            border_color: "#e0e0e0",
            border_light: "#f0f0f0",
            table_header_bg: "#f5f5f5",
            table_hover_bg: "#f9f9f9",
            sidebar_hover: "#f5f5f5",
            sidebar_active: "#e8f5e9",
            sidebar_active_text: "#2e7d32",
            kpi_blue_icon: "#e3f2fd",
            kpi_green_icon: "#e8f5e9",
            kpi_orange_icon: "#fff3e0",
            kpi_purple_icon: "#f3e5f5",
            kpi_red_icon: "#ffebee",
            pill_green: "#e8f5e9",
            pill_orange: "#fff3e0",
            pill_red: "#ffebee",
            pill_blue: "#e3f2fd",
            pill_yellow: "#fffde7",
            pill_gray: "#f5f5f5",
            pill_green_text: "#2e7d32",
            pill_orange_text: "#f57c00",
            pill_red_text: "#d32f2f",
            pill_blue_text: "#1976d2",
            pill_yellow_text: "#f9a825",
            pill_gray_text: "#757575",
            overdue_good_border: "#e8f5e9",
            overdue_bad_border: "#ffebee",
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            page_bg: "#0d0d0d",
            sidebar_bg: "#1a1a1a",
            card_bg: "#1a1a1a",
            card_shadow: "0 1px 3px rgba(0,0,0,0.3)",
            text_primary: "#f0f0f0",
            text_secondary: "#999999",
            text_muted: "#666666",
            border_color: "#333333",
            border_light: "#2a2a2a",
            table_header_bg: "#252525",
            table_hover_bg: "#252525",
            sidebar_hover: "#252525",
            sidebar_active: "#2d4a3e",
            sidebar_active_text: "#66bb6a",
            kpi_blue_icon: "rgba(25, 118, 210, 0.2)",
            kpi_green_icon: "rgba(46, 125, 50, 0.2)",
            kpi_orange_icon: "rgba(245, 124, 0, 0.2)",
            kpi_purple_icon: "rgba(123, 31, 162, 0.2)",
            kpi_red_icon: "rgba(211, 47, 47, 0.2)",
            pill_green: "rgba(46, 125, 50, 0.2)",
            pill_orange: "rgba(245, 124, 0, 0.2)",
            pill_red: "rgba(211, 47, 47, 0.2)",
            pill_blue: "rgba(25, 118, 210, 0.2)",
            pill_yellow: "rgba(249, 168, 37, 0.2)",
            pill_gray: "rgba(117, 117, 117, 0.2)",
            pill_green_text: "#66bb6a",
            pill_orange_text: "#ffa726",
            pill_red_text: "#ef5350",
            pill_blue_text: "#42a5f5",
            pill_yellow_text: "#ffee58",
            pill_gray_text: "#bdbdbd",
            overdue_good_border: "rgba(46, 125, 50, 0.3)",
            overdue_bad_border: "rgba(211, 47, 47, 0.3)",
        }
    }

    /// Every color token by name, in declaration order.
    pub fn tokens(&self) -> [(&'static str, &'static str); 33] {
        [
            ("page_bg", self.page_bg),
            ("sidebar_bg", self.sidebar_bg),
            ("card_bg", self.card_bg),
            ("card_shadow", self.card_shadow),
            ("text_primary", self.text_primary),
            ("text_secondary", self.text_secondary),
            ("text_muted", self.text_muted),
            ("border_color", self.border_color),
            ("border_light", self.border_light),
            ("table_header_bg", self.table_header_bg),
            ("table_hover_bg", self.table_hover_bg),
            ("sidebar_hover", self.sidebar_hover),
            ("sidebar_active", self.sidebar_active),
            ("sidebar_active_text", self.sidebar_active_text),
            ("kpi_blue_icon", self.kpi_blue_icon),
            ("kpi_green_icon", self.kpi_green_icon),
            ("kpi_orange_icon", self.kpi_orange_icon),
            ("kpi_purple_icon", self.kpi_purple_icon),
            ("kpi_red_icon", self.kpi_red_icon),
            ("pill_green", self.pill_green),
            ("pill_orange", self.pill_orange),
            ("pill_red", self.pill_red),
            ("pill_blue", self.pill_blue),
            ("pill_yellow", self.pill_yellow),
            ("pill_gray", self.pill_gray),
            ("pill_green_text", self.pill_green_text),
            ("pill_orange_text", self.pill_orange_text),
            ("pill_red_text", self.pill_red_text),
            ("pill_blue_text", self.pill_blue_text),
            ("pill_yellow_text", self.pill_yellow_text),
            ("pill_gray_text", self.pill_gray_text),
            ("overdue_good_border", self.overdue_good_border),
            ("overdue_bad_border", self.overdue_bad_border),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

/// Accent family for a KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiColor {
    Blue,
    Green,
    Orange,
    Purple,
    Red,
}

impl KpiColor {
    /// Border and glyph color. Identical in both themes.
    pub fn accent(self) -> &'static str {
        match self {
            KpiColor::Blue => "#1976d2",
            KpiColor::Green => "#2e7d32",
            KpiColor::Orange => "#f57c00",
            KpiColor::Purple => "#7b1fa2",
            KpiColor::Red => "#d32f2f",
        }
    }

    pub fn icon_background(self, palette: &Palette) -> &'static str {
        match self {
            KpiColor::Blue => palette.kpi_blue_icon,
            KpiColor::Green => palette.kpi_green_icon,
            KpiColor::Orange => palette.kpi_orange_icon,
            KpiColor::Purple => palette.kpi_purple_icon,
            KpiColor::Red => palette.kpi_red_icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_changes_between_themes() {
        let light = Palette::light();
        let dark = Palette::dark();

        for ((name, l), (_, d)) in light.tokens().iter().zip(dark.tokens().iter()) {
            assert!(!l.is_empty(), "{name} unset in light palette");
            assert!(!d.is_empty(), "{name} unset in dark palette");
            assert_ne!(l, d, "{name} is the same in both palettes");
        }
    }

    #[test]
    fn theme_names_parse_case_insensitively() {
        assert_eq!(ThemeMode::parse("Dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse(" light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("solarized"), None);
    }

    #[test]
    fn kpi_icon_background_follows_palette() {
        assert_eq!(KpiColor::Purple.icon_background(&Palette::light()), "#f3e5f5");
        assert_eq!(
            KpiColor::Purple.icon_background(&Palette::dark()),
            "rgba(123, 31, 162, 0.2)"
        );
        assert_eq!(KpiColor::Purple.accent(), "#7b1fa2");
    }
}
