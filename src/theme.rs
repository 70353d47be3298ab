//! Theme presets for the Mermaid `init` directive
//!
//! A theme name plus a fallback text color resolves to a [`StyleConfig`]:
//! the JSON object the renderer reads from the `%%{ init: ... }%%` block.
//! `dark` and `forest` carry fixed palettes; every other name colors the
//! primary, text, border and line fields with the supplied text color and
//! is passed through so the renderer can apply its own preset.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Mermaid theme identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Default,
    Forest,
    Dark,
    Neutral,
    /// Any other name, forwarded verbatim to the renderer
    Other(String),
}

impl Theme {
    /// Names accepted on the command line
    pub const NAMES: [&'static str; 4] = ["default", "forest", "dark", "neutral"];

    pub fn as_str(&self) -> &str {
        match self {
            Theme::Default => "default",
            Theme::Forest => "forest",
            Theme::Dark => "dark",
            Theme::Neutral => "neutral",
            Theme::Other(name) => name,
        }
    }
}

impl From<&str> for Theme {
    fn from(name: &str) -> Self {
        match name {
            "default" => Theme::Default,
            "forest" => Theme::Forest,
            "dark" => Theme::Dark,
            "neutral" => Theme::Neutral,
            other => Theme::Other(other.to_string()),
        }
    }
}

impl FromStr for Theme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Theme::from(s))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Style configuration embedded in the diagram's `init` directive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleConfig {
    pub theme: Theme,
    #[serde(rename = "themeVariables")]
    pub theme_variables: Map<String, Value>,
}

/// Size and font overrides merged on top of a theme preset
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOverrides {
    pub font_size: String,
    pub font_family: String,
    pub line_width: String,
    pub arrow_width: String,
    pub padding: String,
}

pub const DEFAULT_FONT_SIZE: &str = "24px";
pub const DEFAULT_FONT_FAMILY: &str = "arial";
pub const DEFAULT_LINE_WIDTH: &str = "3px";
pub const DEFAULT_ARROW_WIDTH: &str = "3";
pub const DEFAULT_PADDING: &str = "20";

/// Text color used when none is given
pub const DEFAULT_TEXT_COLOR: &str = "#1f2020";

impl Default for StyleOverrides {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            line_width: DEFAULT_LINE_WIDTH.to_string(),
            arrow_width: DEFAULT_ARROW_WIDTH.to_string(),
            padding: DEFAULT_PADDING.to_string(),
        }
    }
}

const DARK_PALETTE: &[(&str, &str)] = &[
    ("background", "#2b2b2b"),
    ("primaryColor", "#ffffff"),
    ("primaryTextColor", "#ffffff"),
    ("primaryBorderColor", "#ffffff"),
    ("lineColor", "#ffffff"),
    ("secondaryColor", "#ffffff"),
    ("tertiaryColor", "#444444"),
];

const FOREST_PALETTE: &[(&str, &str)] = &[
    ("primaryColor", "#1f2937"),
    ("primaryTextColor", "#1f2937"),
    ("primaryBorderColor", "#1f2937"),
    ("lineColor", "#1f2937"),
];

const TEXT_COLOR_FIELDS: [&str; 4] = [
    "primaryColor",
    "primaryTextColor",
    "primaryBorderColor",
    "lineColor",
];

/// Resolve a theme to its style preset
///
/// `text_color` is ignored for `dark` and `forest`.
pub fn resolve_theme(theme: &Theme, text_color: &str) -> StyleConfig {
    let mut vars = Map::new();
    match theme {
        Theme::Dark => {
            vars.insert("darkMode".to_string(), Value::Bool(true));
            insert_palette(&mut vars, DARK_PALETTE);
        }
        Theme::Forest => insert_palette(&mut vars, FOREST_PALETTE),
        _ => {
            for field in TEXT_COLOR_FIELDS {
                vars.insert(field.to_string(), Value::from(text_color));
            }
        }
    }

    StyleConfig {
        theme: theme.clone(),
        theme_variables: vars,
    }
}

fn insert_palette(vars: &mut Map<String, Value>, palette: &[(&str, &str)]) {
    for (key, color) in palette {
        vars.insert((*key).to_string(), Value::from(*color));
    }
}

impl StyleConfig {
    /// Merge font/size overrides and the fixed bold weight into the variables
    pub fn with_overrides(mut self, overrides: &StyleOverrides) -> Self {
        let entries = [
            ("fontSize", overrides.font_size.as_str()),
            ("fontFamily", overrides.font_family.as_str()),
            ("lineWidth", overrides.line_width.as_str()),
            ("arrowWidth", overrides.arrow_width.as_str()),
            ("padding", overrides.padding.as_str()),
            ("fontWeight", "bold"),
        ];
        for (key, value) in entries {
            self.theme_variables
                .insert(key.to_string(), Value::from(value));
        }
        self
    }

    /// Look up a theme variable as a string
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.theme_variables.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_ignores_text_color() {
        let style = resolve_theme(&Theme::Dark, "#123456");
        assert_eq!(style.theme, Theme::Dark);
        assert_eq!(style.theme_variables.get("darkMode"), Some(&Value::Bool(true)));
        assert_eq!(style.variable("background"), Some("#2b2b2b"));
        assert_eq!(style.variable("primaryColor"), Some("#ffffff"));
        assert_eq!(style.variable("tertiaryColor"), Some("#444444"));
        assert!(!style
            .theme_variables
            .values()
            .any(|v| v.as_str() == Some("#123456")));
    }

    #[test]
    fn test_forest_ignores_text_color() {
        let style = resolve_theme(&Theme::Forest, "red");
        for field in TEXT_COLOR_FIELDS {
            assert_eq!(style.variable(field), Some("#1f2937"));
        }
        assert_eq!(style.theme_variables.len(), 4);
    }

    #[test]
    fn test_other_themes_use_text_color() {
        let themes = [
            Theme::Default,
            Theme::Neutral,
            Theme::Other("base".to_string()),
        ];
        for theme in &themes {
            for color in ["#1f2020", "red", ""] {
                let style = resolve_theme(theme, color);
                assert_eq!(&style.theme, theme);
                for field in TEXT_COLOR_FIELDS {
                    assert_eq!(style.variable(field), Some(color), "{theme} {field}");
                }
            }
        }
    }

    #[test]
    fn test_unknown_name_passes_through() {
        let theme: Theme = "base".parse().unwrap();
        assert_eq!(theme, Theme::Other("base".to_string()));
        let json = serde_json::to_value(resolve_theme(&theme, "blue")).unwrap();
        assert_eq!(json["theme"], "base");
        assert_eq!(json["themeVariables"]["lineColor"], "blue");
    }

    #[test]
    fn test_overrides_merge_after_preset() {
        let style =
            resolve_theme(&Theme::Default, DEFAULT_TEXT_COLOR).with_overrides(&StyleOverrides::default());
        let keys: Vec<&str> = style.theme_variables.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "primaryColor",
                "primaryTextColor",
                "primaryBorderColor",
                "lineColor",
                "fontSize",
                "fontFamily",
                "lineWidth",
                "arrowWidth",
                "padding",
                "fontWeight",
            ]
        );
        assert_eq!(style.variable("fontWeight"), Some("bold"));
        assert_eq!(style.variable("fontSize"), Some("24px"));
    }

    #[test]
    fn test_theme_names_round_trip() {
        for name in Theme::NAMES {
            assert_eq!(Theme::from(name).as_str(), name);
        }
    }
}
