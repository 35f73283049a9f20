//! YAML stylesheet parsing.
//!
//! A stylesheet is a mapping from style names to attribute sets:
//!
//! ```yaml
//! h1:
//!   fg: bright_blue
//!   bold: true
//! inline_code: { fg: 214, bg: "#303030" }
//! ```
//!
//! Only the styles listed are replaced; everything else keeps its default.

use std::collections::BTreeMap;

use console::Style;
use serde::Deserialize;

use super::{ColorDef, StyleName, StylesheetError};

/// One entry of a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDefinition {
    #[serde(default)]
    pub fg: Option<serde_yaml::Value>,
    #[serde(default)]
    pub bg: Option<serde_yaml::Value>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub dim: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl StyleDefinition {
    fn to_style(&self, name: StyleName) -> Result<Style, StylesheetError> {
        let color = |value: &serde_yaml::Value| {
            ColorDef::parse_value(value)
                .map(|def| def.to_console_color())
                .map_err(|_| StylesheetError::InvalidColor {
                    style: name.to_string(),
                    value: describe(value),
                    path: None,
                })
        };

        let mut style = Style::new();
        if let Some(fg) = &self.fg {
            style = style.fg(color(fg)?);
        }
        if let Some(bg) = &self.bg {
            style = style.bg(color(bg)?);
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        Ok(style)
    }
}

fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// Parses a stylesheet into the styles it overrides, in name order.
pub fn parse_stylesheet(yaml: &str) -> Result<Vec<(StyleName, Style)>, StylesheetError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let definitions: BTreeMap<String, StyleDefinition> =
        serde_yaml::from_str(yaml).map_err(|e| StylesheetError::Parse {
            path: None,
            message: e.to_string(),
        })?;

    definitions
        .iter()
        .map(|(key, definition)| {
            let name = StyleName::from_name(key).ok_or_else(|| StylesheetError::UnknownStyle {
                style: key.clone(),
                path: None,
            })?;
            Ok((name, definition.to_style(name)?))
        })
        .collect()
}
