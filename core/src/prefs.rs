//! Theme and accent colour.

use crate::error::{PartyError, PartyResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCENT: &str = "#007aff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "theme-auto")]
    Auto,
    #[serde(rename = "theme-light")]
    Light,
    #[serde(rename = "theme-dark")]
    Dark,
}

impl Theme {
    /// CSS class applied to the document body.
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Auto  => "theme-auto",
            Theme::Light => "theme-light",
            Theme::Dark  => "theme-dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme:  Theme,
    accent:     String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { theme: Theme::Auto, accent: DEFAULT_ACCENT.to_string() }
    }
}

impl Preferences {
    pub fn accent(&self) -> &str {
        &self.accent
    }

    /// Accepts "#rrggbb" in either case; stored lowercase.
    pub fn set_accent(&mut self, color: &str) -> PartyResult<()> {
        self.accent = parse_accent(color)?;
        Ok(())
    }
}

pub fn parse_accent(color: &str) -> PartyResult<String> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(PartyError::invalid(format!("accent must look like #rrggbb, got {color:?}")));
    }
    Ok(color.to_ascii_lowercase())
}
