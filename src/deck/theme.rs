//! Deck color themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::DeckError;

/// RGB hex colors (no leading `#`) applied to a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: &'static str,
    pub text: &'static str,
    pub background: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Professional,
    Modern,
    Minimal,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Professional, Theme::Modern, Theme::Minimal];

    pub fn palette(self) -> Palette {
        match self {
            Theme::Professional => Palette {
                title: "1F3864",
                text: "404040",
                background: "FFFFFF",
                accent: "4A90E2",
            },
            Theme::Modern => Palette {
                title: "2980B9",
                text: "2C3E50",
                background: "ECF0F1",
                accent: "E67E22",
            },
            Theme::Minimal => Palette {
                title: "000000",
                text: "505050",
                background: "FFFFFF",
                accent: "646464",
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Professional => "professional",
            Theme::Modern => "modern",
            Theme::Minimal => "minimal",
        }
    }

    /// Parse a theme name, falling back to `Professional` with a warning
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(theme = name, "Unknown theme, using professional");
            Theme::Professional
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DeckError::InvalidInput(format!(
                    "unknown theme '{}' (expected professional, modern or minimal)",
                    s
                ))
            })
    }
}
