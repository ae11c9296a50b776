//! Presentation options shared by every view.
//!
//! Animated and plain variants of the navbar, hero, and product grid are one
//! component each; [`DecorationLevel`] picks the variant. Decorative state
//! (particles, intro sequence) lives entirely in the shell.

use serde::{Deserialize, Serialize};

/// Badge counts above this render as "99+".
pub const BADGE_CAP: u32 = 99;

/// How much motion and decoration the shell renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecorationLevel {
    /// Static layout, no cursor effects or intro sequence.
    Minimal,
    /// Cursor effects, intro sequence, and motion transitions.
    #[default]
    Animated,
}

impl DecorationLevel {
    #[must_use]
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Animated)
    }
}

impl std::fmt::Display for DecorationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Animated => write!(f, "animated"),
        }
    }
}

impl std::str::FromStr for DecorationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "animated" => Ok(Self::Animated),
            _ => Err(format!("invalid decoration level: {s}")),
        }
    }
}

/// Text for a count badge; `None` hides the badge.
#[must_use]
pub fn badge_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{BADGE_CAP}+")),
        n => Some(n.to_string()),
    }
}
