use std::fmt;
use std::str::FromStr;

use crate::math::{Color, Size};

/// Where the target render size comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// User-chosen size
    Fixed(Size),
    /// Follow the host's display area
    #[default]
    MatchDisplayArea,
    /// Follow the external game's configured size
    MatchExternalTarget,
}

impl SizeMode {
    pub fn kind(&self) -> SizeModeKind {
        match self {
            SizeMode::Fixed(_) => SizeModeKind::Fixed,
            SizeMode::MatchDisplayArea => SizeModeKind::CamView,
            SizeMode::MatchExternalTarget => SizeModeKind::GameTarget,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, SizeMode::Fixed(_))
    }
}

/// Persisted name of a size mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeModeKind {
    Fixed,
    CamView,
    GameTarget,
}

impl SizeModeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeModeKind::Fixed => "Fixed",
            SizeModeKind::CamView => "CamView",
            SizeModeKind::GameTarget => "GameTarget",
        }
    }
}

impl fmt::Display for SizeModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeModeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Fixed" => Ok(SizeModeKind::Fixed),
            "CamView" => Ok(SizeModeKind::CamView),
            "GameTarget" => Ok(SizeModeKind::GameTarget),
            other => Err(format!("unknown size mode '{}'", other)),
        }
    }
}

/// Color hint for size display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeHint {
    /// Size follows the display area
    Auto,
    /// Explicit size that fits the display area
    Custom,
    /// Explicit size larger than the display area; rendered offscreen
    Oversized,
}

impl SizeHint {
    pub fn for_state(mode: &SizeMode, fits: bool) -> Self {
        match (mode, fits) {
            (SizeMode::MatchDisplayArea, _) => SizeHint::Auto,
            (_, true) => SizeHint::Custom,
            (_, false) => SizeHint::Oversized,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SizeHint::Auto => Color::rgb(196, 196, 196),
            SizeHint::Custom => Color::rgb(196, 224, 255),
            SizeHint::Oversized => Color::rgb(255, 196, 196),
        }
    }
}
