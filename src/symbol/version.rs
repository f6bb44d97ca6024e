//! Symbol versions, version selection and the derived geometry

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Border (quiet zone) width for Micro QR symbols, in modules
pub const MICRO_BORDER: u32 = 2;

/// Border (quiet zone) width for standard QR symbols, in modules
pub const QR_BORDER: u32 = 4;

/// A concrete symbol size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolVersion {
    /// Micro QR Code, M1 to M4
    Micro(u8),
    /// Standard QR Code, 1 to 40
    Normal(u8),
}

impl SymbolVersion {
    /// Build a Micro version, rejecting anything outside M1..=M4
    pub fn micro(n: u8) -> Result<Self, ConfigError> {
        if (1..=4).contains(&n) {
            Ok(Self::Micro(n))
        } else {
            Err(ConfigError::invalid("version", format!("M{} is not a Micro QR version", n)))
        }
    }

    /// Build a standard version, rejecting anything outside 1..=40
    pub fn normal(n: u8) -> Result<Self, ConfigError> {
        if (1..=40).contains(&n) {
            Ok(Self::Normal(n))
        } else {
            Err(ConfigError::invalid("version", format!("{} is not a QR version", n)))
        }
    }

    pub fn is_micro(&self) -> bool {
        matches!(self, Self::Micro(_))
    }

    /// Side length of the module matrix (without border)
    pub fn side_len(&self) -> u32 {
        match *self {
            Self::Micro(m) => 9 + 2 * u32::from(m),
            Self::Normal(v) => 17 + 4 * u32::from(v),
        }
    }
}

impl fmt::Display for SymbolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Micro(m) => write!(f, "M{}", m),
            Self::Normal(v) => write!(f, "{}", v),
        }
    }
}

/// Version requested by the user: a fixed version or automatic selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum VersionSelector {
    /// Smallest version that fits the data (`-`)
    #[default]
    Auto,
    Fixed(SymbolVersion),
}

impl VersionSelector {
    pub fn fixed(&self) -> Option<SymbolVersion> {
        match self {
            Self::Auto => None,
            Self::Fixed(v) => Some(*v),
        }
    }
}

impl FromStr for VersionSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(Self::Auto);
        }
        let bad = || ConfigError::invalid("version", format!("unrecognized version '{}'", s));
        if let Some(rest) = s.strip_prefix(['M', 'm']) {
            let n: u8 = rest.parse().map_err(|_| bad())?;
            return SymbolVersion::micro(n).map(Self::Fixed);
        }
        let n: u8 = s.parse().map_err(|_| bad())?;
        SymbolVersion::normal(n).map(Self::Fixed)
    }
}

impl TryFrom<String> for VersionSelector {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("-"),
            Self::Fixed(v) => v.fmt(f),
        }
    }
}

/// Default quiet zone width for a version
pub fn border_for(version: SymbolVersion) -> u32 {
    if version.is_micro() {
        MICRO_BORDER
    } else {
        QR_BORDER
    }
}

/// Symbol size including the border, as `(width, height)` in modules
pub fn geometry_for(version: SymbolVersion, border: u32) -> (u32, u32) {
    let side = version.side_len() + 2 * border;
    (side, side)
}
