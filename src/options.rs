//! Job options: the user-facing configuration surface
//!
//! Options come from a TOML job file, command-line flags, or both. They are
//! validated and resolved into an [`EncodePlan`] that tells the pipeline
//! whether to ask the symbol source for one symbol or a structured-append
//! sequence.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::layout::{LayoutConfig, Point};
use crate::symbol::{EncodeRequest, ErrorLevel, MicroMode, SymbolVersion, VersionSelector};

/// Largest structured-append sequence a QR Code reader can reassemble
pub const MAX_SYMBOL_COUNT: usize = 16;

/// Everything a user can ask for
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrOptions {
    /// Text to encode
    pub data: String,
    pub version: VersionSelector,
    pub scale: f64,
    /// `None` leaves the choice to the encoder
    #[serde(deserialize_with = "deserialize_error_level")]
    pub error: Option<ErrorLevel>,
    pub symbol_count: usize,
    pub background: bool,
    pub allow_micro: bool,
    pub boost_error: bool,
    pub encoding: Option<String>,
    /// Reference point in host coordinates
    pub anchor: Point,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            data: String::new(),
            version: VersionSelector::Auto,
            scale: 1.0,
            error: Some(ErrorLevel::L),
            symbol_count: 1,
            background: false,
            allow_micro: false,
            boost_error: false,
            encoding: None,
            anchor: Point::default(),
        }
    }
}

/// What to ask the symbol source for
#[derive(Debug, Clone, PartialEq)]
pub enum EncodePlan {
    Single(EncodeRequest),
    Sequence {
        request: EncodeRequest,
        symbol_count: usize,
    },
}

impl QrOptions {
    /// Create options for `data` with default values
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Load options from a TOML job file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load options from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let options: QrOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_version(mut self, version: VersionSelector) -> Self {
        self.version = version;
        self
    }

    pub fn with_error(mut self, error: Option<ErrorLevel>) -> Self {
        self.error = error;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_symbol_count(mut self, symbol_count: usize) -> Self {
        self.symbol_count = symbol_count;
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    pub fn with_allow_micro(mut self, allow_micro: bool) -> Self {
        self.allow_micro = allow_micro;
        self
    }

    pub fn with_boost_error(mut self, boost_error: bool) -> Self {
        self.boost_error = boost_error;
        self
    }

    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    /// Check value ranges that the types alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::invalid(
                "scale",
                format!("must be a positive number, got {}", self.scale),
            ));
        }
        if !(1..=MAX_SYMBOL_COUNT).contains(&self.symbol_count) {
            return Err(ConfigError::invalid(
                "symbol_count",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_SYMBOL_COUNT, self.symbol_count
                ),
            ));
        }
        if !self.anchor.x.is_finite() || !self.anchor.y.is_finite() {
            return Err(ConfigError::invalid("anchor", "coordinates must be finite"));
        }
        Ok(())
    }

    /// Micro policy implied by the options; an explicit Micro version forces Micro
    pub fn micro_mode(&self) -> MicroMode {
        match self.version.fixed() {
            Some(v) if v.is_micro() => MicroMode::Always,
            _ if self.allow_micro => MicroMode::Allow,
            _ => MicroMode::Never,
        }
    }

    /// Error level handed to the encoder; M1 has no error correction
    pub fn effective_error(&self) -> Option<ErrorLevel> {
        match self.version.fixed() {
            Some(SymbolVersion::Micro(1)) => None,
            _ => self.error,
        }
    }

    /// Validate the options and decide how to encode them
    pub fn plan(&self) -> Result<EncodePlan, ConfigError> {
        self.validate()?;
        let micro = self.micro_mode();
        let request = EncodeRequest {
            data: self.data.clone(),
            version: self.version.fixed(),
            error: self.effective_error(),
            micro,
            boost_error: self.boost_error,
            encoding: self.encoding.clone(),
        };
        let plan = if micro != MicroMode::Always && self.symbol_count > 1 {
            EncodePlan::Sequence {
                request,
                symbol_count: self.symbol_count,
            }
        } else {
            EncodePlan::Single(request)
        };
        tracing::debug!(?plan, "resolved encode plan");
        Ok(plan)
    }

    /// Placement part of the options
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new()
            .with_anchor(self.anchor.x, self.anchor.y)
            .with_scale(self.scale)
            .with_background(self.background)
    }
}

/// Parse an error level option; `none`, `-` and the empty string mean no level
pub fn parse_error_level(s: &str) -> Result<Option<ErrorLevel>, ConfigError> {
    let s = s.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    s.parse().map(Some)
}

fn deserialize_error_level<'de, D>(deserializer: D) -> Result<Option<ErrorLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_error_level(&s).map_err(serde::de::Error::custom)
}
