//! Configuration for the layout engine

use super::Point;

/// Placement options for a job
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Reference point the top-level group is translated to
    pub anchor: Point,

    /// Uniform scale factor; 1 omits the scale term
    pub scale: f64,

    /// Draw a white rectangle behind every symbol
    pub background: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            anchor: Point::new(0.0, 0.0),
            scale: 1.0,
            background: false,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor point
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable background rectangles
    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.anchor, Point::new(0.0, 0.0));
        assert_eq!(config.scale, 1.0);
        assert!(!config.background);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_anchor(12.0, 7.5)
            .with_scale(3.0)
            .with_background(true);

        assert_eq!(config.anchor, Point::new(12.0, 7.5));
        assert_eq!(config.scale, 3.0);
        assert!(config.background);
    }
}
