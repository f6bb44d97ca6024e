//! Core types for the layout engine

use std::fmt;

use serde::Deserialize;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of the placed symbols
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the box by `padding` on every side
    pub fn padded(&self, padding: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - padding,
            self.y - padding,
            self.width + 2.0 * padding,
            self.height + 2.0 * padding,
        )
    }
}

/// Shared size information of every symbol in a job, in modules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolGeometry {
    /// Quiet zone width
    pub border: u32,
    /// Symbol width including the border on both sides
    pub width: u32,
    /// Symbol height including the border on both sides
    pub height: u32,
}

impl SymbolGeometry {
    pub fn new(border: u32, width: u32, height: u32) -> Self {
        Self {
            border,
            width,
            height,
        }
    }

    /// Horizontal distance between the origins of two neighbouring symbols
    pub fn advance(&self) -> f64 {
        f64::from(self.width + self.border)
    }
}

/// Placement transform of the top-level group: translate, then optional scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Point,
    pub scale: f64,
}

impl Transform {
    pub fn new(translate: Point, scale: f64) -> Self {
        Self { translate, scale }
    }

    pub fn is_unscaled(&self) -> bool {
        self.scale == 1.0
    }
}

/// Anchor coordinate as host documents expect it: integral values keep
/// one decimal (`120.0`), others use the shortest form (`80.5`)
fn write_coordinate(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        write!(f, "{:.1}", value)
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("translate(")?;
        write_coordinate(f, self.translate.x)?;
        f.write_str(", ")?;
        write_coordinate(f, self.translate.y)?;
        f.write_str(")")?;
        if !self.is_unscaled() {
            write!(f, " scale({:.6})", self.scale)?;
        }
        Ok(())
    }
}

/// Fill of the background rectangles
pub const BACKGROUND_FILL: &str = "#FFF";

/// Stroke of the module paths
pub const MODULE_STROKE: &str = "#000";

/// Background rectangle behind one symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundRect {
    pub x: f64,
    pub width: u32,
    pub height: u32,
}

/// Computed placement of a single symbol
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolLayout {
    /// Horizontal offset inside the top-level group
    pub offset: f64,
    pub background: Option<BackgroundRect>,
    /// Path data of the dark modules
    pub path: String,
}

impl SymbolLayout {
    fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.background
            .map(|bg| Node::Rect {
                x: bg.x,
                width: bg.width,
                height: bg.height,
                fill: BACKGROUND_FILL,
            })
            .into_iter()
            .chain(std::iter::once(Node::Path {
                d: self.path.clone(),
                stroke: MODULE_STROKE,
            }))
    }
}

/// Element handed to the document collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group {
        transform: Option<String>,
        children: Vec<Node>,
    },
    Rect {
        x: f64,
        width: u32,
        height: u32,
        fill: &'static str,
    },
    Path {
        d: String,
        stroke: &'static str,
    },
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// This node followed by all descendants, depth first
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}

/// The result of laying out a job
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub transform: Transform,
    pub geometry: SymbolGeometry,
    /// One entry per symbol, in input order
    pub symbols: Vec<SymbolLayout>,
    /// Covered area in host coordinates
    pub bounds: BoundingBox,
}

impl LayoutResult {
    pub fn is_multiple(&self) -> bool {
        self.symbols.len() > 1
    }

    pub fn offsets(&self) -> Vec<f64> {
        self.symbols.iter().map(|s| s.offset).collect()
    }

    /// Build the group tree: a single symbol sits directly in the top
    /// group, several symbols each get a nested group.
    pub fn to_node(&self) -> Node {
        let children = if self.is_multiple() {
            self.symbols
                .iter()
                .map(|symbol| Node::Group {
                    transform: None,
                    children: symbol.nodes().collect(),
                })
                .collect()
        } else {
            self.symbols.iter().flat_map(|s| s.nodes()).collect()
        };
        Node::Group {
            transform: Some(self.transform.to_string()),
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_unscaled() {
        let t = Transform::new(Point::new(10.0, 20.5), 1.0);
        assert_eq!(t.to_string(), "translate(10.0, 20.5)");
    }

    #[test]
    fn test_transform_scaled() {
        let t = Transform::new(Point::new(0.0, 0.0), 2.5);
        assert_eq!(t.to_string(), "translate(0.0, 0.0) scale(2.500000)");
    }

    #[test]
    fn test_transform_negative_and_fractional_anchor() {
        let t = Transform::new(Point::new(-5.0, 0.25), 1.0);
        assert_eq!(t.to_string(), "translate(-5.0, 0.25)");
    }

    #[test]
    fn test_geometry_advance() {
        assert_eq!(SymbolGeometry::new(4, 29, 29).advance(), 33.0);
    }

    #[test]
    fn test_bounding_box_padding() {
        let bb = BoundingBox::new(0.0, 0.0, 10.0, 5.0).padded(2.0);
        assert_eq!(bb, BoundingBox::new(-2.0, -2.0, 14.0, 9.0));
    }
}
