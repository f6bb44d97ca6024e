//! SVG generation from layout results

use crate::layout::{BoundingBox, LayoutResult, Node};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        let indent = usize::from(config.standalone);
        Self {
            config,
            elements: vec![],
            indent,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a background rectangle
    pub fn add_rect(&mut self, x: f64, width: u32, height: u32, fill: &str) {
        self.elements.push(format!(
            r#"{}<rect width="{}" height="{}" x="{}" fill="{}"/>"#,
            self.indent_str(),
            width,
            height,
            x,
            fill
        ));
    }

    /// Add a module path
    pub fn add_path(&mut self, d: &str, stroke: &str) {
        self.elements.push(format!(
            r#"{}<path d="{}" stroke="{}"/>"#,
            self.indent_str(),
            d,
            stroke
        ));
    }

    /// Open a group element with an optional transform
    pub fn start_group(&mut self, transform: Option<&str>) {
        let transform_attr = transform
            .map(|t| format!(r#" transform="{}""#, t))
            .unwrap_or_default();
        self.elements
            .push(format!("{}<g{}>", self.indent_str(), transform_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Add a node and its children
    pub fn add_node(&mut self, node: &Node) {
        match node {
            Node::Group {
                transform,
                children,
            } => {
                self.start_group(transform.as_deref());
                for child in children {
                    self.add_node(child);
                }
                self.end_group();
            }
            Node::Rect {
                x,
                width,
                height,
                fill,
            } => self.add_rect(*x, *width, *height, fill),
            Node::Path { d, stroke } => self.add_path(d, stroke),
        }
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            let vb = viewbox.padded(self.config.viewbox_padding);
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
            svg.push_str(&format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
                vb.x, vb.y, vb.width, vb.height
            ));
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        if self.config.standalone {
            svg.push_str("</svg>");
        } else if self.config.pretty_print {
            // fragments end without a trailing newline
            svg.pop();
        }

        svg
    }
}

/// Render a LayoutResult to an SVG string
pub fn render_svg(result: &LayoutResult, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_node(&result.to_node());
    builder.build(result.bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute, LayoutConfig, SymbolGeometry};
    use crate::symbol::ModuleMatrix;
    use pretty_assertions::assert_eq;

    fn layout(count: usize, config: &LayoutConfig) -> LayoutResult {
        let matrix = ModuleMatrix::from_rows([[true, false], [false, true]]).unwrap();
        let matrices = vec![matrix; count];
        compute(&matrices, SymbolGeometry::new(1, 4, 4), config).unwrap()
    }

    #[test]
    fn test_render_single_symbol_document() {
        let result = layout(1, &LayoutConfig::new().with_anchor(10.0, 20.0));
        let svg = render_svg(&result, &SvgConfig::default());
        assert_eq!(
            svg,
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="10 20 4 4">
  <g transform="translate(10.0, 20.0)">
    <path d="M1 1.5h1m0 1h1" stroke="#000"/>
  </g>
</svg>"##
        );
    }

    #[test]
    fn test_render_fragment() {
        let config = LayoutConfig::new().with_background(true).with_scale(2.5);
        let result = layout(2, &config);
        let svg = render_svg(&result, &SvgConfig::new().with_standalone(false));
        insta::assert_snapshot!(svg, @r##"
        <g transform="translate(0.0, 0.0) scale(2.500000)">
          <g>
            <rect width="4" height="4" x="0" fill="#FFF"/>
            <path d="M1 1.5h1m0 1h1" stroke="#000"/>
          </g>
          <g>
            <rect width="4" height="4" x="5" fill="#FFF"/>
            <path d="M6 1.5h1m0 1h1" stroke="#000"/>
          </g>
        </g>
        "##);
    }

    #[test]
    fn test_render_compact() {
        let result = layout(1, &LayoutConfig::default());
        let svg = render_svg(
            &result,
            &SvgConfig::new().with_standalone(false).with_pretty_print(false),
        );
        assert_eq!(
            svg,
            r##"<g transform="translate(0.0, 0.0)"><path d="M1 1.5h1m0 1h1" stroke="#000"/></g>"##
        );
    }

    #[test]
    fn test_viewbox_padding() {
        let result = layout(1, &LayoutConfig::default());
        let svg = render_svg(&result, &SvgConfig::new().with_viewbox_padding(2.0));
        assert!(svg.contains(r#"viewBox="-2 -2 8 8""#));
    }
}
