//! SVG generation from a board scene

use crate::board::{Color, Point, Rect};
use crate::stylesheet::{GlyphSet, Stylesheet};

use super::scene::{DrawOp, Scene, Shade};
use super::SvgConfig;

/// Glyph size relative to the square side.
const GLYPH_SCALE: f64 = 0.8;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the arrowhead marker used by every arrow line
    pub fn add_arrow_marker(&mut self, color: &str) {
        let prefix = self.prefix();
        // orient="auto" turns the head to follow the line; the default
        // markerUnits="strokeWidth" scales it with the arrow width.
        self.defs.push(format!(
            r#"<marker id="{prefix}arrowhead" viewBox="0 0 10 10" refX="5" refY="5" markerWidth="3" markerHeight="3" orient="auto"><path d="M0,0 L10,5 L0,10 Z" fill="{color}"/></marker>"#
        ));
    }

    /// Add a filled board square
    pub fn add_square(&mut self, name: &str, cell: &Rect, shade: &str, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}square {}{}" data-square="{}" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            prefix,
            shade,
            name,
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            fill
        ));
    }

    /// Add a piece glyph centered in its cell
    pub fn add_piece(&mut self, name: &str, glyph: char, cell: &Rect, styles: &str) {
        let prefix = self.prefix();
        let center = cell.center();
        self.elements.push(format!(
            r#"{}<text class="{}piece" data-square="{}" x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central"{}>{}</text>"#,
            self.indent_str(),
            prefix,
            name,
            center.x,
            center.y,
            cell.height * GLYPH_SCALE,
            styles,
            escape_xml(&glyph.to_string())
        ));
    }

    /// Add a translucent overlay on one square
    pub fn add_highlight(&mut self, name: &str, cell: &Rect, fill: &str, opacity: f64) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}highlight" data-square="{}" x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            self.indent_str(),
            prefix,
            name,
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            fill,
            opacity
        ));
    }

    /// Add an arrow line between two square centers
    pub fn add_arrow(&mut self, from: &Point, to: &Point, styles: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<line class="{}arrow" x1="{}" y1="{}" x2="{}" y2="{}"{} marker-end="url(#{}arrowhead)"/>"#,
            self.indent_str(),
            prefix,
            from.x,
            from.y,
            to.x,
            to.y,
            styles,
            prefix
        ));
    }

    /// Build the final SVG string
    pub fn build(self, size: f64) -> String {
        let nl = self.newline();
        let indent = self.indent_str();
        let prefix = self.prefix();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="{prefix}board" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str(indent);
            svg.push_str("<defs>");
            for def in &self.defs {
                svg.push_str(def);
            }
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a scene to an SVG string
pub fn render_svg(scene: &Scene, config: &SvgConfig, stylesheet: &Stylesheet) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    if scene.has_arrows() {
        builder.add_arrow_marker(&color(stylesheet, "arrow"));
    }

    for op in &scene.ops {
        render_op(op, stylesheet, &mut builder);
    }

    builder.build(scene.size)
}

fn render_op(op: &DrawOp, stylesheet: &Stylesheet, builder: &mut SvgBuilder) {
    match op {
        DrawOp::Square {
            square,
            cell,
            shade,
        } => {
            let (class, token) = match shade {
                Shade::Light => ("light", "light-square"),
                Shade::Dark => ("dark", "dark-square"),
            };
            builder.add_square(
                &square.to_string(),
                cell,
                class,
                &color(stylesheet, token),
            );
        }
        DrawOp::Piece {
            square,
            piece,
            cell,
        } => {
            let glyph = match stylesheet.glyphs {
                GlyphSet::Unicode => piece.kind.symbol(),
                GlyphSet::Letters => piece.kind.letter().to_ascii_uppercase(),
            };
            builder.add_piece(
                &square.to_string(),
                glyph,
                cell,
                &format_piece_styles(piece.color, stylesheet),
            );
        }
        DrawOp::Highlight { square, cell } => {
            builder.add_highlight(
                &square.to_string(),
                cell,
                &color(stylesheet, "highlight"),
                stylesheet.highlight_opacity,
            );
        }
        DrawOp::Arrow { from, to, .. } => {
            builder.add_arrow(from, to, &format_arrow_styles(stylesheet));
        }
    }
}

/// Fill by side; white glyphs get an outline so they read on light squares
fn format_piece_styles(side: Color, stylesheet: &Stylesheet) -> String {
    let mut parts = vec![];
    match side {
        Color::White => {
            parts.push(format!(
                r#" fill="{}""#,
                color(stylesheet, "white-piece")
            ));
            parts.push(format!(
                r#" stroke="{}" stroke-width="1""#,
                color(stylesheet, "piece-stroke")
            ));
        }
        Color::Black => {
            parts.push(format!(
                r#" fill="{}""#,
                color(stylesheet, "black-piece")
            ));
        }
    }
    if let Some(family) = &stylesheet.font_family {
        parts.push(format!(r#" font-family="{}""#, escape_xml(family)));
    }
    parts.join("")
}

/// Resolve a stylesheet color, escaped for use inside an attribute
fn color(stylesheet: &Stylesheet, token: &str) -> String {
    escape_xml(&stylesheet.resolve_or_default(token))
}

/// Format arrow stroke attributes
fn format_arrow_styles(stylesheet: &Stylesheet) -> String {
    format!(
        r#" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="round""#,
        color(stylesheet, "arrow"),
        stylesheet.arrow_width,
        stylesheet.arrow_opacity
    )
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Orientation, Square};
    use crate::renderer::{Renderer, RendererOptions};

    fn renderer(fen: &str) -> Renderer {
        Renderer::new(fen, RendererOptions::default()).unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#""Serif""#), "&quot;Serif&quot;");
    }

    #[test]
    fn test_empty_board_svg() {
        let svg = renderer("8/8/8/8/8/8/8/8").to_svg(&SvgConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 320 320""#));
        assert_eq!(svg.matches("cd-square").count(), 64);
        assert_eq!(svg.matches("cd-light").count(), 32);
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_square_element() {
        let svg = renderer("8/8/8/8/8/8/8/8").to_svg(&SvgConfig::default());
        assert!(svg.contains(
            r##"<rect class="cd-square cd-light" data-square="a8" x="0" y="0" width="40" height="40" fill="#f0d9b5"/>"##
        ));
        assert!(svg.contains(
            r##"<rect class="cd-square cd-dark" data-square="a1" x="0" y="280" width="40" height="40" fill="#b58863"/>"##
        ));
    }

    #[test]
    fn test_piece_glyphs() {
        let svg = renderer("4k3/8/8/8/8/8/8/4K3").to_svg(&SvgConfig::default());
        assert!(svg.contains(
            r##"<text class="cd-piece" data-square="e1" x="180" y="300" font-size="32" text-anchor="middle" dominant-baseline="central" fill="#ffffff" stroke="#000000" stroke-width="1">♚</text>"##
        ));
        assert!(svg.contains(
            r##"<text class="cd-piece" data-square="e8" x="180" y="20" font-size="32" text-anchor="middle" dominant-baseline="central" fill="#000000">♚</text>"##
        ));
    }

    #[test]
    fn test_letter_glyphs() {
        let mut style = Stylesheet::default();
        style.glyphs = GlyphSet::Letters;
        let r = Renderer::new(
            "4k3/8/8/8/8/8/8/4K3",
            RendererOptions {
                orientation: Orientation::White,
                style,
            },
        )
        .unwrap();
        let svg = r.to_svg(&SvgConfig::default());
        assert_eq!(svg.matches(">K</text>").count(), 2);
    }

    #[test]
    fn test_arrow_and_marker() {
        let mut r = renderer("8/8/8/8/8/8/8/8");
        r.add_arrow("e2", "e4").unwrap();
        let svg = r.to_svg(&SvgConfig::default());
        assert!(svg.contains(r#"<marker id="cd-arrowhead""#));
        assert!(svg.contains(
            r##"<line class="cd-arrow" x1="180" y1="260" x2="180" y2="180" stroke="#15781b" stroke-width="8" stroke-opacity="0.8" stroke-linecap="round" marker-end="url(#cd-arrowhead)"/>"##
        ));
    }

    #[test]
    fn test_highlight_overlay() {
        let mut r = renderer("8/8/8/8/8/8/8/8");
        r.highlight("g7").unwrap();
        let svg = r.to_svg(&SvgConfig::default());
        assert!(svg.contains(
            r##"<rect class="cd-highlight" data-square="g7" x="240" y="40" width="40" height="40" fill="#ffeb3b" fill-opacity="0.5"/>"##
        ));
    }

    #[test]
    fn test_compact_and_standalone() {
        let config = SvgConfig::new()
            .with_pretty_print(false)
            .with_standalone(true)
            .without_class_prefix();
        let svg = renderer("8/8/8/8/8/8/8/8").to_svg(&config);
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><svg"#));
        assert!(!svg.contains('\n'));
        assert!(svg.contains(r#"class="square light""#));
    }

    #[test]
    fn test_stylesheet_colors_are_escaped() {
        let style = Stylesheet::from_str(
            r#"
[colors]
light-square = '"/><script>alert(1)</script><rect x="'
arrow = "<red>"
"#,
        )
        .unwrap();
        let mut r = Renderer::new(
            "8/8/8/8/8/8/8/8",
            RendererOptions {
                orientation: Orientation::White,
                style,
            },
        )
        .unwrap();
        r.add_arrow("a1", "h8").unwrap();
        let svg = r.to_svg(&SvgConfig::default());
        assert!(!svg.contains("<script>"));
        assert!(!svg.contains("<red>"));
        assert!(svg.contains(r#"fill="&quot;/&gt;&lt;script&gt;"#));
        assert!(svg.contains(r#"stroke="&lt;red&gt;""#));
        assert_eq!(svg.matches("<rect").count(), 64);
    }

    #[test]
    fn test_render_svg_from_scene() {
        let scene = Scene {
            size: 80.0,
            ops: vec![DrawOp::Square {
                square: "a1".parse::<Square>().unwrap(),
                cell: Rect::new(0.0, 0.0, 10.0, 10.0),
                shade: Shade::Dark,
            }],
        };
        let svg = render_svg(&scene, &SvgConfig::default(), &Stylesheet::default());
        insta::assert_snapshot!(svg, @r##"
        <svg xmlns="http://www.w3.org/2000/svg" class="cd-board" viewBox="0 0 80 80" width="80" height="80">
          <rect class="cd-square cd-dark" data-square="a1" x="0" y="0" width="10" height="10" fill="#b58863"/>
        </svg>
        "##);
    }
}
