//! SVG document writer for a computed layout.
//!
//! Sizes are in pixels of a `figsize x dpi` viewBox; the root element carries
//! the physical size in inches.

use venn_core::errors::VennError;
use venn_core::RegionCountMap;

use crate::layout::{compute_layout, Point, VennLayout};
use crate::style::{FontSpec, OutlineStyle, StyleConfig};

/// Share of the shorter canvas side the diagram may occupy.
const FILL_FRACTION: f64 = 0.9;

/// Escapes text for use inside SVG attributes and text nodes.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

struct Canvas {
    width: f64,
    height: f64,
    scale: f64,
    offset: Point,
}

impl Canvas {
    fn fit(layout: &VennLayout, style: &StyleConfig) -> Self {
        let (width, height) = style.canvas_px();
        let (min, max) = layout.bounds();
        let span_x = (max.x - min.x).max(1e-9);
        let span_y = (max.y - min.y).max(1e-9);
        let scale = (width * FILL_FRACTION / span_x).min(height * FILL_FRACTION / span_y);
        let offset = Point {
            x: width / 2.0 - (min.x + max.x) / 2.0 * scale,
            y: height / 2.0 + (min.y + max.y) / 2.0 * scale,
        };
        Self {
            width,
            height,
            scale,
            offset,
        }
    }

    fn project(&self, point: Point) -> (f64, f64) {
        (
            self.offset.x + point.x * self.scale,
            self.offset.y - point.y * self.scale,
        )
    }
}

fn text_element(x: f64, y: f64, font: &FontSpec, style: &StyleConfig, body: &str) -> String {
    let (slant, weight) = font.style.attributes();
    format!(
        "<text x='{x:.2}' y='{y:.2}' text-anchor='middle' dominant-baseline='central' \
         font-family='{family}' font-size='{size:.2}' font-style='{slant}' font-weight='{weight}'>{body}</text>",
        family = escape_xml(font.family.as_str()),
        size = style.points_to_px(font.size),
        body = escape_xml(body),
    )
}

/// Renders the count map as a standalone SVG document.
///
/// Output is a pure function of the counts and style.
pub fn render_venn_svg(map: &RegionCountMap, style: &StyleConfig) -> Result<String, VennError> {
    style.validate()?;
    let layout = compute_layout(map);
    let canvas = Canvas::fit(&layout, style);
    let mut parts = vec![format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w_in}in' height='{h_in}in' \
         viewBox='0 0 {w:.0} {h:.0}' data-dpi='{dpi}'>",
        w_in = style.figsize[0],
        h_in = style.figsize[1],
        w = canvas.width,
        h = canvas.height,
        dpi = style.dpi,
    )];

    for (idx, circle) in layout.circles.iter().enumerate() {
        let (cx, cy) = canvas.project(circle.center);
        parts.push(format!(
            "<circle cx='{cx:.2}' cy='{cy:.2}' r='{r:.2}' fill='{fill}' fill-opacity='{alpha}' stroke='none' />",
            r = circle.radius * canvas.scale,
            fill = escape_xml(&style.fill_color(idx)),
            alpha = style.alpha,
        ));
    }

    if style.outline != OutlineStyle::None && style.outline_width > 0.0 {
        let stroke_width = style.points_to_px(style.outline_width);
        let dash = style
            .outline
            .dash_array(stroke_width)
            .map(|dash| format!(" stroke-dasharray='{dash}'"))
            .unwrap_or_default();
        for circle in &layout.circles {
            let (cx, cy) = canvas.project(circle.center);
            parts.push(format!(
                "<circle cx='{cx:.2}' cy='{cy:.2}' r='{r:.2}' fill='none' stroke='#000000' stroke-width='{stroke_width:.2}'{dash} />",
                r = circle.radius * canvas.scale,
            ));
        }
    }

    for (region, anchor) in &layout.region_anchors {
        let (x, y) = canvas.project(*anchor);
        parts.push(text_element(
            x,
            y,
            &style.number_font,
            style,
            &map.count(*region).to_string(),
        ));
    }

    for (name, anchor) in map.names().iter().zip(&layout.set_anchors) {
        let (x, y) = canvas.project(*anchor);
        parts.push(text_element(x, y, &style.label_font, style, name));
    }

    parts.push("</svg>\n".into());
    Ok(parts.join(""))
}
