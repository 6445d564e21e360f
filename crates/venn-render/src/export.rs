//! Conversion of the rendered SVG into raster, PDF, and EPS bytes.
//!
//! Raster output is `figsize x dpi` pixels on a white background. PDF keeps
//! the figure as vectors at `figsize` inches. EPS wraps the raster in a
//! PostScript `colorimage` with a bounding box of `figsize` in points.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use tracing::debug;
use venn_core::errors::{ErrorInfo, VennError};

use crate::style::StyleConfig;

/// User units per inch that usvg assigns to `in` lengths.
const SVG_UNITS_PER_INCH: f32 = 96.0;

/// Hex digits per line in the EPS image body.
const EPS_LINE_WIDTH: usize = 78;

fn render_error(code: &str, message: impl Into<String>) -> VennError {
    VennError::Render(ErrorInfo::new(code, message))
}

/// Rasterizes `svg` to an RGB image of `figsize x dpi` pixels.
pub fn rasterize(svg: &str, style: &StyleConfig) -> Result<RgbImage, VennError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|err| render_error("venn_render.svg_parse", err.to_string()))?;

    let (width, height) = style.canvas_px();
    let (width, height) = (width.round().max(1.0) as u32, height.round().max(1.0) as u32);
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        VennError::Render(
            ErrorInfo::new("venn_render.canvas", "canvas too large to allocate")
                .with_context("width", width.to_string())
                .with_context("height", height.to_string())
                .with_hint("lower --dpi or --figsize"),
        )
    })?;
    pixmap.fill(Color::WHITE);
    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    debug!(width, height, "rasterized figure");

    // Opaque background, so premultiplied and straight RGB agree.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| render_error("venn_render.canvas", "pixel buffer size mismatch"))
}

/// Encodes a rasterized figure in one of the `image` formats.
pub fn encode_raster(image: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, VennError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|err| {
            VennError::Render(
                ErrorInfo::new("venn_render.encode", err.to_string())
                    .with_context("format", format!("{format:?}")),
            )
        })?;
    Ok(bytes)
}

/// Converts `svg` into a single-page PDF of `figsize` inches.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, VennError> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|err| render_error("venn_render.svg_parse", err.to_string()))?;
    let page = svg2pdf::PageOptions {
        dpi: SVG_UNITS_PER_INCH,
    };
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|err| render_error("venn_render.pdf", err.to_string()))
}

/// Wraps a rasterized figure in an Encapsulated PostScript document.
pub fn encode_eps(image: &RgbImage, style: &StyleConfig) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let width_pt = style.figsize[0] * 72.0;
    let height_pt = style.figsize[1] * 72.0;
    let mut out = format!(
        "%!PS-Adobe-3.0 EPSF-3.0\n\
         %%BoundingBox: 0 0 {bw} {bh}\n\
         %%HiResBoundingBox: 0 0 {width_pt:.2} {height_pt:.2}\n\
         %%Creator: vcf-venn\n\
         %%LanguageLevel: 2\n\
         %%EndComments\n\
         gsave\n\
         {width_pt:.2} {height_pt:.2} scale\n\
         /row {row_bytes} string def\n\
         {width} {height} 8 [{width} 0 0 -{height} 0 {height}]\n\
         {{ currentfile row readhexstring pop }} false 3 colorimage\n",
        bw = width_pt.ceil() as u64,
        bh = height_pt.ceil() as u64,
        row_bytes = width as usize * 3,
    );
    let mut line = String::with_capacity(EPS_LINE_WIDTH + 1);
    for byte in image.as_raw() {
        line.push_str(&format!("{byte:02x}"));
        if line.len() >= EPS_LINE_WIDTH {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
    }
    if !line.is_empty() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("grestore\nshowpage\n%%EOF\n");
    out.into_bytes()
}
