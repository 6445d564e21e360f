//! Figure output by file extension.

use std::fs;
use std::path::Path;

use image::ImageFormat;
use tracing::info;
use venn_core::errors::{ErrorInfo, VennError};
use venn_core::RegionCountMap;

use crate::export::{encode_eps, encode_raster, rasterize, svg_to_pdf};
use crate::style::StyleConfig;
use crate::svg::render_venn_svg;

/// Figure formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Scalable vector graphics, written as rendered.
    Svg,
    /// Portable network graphics.
    Png,
    /// JPEG, for `.jpg` and `.jpeg`.
    Jpeg,
    /// TIFF, for `.tif` and `.tiff`.
    Tiff,
    /// Single-page PDF with vector content.
    Pdf,
    /// Encapsulated PostScript around the raster image.
    Eps,
}

impl OutputFormat {
    /// Picks the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, VennError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            "pdf" => Ok(OutputFormat::Pdf),
            "eps" => Ok(OutputFormat::Eps),
            _ => Err(VennError::Render(
                ErrorInfo::new("venn_render.unknown_format", "unrecognised output extension")
                    .with_context("path", path.display().to_string())
                    .with_hint("use one of .svg, .png, .jpg, .jpeg, .tif, .tiff, .pdf, .eps"),
            )),
        }
    }
}

/// Renders `map` and encodes it as `format`, without touching the filesystem.
pub fn encode_figure(
    format: OutputFormat,
    map: &RegionCountMap,
    style: &StyleConfig,
) -> Result<Vec<u8>, VennError> {
    let svg = render_venn_svg(map, style)?;
    match format {
        OutputFormat::Svg => Ok(svg.into_bytes()),
        OutputFormat::Pdf => svg_to_pdf(&svg),
        OutputFormat::Eps => Ok(encode_eps(&rasterize(&svg, style)?, style)),
        OutputFormat::Png => encode_raster(&rasterize(&svg, style)?, ImageFormat::Png),
        OutputFormat::Jpeg => encode_raster(&rasterize(&svg, style)?, ImageFormat::Jpeg),
        OutputFormat::Tiff => encode_raster(&rasterize(&svg, style)?, ImageFormat::Tiff),
    }
}

/// Writes `bytes` to `path`, creating parent directories.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), VennError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                VennError::Render(
                    ErrorInfo::new("venn_render.output_dir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
    }
    fs::write(path, bytes).map_err(|err| {
        VennError::Render(
            ErrorInfo::new("venn_render.write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Renders `map` in the format named by the extension of `path` and writes it.
///
/// Nothing is written when the extension is unknown or rendering fails.
pub fn write_figure(path: &Path, map: &RegionCountMap, style: &StyleConfig) -> Result<(), VennError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_figure(format, map, style)?;
    write_output(path, &bytes)?;
    info!(path = %path.display(), ?format, sets = map.set_count(), "wrote figure");
    Ok(())
}
