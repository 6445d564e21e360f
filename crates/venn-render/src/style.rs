//! Styling configuration for rendered diagrams.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use venn_core::errors::{ErrorInfo, VennError};

/// Circle outline appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStyle {
    /// No outline is drawn.
    None,
    /// Continuous stroke.
    #[default]
    Solid,
    /// Long dashes.
    Dashed,
    /// Short dots.
    Dotted,
}

impl OutlineStyle {
    /// All accepted spellings, for help text and errors.
    pub const CHOICES: [&'static str; 4] = ["none", "solid", "dashed", "dotted"];

    /// SVG `stroke-dasharray` for a stroke of `width` user units; `None` means solid.
    pub fn dash_array(self, width: f64) -> Option<String> {
        match self {
            OutlineStyle::Dashed => Some(format!("{:.2},{:.2}", width * 3.7, width * 1.6)),
            OutlineStyle::Dotted => Some(format!("{:.2},{:.2}", width, width * 1.65)),
            OutlineStyle::None | OutlineStyle::Solid => None,
        }
    }
}

impl FromStr for OutlineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(OutlineStyle::None),
            "solid" => Ok(OutlineStyle::Solid),
            "dashed" => Ok(OutlineStyle::Dashed),
            "dotted" => Ok(OutlineStyle::Dotted),
            other => Err(format!(
                "unknown outline style '{other}' (expected one of: {})",
                Self::CHOICES.join(", ")
            )),
        }
    }
}

/// Font family for numbers and set labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontFamily {
    /// Generic sans-serif.
    #[default]
    #[serde(rename = "sans-serif")]
    SansSerif,
    /// Generic serif.
    #[serde(rename = "serif")]
    Serif,
    /// Generic monospace.
    #[serde(rename = "monospace")]
    Monospace,
    /// Arial.
    Arial,
    /// Helvetica.
    Helvetica,
    /// Times New Roman.
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    /// Courier.
    Courier,
    /// Palatino.
    Palatino,
}

impl FontFamily {
    /// All accepted spellings, for help text and errors.
    pub const CHOICES: [&'static str; 8] = [
        "sans-serif",
        "serif",
        "monospace",
        "Arial",
        "Helvetica",
        "Times New Roman",
        "Courier",
        "Palatino",
    ];

    /// Name as written in the `font-family` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Courier => "Courier",
            FontFamily::Palatino => "Palatino",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            FontFamily::SansSerif,
            FontFamily::Serif,
            FontFamily::Monospace,
            FontFamily::Arial,
            FontFamily::Helvetica,
            FontFamily::TimesNewRoman,
            FontFamily::Courier,
            FontFamily::Palatino,
        ]
        .into_iter()
        .find(|family| family.as_str() == s)
        .ok_or_else(|| {
            format!(
                "unknown font '{s}' (expected one of: {})",
                Self::CHOICES.join(", ")
            )
        })
    }
}

/// Slant and weight combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    /// Upright, regular weight.
    #[default]
    Normal,
    /// Upright, bold.
    Bold,
    /// Italic, regular weight.
    Italic,
    /// Italic, bold.
    BoldItalic,
}

impl FontStyle {
    /// All accepted spellings, for help text and errors.
    pub const CHOICES: [&'static str; 4] = ["normal", "bold", "italic", "bold-italic"];

    /// `(font-style, font-weight)` attribute values.
    pub fn attributes(self) -> (&'static str, &'static str) {
        match self {
            FontStyle::Normal => ("normal", "normal"),
            FontStyle::Bold => ("normal", "bold"),
            FontStyle::Italic => ("italic", "normal"),
            FontStyle::BoldItalic => ("italic", "bold"),
        }
    }
}

impl FromStr for FontStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(FontStyle::Normal),
            "bold" => Ok(FontStyle::Bold),
            "italic" => Ok(FontStyle::Italic),
            "bold-italic" => Ok(FontStyle::BoldItalic),
            other => Err(format!(
                "unknown font style '{other}' (expected one of: {})",
                Self::CHOICES.join(", ")
            )),
        }
    }
}

/// Size, family and style of one class of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Size in points.
    pub size: f64,
    /// Font family.
    #[serde(default)]
    pub family: FontFamily,
    /// Slant and weight.
    #[serde(default)]
    pub style: FontStyle,
}

impl FontSpec {
    /// Regular sans-serif text at `size` points.
    pub const fn sized(size: f64) -> Self {
        Self {
            size,
            family: FontFamily::SansSerif,
            style: FontStyle::Normal,
        }
    }
}

/// Default fill colors for the first, second and third set.
pub const DEFAULT_COLORS: [&str; 3] = ["#456f01", "#00688B", "#ffac12"];

/// Complete styling for a diagram.
///
/// Sizes are in points and inches, as in print layouts; the SVG writer converts
/// them to pixels using [`StyleConfig::dpi`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Fill colors per set position. Hex codes, SVG names or R blue names.
    pub colors: [String; 3],
    /// Outline appearance.
    pub outline: OutlineStyle,
    /// Outline width in points.
    pub outline_width: f64,
    /// Font for region counts.
    pub number_font: FontSpec,
    /// Font for set labels.
    pub label_font: FontSpec,
    /// Figure width and height in inches.
    pub figsize: [f64; 2],
    /// Pixels per inch.
    pub dpi: u32,
    /// Fill opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.map(str::to_string),
            outline: OutlineStyle::Solid,
            outline_width: 2.0,
            number_font: FontSpec::sized(12.0),
            label_font: FontSpec::sized(14.0),
            figsize: [10.0, 8.0],
            dpi: 300,
            alpha: 0.5,
        }
    }
}

fn style_error(code: &str, message: &str, field: &str, value: impl ToString) -> VennError {
    VennError::Style(
        ErrorInfo::new(code, message)
            .with_context("field", field)
            .with_context("value", value.to_string()),
    )
}

impl StyleConfig {
    /// Loads a (possibly partial) style from YAML; missing fields take defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, VennError> {
        let config: StyleConfig = serde_yaml::from_str(text).map_err(|err| {
            VennError::Serde(ErrorInfo::new("venn_render.style_yaml", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML style file.
    pub fn load(path: &Path) -> Result<Self, VennError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            VennError::Style(
                ErrorInfo::new("venn_render.style_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Checks ranges that would otherwise produce an unreadable figure.
    pub fn validate(&self) -> Result<(), VennError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(style_error(
                "venn_render.alpha",
                "alpha must lie in [0, 1]",
                "alpha",
                self.alpha,
            ));
        }
        if !(self.outline_width >= 0.0) {
            return Err(style_error(
                "venn_render.outline_width",
                "outline width must not be negative",
                "outline_width",
                self.outline_width,
            ));
        }
        for (field, size) in [
            ("number_font.size", self.number_font.size),
            ("label_font.size", self.label_font.size),
            ("figsize.width", self.figsize[0]),
            ("figsize.height", self.figsize[1]),
        ] {
            if !(size > 0.0) || !size.is_finite() {
                return Err(style_error(
                    "venn_render.size",
                    "sizes must be positive",
                    field,
                    size,
                ));
            }
        }
        if self.dpi == 0 {
            return Err(style_error(
                "venn_render.dpi",
                "dpi must be positive",
                "dpi",
                self.dpi,
            ));
        }
        for (idx, color) in self.colors.iter().enumerate() {
            if color.trim().is_empty() {
                return Err(style_error(
                    "venn_render.color",
                    "color must not be blank",
                    &format!("colors[{idx}]"),
                    color,
                ));
            }
        }
        Ok(())
    }

    /// Fill color for the set at `index`, with R color names translated.
    pub fn fill_color(&self, index: usize) -> String {
        resolve_color(&self.colors[index % self.colors.len()])
    }

    /// Converts a size in points to user units at this DPI.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    /// Canvas size in pixels.
    pub fn canvas_px(&self) -> (f64, f64) {
        let dpi = f64::from(self.dpi);
        (self.figsize[0] * dpi, self.figsize[1] * dpi)
    }
}

const R_COLORS: [(&str, &str); 17] = [
    ("deepskyblue4", "#00688B"),
    ("deepskyblue3", "#009ACD"),
    ("deepskyblue2", "#00B2EE"),
    ("deepskyblue1", "#00BFFF"),
    ("deepskyblue", "#00BFFF"),
    ("skyblue4", "#4A708B"),
    ("skyblue3", "#6CA6CD"),
    ("skyblue2", "#7EC0EE"),
    ("skyblue1", "#87CEFF"),
    ("steelblue4", "#36648B"),
    ("steelblue3", "#4F94CD"),
    ("steelblue2", "#5CACEE"),
    ("steelblue1", "#63B8FF"),
    ("dodgerblue4", "#104E8B"),
    ("dodgerblue3", "#1874CD"),
    ("dodgerblue2", "#1C86EE"),
    ("dodgerblue1", "#1E90FF"),
];

/// Translates R's numbered blue color names to hex; other values pass through.
pub fn resolve_color(color: &str) -> String {
    let color = color.trim();
    R_COLORS
        .iter()
        .find(|(name, _)| *name == color)
        .map_or_else(|| color.to_string(), |(_, hex)| hex.to_string())
}
