use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use venn_core::{ReadOptions, ResolveOptions};
use venn_render::{FontFamily, FontStyle, OutlineStyle, StyleConfig};

#[derive(Parser, Debug)]
#[command(
    name = "vcf-venn",
    version,
    about = "Generate Venn diagrams from VCF comparison TSV files",
    after_help = "Examples:\n  vcf-venn -i summary.tsv -o venn.png\n  \
                  vcf-venn -i summary.tsv -o venn.svg --color1 '#456f01' --color2 '#00688B' --color3 '#ffac12'\n  \
                  vcf-venn -i summary.tsv -o venn.pdf --fontsize 14 --font Arial --style bold\n  \
                  vcf-venn -i summary.tsv -o venn.svg --outline none"
)]
pub struct Cli {
    /// Input TSV file from VCF comparison.
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output file for the Venn diagram (svg, png, jpg, jpeg, tif, tiff, pdf, eps).
    #[arg(short, long)]
    pub output: PathBuf,
    /// Color for first caller circle (default: #456f01).
    #[arg(long)]
    pub color1: Option<String>,
    /// Color for second caller circle (default: #00688B).
    #[arg(long)]
    pub color2: Option<String>,
    /// Color for third caller circle (default: #ffac12).
    #[arg(long)]
    pub color3: Option<String>,
    /// Style of circle outlines: none, solid, dashed, dotted (default: solid).
    #[arg(long)]
    pub outline: Option<OutlineStyle>,
    /// Width of circle outlines in points (default: 2.0).
    #[arg(long = "outline-width")]
    pub outline_width: Option<f64>,
    /// Font size for numbers in circles (default: 12).
    #[arg(long)]
    pub fontsize: Option<f64>,
    /// Font family for numbers (default: sans-serif).
    #[arg(long)]
    pub font: Option<FontFamily>,
    /// Font style for numbers: normal, bold, italic, bold-italic (default: normal).
    #[arg(long)]
    pub style: Option<FontStyle>,
    /// Font size for caller labels (default: 14).
    #[arg(long = "label-fontsize")]
    pub label_fontsize: Option<f64>,
    /// Font family for labels (default: sans-serif).
    #[arg(long = "label-font")]
    pub label_font: Option<FontFamily>,
    /// Font style for labels (default: normal).
    #[arg(long = "label-style")]
    pub label_style: Option<FontStyle>,
    /// Figure size in inches (default: 10 8).
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub figsize: Option<Vec<f64>>,
    /// Resolution in dots per inch for raster output and text sizing (default: 300).
    #[arg(long)]
    pub dpi: Option<u32>,
    /// Circle opacity, 0 transparent to 1 opaque (default: 0.5).
    #[arg(long)]
    pub alpha: Option<f64>,
    /// YAML file with styling; flags given on the command line take precedence.
    #[arg(long = "style-config")]
    pub style_config: Option<PathBuf>,
    /// Comma separated columns to compare, when the table has more than three.
    #[arg(long, value_delimiter = ',')]
    pub sets: Option<Vec<String>>,
    /// Field delimiter of the input table.
    #[arg(long, default_value_t = '\t')]
    pub delimiter: char,
    /// Also write region counts as JSON to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the styling from the optional file, then applies flag overrides.
    pub fn style_config(&self) -> Result<StyleConfig, Box<dyn Error>> {
        let mut style = match &self.style_config {
            Some(path) => StyleConfig::load(path)?,
            None => StyleConfig::default(),
        };
        for (slot, color) in [&self.color1, &self.color2, &self.color3]
            .into_iter()
            .enumerate()
        {
            if let Some(color) = color {
                style.colors[slot] = color.clone();
            }
        }
        if let Some(outline) = self.outline {
            style.outline = outline;
        }
        if let Some(width) = self.outline_width {
            style.outline_width = width;
        }
        if let Some(size) = self.fontsize {
            style.number_font.size = size;
        }
        if let Some(family) = self.font {
            style.number_font.family = family;
        }
        if let Some(font_style) = self.style {
            style.number_font.style = font_style;
        }
        if let Some(size) = self.label_fontsize {
            style.label_font.size = size;
        }
        if let Some(family) = self.label_font {
            style.label_font.family = family;
        }
        if let Some(font_style) = self.label_style {
            style.label_font.style = font_style;
        }
        if let Some(figsize) = &self.figsize {
            style.figsize = [figsize[0], figsize[1]];
        }
        if let Some(dpi) = self.dpi {
            style.dpi = dpi;
        }
        if let Some(alpha) = self.alpha {
            style.alpha = alpha;
        }
        style.validate()?;
        Ok(style)
    }

    pub fn read_options(&self) -> Result<ReadOptions, Box<dyn Error>> {
        if !self.delimiter.is_ascii() {
            return Err(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )
            .into());
        }
        Ok(ReadOptions {
            delimiter: self.delimiter as u8,
        })
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            sets: self.sets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(extra: &[&str]) -> Cli {
        let mut argv = vec!["vcf-venn", "-i", "in.tsv", "-o", "out.svg"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).expect("parse args")
    }

    #[test]
    fn defaults_match_style_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.style_config().unwrap(), StyleConfig::default());
        assert_eq!(cli.read_options().unwrap().delimiter, b'\t');
        assert!(cli.resolve_options().sets.is_none());
    }

    #[test]
    fn flags_override_style() {
        let cli = parse(&[
            "--color2",
            "dodgerblue4",
            "--outline",
            "dashed",
            "--font",
            "Times New Roman",
            "--label-style",
            "bold-italic",
            "--figsize",
            "6",
            "4",
            "--alpha",
            "0.3",
            "--sets",
            "GATK,FreeBayes",
        ]);
        let style = cli.style_config().unwrap();
        assert_eq!(style.colors[1], "dodgerblue4");
        assert_eq!(style.outline, OutlineStyle::Dashed);
        assert_eq!(style.number_font.family, FontFamily::TimesNewRoman);
        assert_eq!(style.label_font.style, FontStyle::BoldItalic);
        assert_eq!(style.figsize, [6.0, 4.0]);
        assert_eq!(style.alpha, 0.3);
        assert_eq!(
            cli.resolve_options().sets,
            Some(vec!["GATK".to_string(), "FreeBayes".to_string()])
        );
    }

    #[test]
    fn flags_take_precedence_over_style_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "alpha: 0.9\ndpi: 150").expect("write");
        let path = file.path().to_str().expect("utf8 path").to_string();
        let cli = parse(&["--style-config", &path, "--alpha", "0.2"]);
        let style = cli.style_config().unwrap();
        assert_eq!(style.alpha, 0.2);
        assert_eq!(style.dpi, 150);
    }

    #[test]
    fn invalid_choices_are_rejected() {
        let argv = ["vcf-venn", "-i", "a", "-o", "b", "--outline", "wavy"];
        assert!(Cli::try_parse_from(argv).is_err());
        let cli = parse(&["--alpha", "2"]);
        assert!(cli.style_config().is_err());
    }
}
