use std::fs;
use std::path::Path;

use venn_core::{count_regions, IndicatorColumn, SetCollection, VennError};
use venn_render::{write_figure, OutputFormat, StyleConfig};

fn two_way() -> venn_core::RegionCountMap {
    let sets = SetCollection::new(vec![
        IndicatorColumn::new("GATK", vec![true, true, false]),
        IndicatorColumn::new("FreeBayes", vec![false, true, true]),
    ])
    .unwrap();
    count_regions(&sets).unwrap()
}

#[test]
fn svg_written_into_new_directory() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let path = temp.path().join("figures").join("venn.SVG");
    write_figure(&path, &two_way(), &StyleConfig::default()).expect("write");
    let contents = fs::read_to_string(&path).expect("read back");
    assert!(contents.starts_with("<svg"));
    assert!(contents.contains(">GATK</text>"));
}

fn small_style() -> StyleConfig {
    StyleConfig {
        figsize: [2.0, 1.5],
        dpi: 40,
        ..StyleConfig::default()
    }
}

#[test]
fn formats_follow_extension() {
    for (name, format) in [
        ("venn.svg", OutputFormat::Svg),
        ("venn.PNG", OutputFormat::Png),
        ("venn.jpg", OutputFormat::Jpeg),
        ("venn.jpeg", OutputFormat::Jpeg),
        ("venn.tiff", OutputFormat::Tiff),
        ("venn.pdf", OutputFormat::Pdf),
        ("venn.eps", OutputFormat::Eps),
    ] {
        assert_eq!(OutputFormat::from_path(Path::new(name)).unwrap(), format, "{name}");
    }
}

#[test]
fn png_is_sized_from_figsize_and_dpi() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let path = temp.path().join("plots").join("venn.png");
    write_figure(&path, &two_way(), &small_style()).expect("write png");
    let bytes = fs::read(&path).expect("read back");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert_eq!(image::image_dimensions(&path).expect("png header"), (80, 60));
}

#[test]
fn jpeg_and_tiff_decode_at_canvas_size() {
    let temp = tempfile::tempdir().expect("tmp dir");
    for name in ["venn.jpg", "venn.tiff"] {
        let path = temp.path().join(name);
        write_figure(&path, &two_way(), &small_style()).expect("write raster");
        let decoded = image::open(&path).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (80, 60), "{name}");
    }
}

#[test]
fn pdf_and_eps_are_paged_documents() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let pdf = temp.path().join("venn.pdf");
    write_figure(&pdf, &two_way(), &small_style()).expect("write pdf");
    assert!(fs::read(&pdf).expect("read pdf").starts_with(b"%PDF-"));

    let eps = temp.path().join("venn.eps");
    write_figure(&eps, &two_way(), &small_style()).expect("write eps");
    let text = fs::read_to_string(&eps).expect("read eps");
    assert!(text.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
    assert!(text.contains("%%BoundingBox: 0 0 144 108"));
    assert!(text.contains("80 60 8 [80 0 0 -60 0 60]"));
}

#[test]
fn invalid_style_writes_nothing() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let path = temp.path().join("venn.png");
    let style = StyleConfig {
        alpha: 3.0,
        ..small_style()
    };
    let err = write_figure(&path, &two_way(), &style).unwrap_err();
    assert!(matches!(err, VennError::Style(_)));
    assert!(!path.exists());
}

#[test]
fn unknown_extension_is_an_error() {
    let err = OutputFormat::from_path(Path::new("venn.txt")).unwrap_err();
    assert_eq!(err.info().code, "venn_render.unknown_format");
}

#[test]
fn style_yaml_overrides_defaults() {
    let yaml = "alpha: 0.8\noutline: dotted\nlabel_font:\n  size: 20\n  family: Times New Roman\n  style: bold\ncolors: ['red', 'steelblue4', '#000000']\n";
    let style = StyleConfig::from_yaml_str(yaml).expect("parse");
    assert_eq!(style.alpha, 0.8);
    assert_eq!(style.label_font.size, 20.0);
    assert_eq!(style.number_font.size, 12.0);
    assert_eq!(style.fill_color(1), "#36648B");
    assert_eq!(style.dpi, 300);

    let bad = StyleConfig::from_yaml_str("dpi: 0\n").unwrap_err();
    assert!(matches!(bad, VennError::Style(_)));
}
