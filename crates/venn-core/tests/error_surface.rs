use venn_core::errors::{ErrorInfo, VennError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("column", "GATK")
        .with_context("observed", "4")
}

#[test]
fn display_includes_context_and_hint() {
    let err = VennError::AmbiguousColumns(
        sample_info("venn_core.ambiguous_columns", "too many").with_hint("pick sets"),
    );
    let text = err.to_string();
    assert!(text.starts_with("ambiguous columns: too many (code: venn_core.ambiguous_columns)"));
    assert!(text.contains("column=GATK, observed=4"));
    assert!(text.ends_with("| hint: pick sets"));
}

#[test]
fn every_family_exposes_its_payload() {
    let errors = [
        VennError::EmptyTable(sample_info("E1", "empty")),
        VennError::UnsupportedCardinality(sample_info("E2", "cardinality")),
        VennError::AmbiguousColumns(sample_info("E3", "ambiguous")),
        VennError::InvalidCardinality(sample_info("E4", "invalid")),
        VennError::MalformedIndicator(sample_info("E5", "malformed")),
        VennError::Table(sample_info("E6", "table")),
        VennError::Style(sample_info("E7", "style")),
        VennError::Render(sample_info("E8", "render")),
        VennError::Serde(sample_info("E9", "serde")),
    ];
    for (idx, err) in errors.iter().enumerate() {
        assert_eq!(err.info().code, format!("E{}", idx + 1));
        assert!(err.info().context.contains_key("column"));
    }
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = VennError::EmptyTable(ErrorInfo::new("venn_core.empty_table", "no rows"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "EmptyTable");
    assert_eq!(json["detail"]["code"], "venn_core.empty_table");
    let back: VennError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
