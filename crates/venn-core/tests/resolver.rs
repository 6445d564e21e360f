use std::io::Write;

use venn_core::{
    count_regions, resolve_sets, ReadOptions, ResolveOptions, Table, TableReader, VennError,
};

fn parse(text: &str) -> Table {
    Table::from_reader(text.as_bytes(), &ReadOptions::default()).expect("parse table")
}

#[test]
fn single_indicator_is_unsupported() {
    let table = parse("ID\tGATK\tTotalCallersIdentified\nv1\t1\t2\nv2\t0\t3\n");
    let err = resolve_sets(&table, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, VennError::UnsupportedCardinality(_)));
    assert_eq!(err.info().context["observed"], "1");
    assert_eq!(err.info().context["candidates"], "GATK");
}

#[test]
fn four_indicators_are_ambiguous() {
    let table = parse("A\tB\tC\tD\n1\t0\t1\t0\n0\t1\t0\t1\n");
    let err = resolve_sets(&table, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, VennError::AmbiguousColumns(_)));
    assert_eq!(err.info().context["candidates"], "A,B,C,D");
    assert!(err.info().hint.is_some());
}

#[test]
fn four_indicators_resolve_with_selection() {
    let table = parse("A\tB\tC\tD\n1\t0\t1\t0\n0\t1\t0\t1\n");
    let opts = ResolveOptions {
        sets: Some(vec!["B".into(), "C".into(), "D".into()]),
    };
    let sets = resolve_sets(&table, &opts).unwrap();
    assert_eq!(sets.names(), vec!["B", "C", "D"]);
}

#[test]
fn selection_of_four_is_unsupported() {
    let table = parse("A\tB\tC\tD\n1\t0\t1\t0\n");
    let opts = ResolveOptions {
        sets: Some(vec!["A".into(), "B".into(), "C".into(), "D".into()]),
    };
    assert!(matches!(
        resolve_sets(&table, &opts),
        Err(VennError::UnsupportedCardinality(_))
    ));
}

#[test]
fn header_only_table_is_empty() {
    let table = parse("A\tB\n");
    assert_eq!(table.row_count(), 0);
    assert!(matches!(
        resolve_sets(&table, &ResolveOptions::default()),
        Err(VennError::EmptyTable(_))
    ));
}

#[test]
fn missing_value_disqualifies_a_column() {
    let table = parse("A\tB\tC\n1\t0\t1\n0\t\t1\n");
    let sets = resolve_sets(&table, &ResolveOptions::default()).unwrap();
    assert_eq!(sets.names(), vec!["A", "C"]);
}

#[test]
fn comparison_summary_file_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "CHROM\tPOS\tTotalCallersIdentified\tBcftools\tFreeBayes\tGATK\n\
         chr1\t100\t1\t1\t0\t0\n\
         chr1\t200\t3\t1\t1\t1\n\
         chr1\t300\t2\t0\t1\t1\n\
         chr2\t50\t1\t0\t0\t1\n"
    )
    .expect("write");
    let table = Table::from_path(file.path(), &ReadOptions::default()).expect("read");
    let sets = resolve_sets(&table, &ResolveOptions::default()).expect("resolve");
    assert_eq!(sets.names(), vec!["Bcftools", "FreeBayes", "GATK"]);
    let map = count_regions(&sets).expect("count");
    assert_eq!(map.unique("Bcftools"), Some(1));
    assert_eq!(map.unique("GATK"), Some(1));
    assert_eq!(map.pair("FreeBayes", "GATK"), Some(1));
    assert_eq!(map.all_sets(), 1);
}

#[test]
fn comma_delimiter_is_configurable() {
    let opts = ReadOptions { delimiter: b',' };
    let table = Table::from_reader("X,Y\n1,0\n1,1\n".as_bytes(), &opts).unwrap();
    let sets = resolve_sets(&table, &ResolveOptions::default()).unwrap();
    assert_eq!(count_regions(&sets).unwrap().get(&["X"]), Some(1));
}

#[test]
fn missing_file_is_a_table_error() {
    let err = Table::from_path(
        std::path::Path::new("/nonexistent/summary.tsv"),
        &ReadOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.info().code, "venn_core.open");
}
