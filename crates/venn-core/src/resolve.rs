//! Column resolution: decides which header columns are membership indicators
//! and selects the sets to compare.
//!
//! Decision rule: a column is an indicator when every one of its cells parses
//! with [`parse_indicator`]. Identifier and count columns fail that test on
//! their first non-boolean literal and are ignored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ErrorInfo, VennError};
use crate::sets::{IndicatorColumn, SetCollection, MAX_SETS, MIN_SETS};
use crate::table::{parse_indicator, TableReader};

/// Outcome of classifying a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnClass {
    /// Every cell is a boolean literal.
    Indicator,
    /// At least one cell is not boolean; the first offender is recorded.
    Other {
        /// Row of the first non-boolean cell.
        row: usize,
        /// The offending literal.
        literal: String,
    },
}

/// Classification result for one header column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// Column name as it appears in the header.
    pub name: String,
    /// Indicator or not.
    pub class: ColumnClass,
}

impl ColumnReport {
    /// Whether the column qualifies as a membership indicator.
    pub fn is_indicator(&self) -> bool {
        matches!(self.class, ColumnClass::Indicator)
    }
}

/// Caller supplied overrides for set selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Explicit set names in display order. Disambiguates tables with more
    /// than three indicator columns.
    #[serde(default)]
    pub sets: Option<Vec<String>>,
}

/// Classifies every column of the table, in header order.
pub fn classify_columns<T: TableReader + ?Sized>(table: &T) -> Vec<ColumnReport> {
    table
        .column_names()
        .iter()
        .map(|name| ColumnReport {
            name: name.clone(),
            class: classify_column(table, name),
        })
        .collect()
}

fn classify_column<T: TableReader + ?Sized>(table: &T, name: &str) -> ColumnClass {
    for row in 0..table.row_count() {
        let literal = table.cell_value(row, name).unwrap_or_default();
        if parse_indicator(literal).is_none() {
            return ColumnClass::Other {
                row,
                literal: literal.to_string(),
            };
        }
    }
    ColumnClass::Indicator
}

/// Selects the 2 or 3 indicator columns to compare.
pub fn resolve_sets<T: TableReader + ?Sized>(
    table: &T,
    opts: &ResolveOptions,
) -> Result<SetCollection, VennError> {
    if table.row_count() == 0 {
        return Err(VennError::EmptyTable(
            ErrorInfo::new("venn_core.empty_table", "table has no data rows")
                .with_context("columns", table.column_names().join(",")),
        ));
    }
    let names = match &opts.sets {
        Some(requested) => check_requested(table, requested)?,
        None => detect_indicators(table)?,
    };
    let columns = names
        .iter()
        .map(|name| {
            IndicatorColumn::from_literals(
                name.clone(),
                (0..table.row_count()).map(|row| table.cell_value(row, name).unwrap_or_default()),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    let collection = SetCollection::new(columns)?;
    info!(
        sets = %collection.names().join(","),
        rows = collection.row_count(),
        "resolved indicator columns"
    );
    Ok(collection)
}

fn detect_indicators<T: TableReader + ?Sized>(table: &T) -> Result<Vec<String>, VennError> {
    let reports = classify_columns(table);
    for report in &reports {
        debug!(column = %report.name, indicator = report.is_indicator(), "classified column");
    }
    let candidates: Vec<String> = reports
        .into_iter()
        .filter(ColumnReport::is_indicator)
        .map(|report| report.name)
        .collect();
    if candidates.len() > MAX_SETS {
        return Err(VennError::AmbiguousColumns(
            ErrorInfo::new(
                "venn_core.ambiguous_columns",
                "more than 3 columns qualify as indicators",
            )
            .with_context("observed", candidates.len().to_string())
            .with_context("candidates", candidates.join(","))
            .with_hint("name the 2 or 3 sets to compare explicitly"),
        ));
    }
    if candidates.len() < MIN_SETS {
        return Err(VennError::UnsupportedCardinality(
            ErrorInfo::new(
                "venn_core.unsupported_cardinality",
                "at least 2 columns must contain only 0/1 values",
            )
            .with_context("observed", candidates.len().to_string())
            .with_context("candidates", candidates.join(","))
            .with_context("columns", table.column_names().join(",")),
        ));
    }
    Ok(candidates)
}

fn check_requested<T: TableReader + ?Sized>(
    table: &T,
    requested: &[String],
) -> Result<Vec<String>, VennError> {
    if !(MIN_SETS..=MAX_SETS).contains(&requested.len()) {
        return Err(VennError::UnsupportedCardinality(
            ErrorInfo::new(
                "venn_core.unsupported_cardinality",
                "only 2-way and 3-way diagrams are supported",
            )
            .with_context("observed", requested.len().to_string())
            .with_context("requested", requested.join(",")),
        ));
    }
    let mut seen = BTreeSet::new();
    for name in requested {
        if !seen.insert(name.as_str()) {
            return Err(VennError::AmbiguousColumns(
                ErrorInfo::new("venn_core.duplicate_selection", "set requested twice")
                    .with_context("column", name.clone()),
            ));
        }
        if !table.column_names().iter().any(|column| column == name) {
            return Err(VennError::Table(
                ErrorInfo::new("venn_core.unknown_column", "requested set is not in the header")
                    .with_context("column", name.clone())
                    .with_context("columns", table.column_names().join(",")),
            ));
        }
    }
    Ok(requested.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            columns.iter().map(|name| name.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn identifier_columns_are_not_indicators() {
        let t = table(&["ID", "GATK", "Total"], &[&["chr1:1", "1", "2"]]);
        let reports = classify_columns(&t);
        assert!(!reports[0].is_indicator());
        assert!(reports[1].is_indicator());
        assert_eq!(
            reports[2].class,
            ColumnClass::Other {
                row: 0,
                literal: "2".into()
            }
        );
    }

    #[test]
    fn selects_indicators_in_header_order() {
        let t = table(
            &["ID", "GATK", "Total", "Bcftools"],
            &[&["v1", "1", "2", "1"], &["v2", "0", "1", "1"]],
        );
        let sets = resolve_sets(&t, &ResolveOptions::default()).unwrap();
        assert_eq!(sets.names(), vec!["GATK", "Bcftools"]);
        assert_eq!(sets.columns()[0].values, vec![true, false]);
    }

    #[test]
    fn explicit_selection_keeps_requested_order() {
        let t = table(
            &["A", "B", "C", "D"],
            &[&["1", "0", "1", "0"], &["0", "1", "1", "1"]],
        );
        let opts = ResolveOptions {
            sets: Some(vec!["D".into(), "A".into()]),
        };
        let sets = resolve_sets(&t, &opts).unwrap();
        assert_eq!(sets.names(), vec!["D", "A"]);
    }

    #[test]
    fn explicit_selection_rejects_unknown_and_duplicate_names() {
        let t = table(&["A", "B"], &[&["1", "0"]]);
        let unknown = ResolveOptions {
            sets: Some(vec!["A".into(), "Z".into()]),
        };
        assert_eq!(
            resolve_sets(&t, &unknown).unwrap_err().info().code,
            "venn_core.unknown_column"
        );
        let duplicate = ResolveOptions {
            sets: Some(vec!["A".into(), "A".into()]),
        };
        assert!(matches!(
            resolve_sets(&t, &duplicate),
            Err(VennError::AmbiguousColumns(_))
        ));
    }

    #[test]
    fn explicit_selection_of_non_indicator_is_malformed() {
        let t = table(&["ID", "A", "B"], &[&["v1", "1", "0"]]);
        let opts = ResolveOptions {
            sets: Some(vec!["ID".into(), "A".into()]),
        };
        let err = resolve_sets(&t, &opts).unwrap_err();
        assert!(matches!(err, VennError::MalformedIndicator(_)));
        assert_eq!(err.info().context["literal"], "v1");
    }

    #[test]
    fn empty_table_is_reported_before_classification() {
        let t = table(&["A", "B"], &[]);
        assert!(matches!(
            resolve_sets(&t, &ResolveOptions::default()),
            Err(VennError::EmptyTable(_))
        ));
    }
}
