//! Indicator columns and the 2 or 3 set collection compared in a diagram.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, VennError};
use crate::table::parse_indicator;

/// Smallest number of sets a diagram can compare.
pub const MIN_SETS: usize = 2;
/// Largest number of sets a diagram can compare.
pub const MAX_SETS: usize = 3;

/// Named column of per-row membership flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorColumn {
    /// Set label, taken verbatim from the table header.
    pub name: String,
    /// One flag per row.
    pub values: Vec<bool>,
}

impl IndicatorColumn {
    /// Creates a column from already decoded flags.
    pub fn new(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Decodes raw literals, failing on the first one that is not boolean.
    pub fn from_literals<'a, I>(name: impl Into<String>, literals: I) -> Result<Self, VennError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let name = name.into();
        let mut values = Vec::new();
        for (row, literal) in literals.into_iter().enumerate() {
            match parse_indicator(literal) {
                Some(flag) => values.push(flag),
                None => {
                    return Err(VennError::MalformedIndicator(
                        ErrorInfo::new(
                            "venn_core.malformed_indicator",
                            "indicator cell is not a 0/1 literal",
                        )
                        .with_context("column", name)
                        .with_context("row", row.to_string())
                        .with_context("literal", literal.to_string())
                        .with_hint("encode membership as 0 or 1; missing values are not allowed"),
                    ))
                }
            }
        }
        Ok(Self { name, values })
    }
}

/// Ordered, immutable selection of 2 or 3 indicator columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCollection {
    columns: Vec<IndicatorColumn>,
}

impl SetCollection {
    /// Builds a collection, enforcing cardinality, unique names and equal lengths.
    pub fn new(columns: Vec<IndicatorColumn>) -> Result<Self, VennError> {
        let collection = Self { columns };
        collection.validate()?;
        Ok(collection)
    }

    /// Re-checks the collection invariants.
    ///
    /// Collections can be deserialized, so consumers call this before trusting one.
    pub fn validate(&self) -> Result<(), VennError> {
        let count = self.columns.len();
        if !(MIN_SETS..=MAX_SETS).contains(&count) {
            return Err(VennError::InvalidCardinality(
                ErrorInfo::new(
                    "venn_core.invalid_cardinality",
                    "set collection must hold 2 or 3 sets",
                )
                .with_context("observed", count.to_string())
                .with_context("sets", self.names().join(",")),
            ));
        }
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(VennError::InvalidCardinality(
                    ErrorInfo::new("venn_core.duplicate_set", "set names must be unique")
                        .with_context("set", column.name.clone()),
                ));
            }
        }
        let rows = self.columns[0].values.len();
        for column in &self.columns[1..] {
            if column.values.len() != rows {
                return Err(VennError::MalformedIndicator(
                    ErrorInfo::new(
                        "venn_core.column_length",
                        "indicator columns differ in length",
                    )
                    .with_context("column", column.name.clone())
                    .with_context("expected", rows.to_string())
                    .with_context("observed", column.values.len().to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Set names in collection order.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    /// Columns in collection order.
    pub fn columns(&self) -> &[IndicatorColumn] {
        &self.columns
    }

    /// Number of sets.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a validated collection.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of rows shared by every column.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.values.len())
    }
}
