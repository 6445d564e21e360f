#![deny(missing_docs)]
#![doc = "Indicator column resolution and region counting for 2-way and 3-way set-overlap diagrams."]

pub mod errors;
pub mod region;
pub mod resolve;
pub mod serde;
pub mod sets;
pub mod summary;
pub mod table;

pub use errors::{ErrorInfo, VennError};
pub use region::{count_regions, count_row_range, Region, RegionCountMap, RegionCountReport};
pub use resolve::{classify_columns, resolve_sets, ColumnClass, ColumnReport, ResolveOptions};
pub use sets::{IndicatorColumn, SetCollection, MAX_SETS, MIN_SETS};
pub use summary::{summary_lines, SummaryLine};
pub use table::{parse_indicator, ReadOptions, Table, TableReader};
