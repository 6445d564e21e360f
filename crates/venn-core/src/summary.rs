//! Fixed-order console summary of a [`RegionCountMap`].

use crate::region::RegionCountMap;

/// One labelled count in the console summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Text shown before the colon, e.g. `Unique to GATK`.
    pub label: String,
    /// Region count.
    pub count: u64,
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.count)
    }
}

/// Builds the summary: each set's unique count, then pairs (3-way only), then
/// the all-sets intersection.
pub fn summary_lines(map: &RegionCountMap) -> Vec<SummaryLine> {
    let names = map.names();
    let mut lines = Vec::with_capacity(map.len());
    for name in names {
        lines.push(SummaryLine {
            label: format!("Unique to {name}"),
            count: map.unique(name).unwrap_or(0),
        });
    }
    if names.len() == 3 {
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            lines.push(SummaryLine {
                label: format!("{} & {} only", names[a], names[b]),
                count: map.pair(&names[a], &names[b]).unwrap_or(0),
            });
        }
    }
    let common = if names.len() == 2 {
        "Common to both"
    } else {
        "Common to all three"
    };
    lines.push(SummaryLine {
        label: common.to_string(),
        count: map.all_sets(),
    });
    lines
}
