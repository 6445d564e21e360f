//! Region counting over the power-set lattice of a [`SetCollection`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ErrorInfo, VennError};
use crate::sets::SetCollection;

/// Separator used when rendering a region as a label, e.g. `GATK&FreeBayes`.
pub const REGION_SEPARATOR: &str = "&";

/// Non-empty subset of the collection's sets, stored as a bitmask over set
/// positions. Bit `i` is set when the region lies inside set `i`.
///
/// Regions order singles first, then pairs, then the all-sets region; ties
/// break on the mask so `A`, `B`, `C`, `A&B`, `A&C`, `B&C`, `A&B&C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region(u8);

impl Region {
    /// Creates a region from a raw mask. Returns `None` for the empty mask.
    pub fn from_mask(mask: u8) -> Option<Self> {
        (mask != 0).then_some(Self(mask))
    }

    /// Raw bitmask.
    pub fn mask(self) -> u8 {
        self.0
    }

    /// Number of sets the region lies in.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Regions are never empty.
    pub fn is_empty(self) -> bool {
        false
    }

    /// Whether the region lies inside the set at `index`.
    pub fn contains(self, index: usize) -> bool {
        index < 8 && self.0 & (1 << index) != 0
    }

    /// Member names, in collection order.
    pub fn members<'a>(self, names: &'a [String]) -> Vec<&'a str> {
        names
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.contains(*idx))
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// Label such as `A&C`.
    pub fn label(self, names: &[String]) -> String {
        self.members(names).join(REGION_SEPARATOR)
    }

    /// Classic bit-string key (`10`, `011`, ...) with one digit per set.
    pub fn bit_string(self, set_count: usize) -> String {
        (0..set_count)
            .map(|idx| if self.contains(idx) { '1' } else { '0' })
            .collect()
    }

    /// Every non-empty region for `set_count` sets, in canonical order.
    pub fn all(set_count: usize) -> Vec<Region> {
        let mut regions: Vec<Region> = (1..(1u16 << set_count))
            .filter_map(|mask| Region::from_mask(mask as u8))
            .collect();
        regions.sort();
        regions
    }
}

impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Exhaustive region to count mapping for one set collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCountMap {
    names: Vec<String>,
    counts: BTreeMap<Region, u64>,
    empty_rows: u64,
}

impl RegionCountMap {
    /// Set names in collection order, for labelling.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of sets compared.
    pub fn set_count(&self) -> usize {
        self.names.len()
    }

    /// Number of regions, always `2^N - 1`.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Never true for a map produced by [`count_regions`].
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for a region given as a raw [`Region`].
    pub fn count(&self, region: Region) -> u64 {
        self.counts.get(&region).copied().unwrap_or(0)
    }

    /// Resolves member names to a region. Order of `members` is irrelevant.
    pub fn region_of(&self, members: &[&str]) -> Option<Region> {
        let mut mask = 0u8;
        for member in members {
            let idx = self.names.iter().position(|name| name == member)?;
            mask |= 1 << idx;
        }
        Region::from_mask(mask)
    }

    /// Count of the region made of exactly `members`.
    pub fn get(&self, members: &[&str]) -> Option<u64> {
        self.region_of(members).map(|region| self.count(region))
    }

    /// Rows present only in `name`.
    pub fn unique(&self, name: &str) -> Option<u64> {
        self.get(&[name])
    }

    /// Rows present in exactly `a` and `b`.
    pub fn pair(&self, a: &str, b: &str) -> Option<u64> {
        if a == b {
            return None;
        }
        self.get(&[a, b])
    }

    /// Rows present in every set.
    pub fn all_sets(&self) -> u64 {
        let full = ((1u16 << self.names.len()) - 1) as u8;
        Region::from_mask(full).map_or(0, |region| self.count(region))
    }

    /// Total rows in the circle for `name`, across all regions containing it.
    pub fn set_total(&self, name: &str) -> Option<u64> {
        let idx = self.names.iter().position(|candidate| candidate == name)?;
        Some(
            self.counts
                .iter()
                .filter(|(region, _)| region.contains(idx))
                .map(|(_, count)| *count)
                .sum(),
        )
    }

    /// Rows with at least one indicator set; equals the sum over all regions.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Rows with no indicator set. Not part of any region.
    pub fn empty_rows(&self) -> u64 {
        self.empty_rows
    }

    /// Regions and counts in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Region, u64)> + '_ {
        self.counts.iter().map(|(region, count)| (*region, *count))
    }

    /// Counts keyed by `&`-joined labels.
    pub fn labelled(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(region, count)| (region.label(&self.names), count))
            .collect()
    }

    /// Counts keyed by member-name sets, independent of column order.
    pub fn named_counts(&self) -> BTreeMap<BTreeSet<String>, u64> {
        self.iter()
            .map(|(region, count)| {
                let members = region
                    .members(&self.names)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (members, count)
            })
            .collect()
    }

    /// Counts keyed by bit strings (`10`, `01`, `11` or `100` ... `111`).
    pub fn subsets_bits(&self) -> BTreeMap<String, u64> {
        let n = self.names.len();
        self.iter()
            .map(|(region, count)| (region.bit_string(n), count))
            .collect()
    }

    /// Combines the counts of two maps built over disjoint row ranges of the
    /// same collection.
    pub fn merge(mut self, other: &RegionCountMap) -> Result<Self, VennError> {
        if self.names != other.names {
            return Err(VennError::InvalidCardinality(
                ErrorInfo::new(
                    "venn_core.merge_mismatch",
                    "cannot merge counts over different sets",
                )
                .with_context("left", self.names.join(","))
                .with_context("right", other.names.join(",")),
            ));
        }
        for (region, count) in other.iter() {
            *self.counts.entry(region).or_insert(0) += count;
        }
        self.empty_rows += other.empty_rows;
        Ok(self)
    }
}

/// Serialized form of a [`RegionCountMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCountReport {
    /// Set names in collection order.
    pub sets: Vec<String>,
    /// Counts keyed by `&`-joined region labels.
    pub regions: BTreeMap<String, u64>,
    /// Rows with at least one indicator set.
    pub total: u64,
    /// Rows with no indicator set.
    pub empty_rows: u64,
}

impl From<&RegionCountMap> for RegionCountReport {
    fn from(map: &RegionCountMap) -> Self {
        Self {
            sets: map.names.clone(),
            regions: map.labelled(),
            total: map.total(),
            empty_rows: map.empty_rows,
        }
    }
}

/// Counts every region of the collection in a single pass over rows.
pub fn count_regions(sets: &SetCollection) -> Result<RegionCountMap, VennError> {
    count_row_range(sets, 0, sets.row_count())
}

/// Counts rows `start..end` only. Partial maps combine with
/// [`RegionCountMap::merge`].
pub fn count_row_range(
    sets: &SetCollection,
    start: usize,
    end: usize,
) -> Result<RegionCountMap, VennError> {
    sets.validate()?;
    let rows = sets.row_count();
    if start > end || end > rows {
        return Err(VennError::InvalidCardinality(
            ErrorInfo::new("venn_core.row_range", "row range outside the collection")
                .with_context("start", start.to_string())
                .with_context("end", end.to_string())
                .with_context("rows", rows.to_string()),
        ));
    }
    let columns = sets.columns();
    let mut counts = BTreeMap::new();
    let mut empty_rows = 0u64;
    for row in start..end {
        let mask = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.values[row])
            .fold(0u8, |mask, (idx, _)| mask | (1 << idx));
        match Region::from_mask(mask) {
            Some(region) => *counts.entry(region).or_insert(0u64) += 1,
            None => empty_rows += 1,
        }
    }
    for region in Region::all(columns.len()) {
        counts.entry(region).or_insert(0);
    }
    let map = RegionCountMap {
        names: sets.names(),
        counts,
        empty_rows,
    };
    debug!(
        sets = %map.names.join(","),
        regions = map.len(),
        total = map.total(),
        empty_rows,
        "counted regions"
    );
    Ok(map)
}
