//! Pure derivations over a loaded record list: year set, year filter and
//! dashboard statistics. Nothing here owns state.

use std::collections::BTreeSet;

use serde::Serialize;
use shared::domain::{FilterSelection, MemoryRecord, Year};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub distinct_years: usize,
    pub latest: Option<MemoryRecord>,
}

/// Distinct years, newest first. Input order does not matter.
pub fn derive_years(records: &[MemoryRecord]) -> Vec<Year> {
    records
        .iter()
        .map(|record| record.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Stable filter: matching records keep their relative input order.
pub fn filter_by_year(records: &[MemoryRecord], selection: FilterSelection) -> Vec<MemoryRecord> {
    records
        .iter()
        .filter(|record| selection.matches(record))
        .cloned()
        .collect()
}

pub fn compute_stats(records: &[MemoryRecord]) -> SummaryStats {
    SummaryStats {
        total: records.len(),
        distinct_years: derive_years(records).len(),
        latest: latest_record(records).cloned(),
    }
}

// First occurrence wins among records sharing the maximum year.
fn latest_record(records: &[MemoryRecord]) -> Option<&MemoryRecord> {
    records.iter().fold(None, |latest: Option<&MemoryRecord>, record| match latest {
        Some(current) if current.year >= record.year => Some(current),
        _ => Some(record),
    })
}

/// Records bucketed under their year, buckets in [`derive_years`] order and
/// records in input order within each bucket.
pub fn group_by_year(records: &[MemoryRecord]) -> Vec<(Year, Vec<MemoryRecord>)> {
    derive_years(records)
        .into_iter()
        .map(|year| (year, filter_by_year(records, FilterSelection::Year(year))))
        .collect()
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
