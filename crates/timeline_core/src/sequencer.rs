//! Entrance-animation stagger offsets for a rendered list.

use serde::Serialize;
use shared::domain::{MemoryRecord, RecordKey};

pub const DEFAULT_STAGGER_MS: u64 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequencedItem {
    pub key: RecordKey,
    pub record: MemoryRecord,
    pub delay_ms: u64,
}

/// `delay_ms` is `index * base_delay_ms`, counted from the start of `items`.
/// Delays belong to the position in this list, not to the record.
pub fn sequence(items: &[MemoryRecord], base_delay_ms: u64) -> Vec<SequencedItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, record)| SequencedItem {
            key: record.key(),
            record: record.clone(),
            delay_ms: (index as u64).saturating_mul(base_delay_ms),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(years: &[i32]) -> Vec<MemoryRecord> {
        years
            .iter()
            .enumerate()
            .map(|(position, year)| MemoryRecord::new("t", "a", *year).at_position(position))
            .collect()
    }

    #[test]
    fn delays_grow_by_base_from_zero() {
        let sequenced = sequence(&records(&[2020, 2018, 2016, 2014]), 80);
        let delays: Vec<_> = sequenced.iter().map(|item| item.delay_ms).collect();
        assert_eq!(delays, vec![0, 80, 160, 240]);
    }

    #[test]
    fn reordered_input_restarts_at_zero() {
        let mut items = records(&[2020, 2018, 2016]);
        let first = sequence(&items, 60);
        items.reverse();
        let second = sequence(&items, 60);

        assert_eq!(second[0].delay_ms, 0);
        assert_eq!(second[0].key, first[2].key);
        assert_eq!(second[2].delay_ms, 120);
    }

    #[test]
    fn keys_fall_back_to_year_and_position() {
        let sequenced = sequence(&records(&[2020, 2018]), 80);
        assert_eq!(sequenced[1].key.to_string(), "2018-1");
    }

    #[test]
    fn empty_list_has_no_items() {
        assert!(sequence(&[], 80).is_empty());
    }
}
