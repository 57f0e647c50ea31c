use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar year a memory is attached to. Sole grouping and filter key.
pub type Year = i32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordKey {
    Id { id: String },
    Fallback { year: Year, position: usize },
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { id } => f.write_str(id),
            Self::Fallback { year, position } => write!(f, "{year}-{position}"),
        }
    }
}

/// One song memory as seen by the aggregation layer.
///
/// Records only exist once the payload boundary has validated them, so `year`
/// is always a real integer here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    pub year: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Index in the fetched list; feeds the fallback key.
    #[serde(skip)]
    pub position: usize,
}

impl MemoryRecord {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, year: Year) -> Self {
        Self {
            id: None,
            title: title.into(),
            artist: artist.into(),
            year,
            note: None,
            position: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn key(&self) -> RecordKey {
        match &self.id {
            Some(id) => RecordKey::Id { id: id.clone() },
            None => RecordKey::Fallback {
                year: self.year,
                position: self.position,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "year", rename_all = "snake_case")]
pub enum FilterSelection {
    #[default]
    All,
    Year(Year),
}

impl FilterSelection {
    pub fn from_year(year: Option<Year>) -> Self {
        year.map_or(Self::All, Self::Year)
    }

    pub fn matches(&self, record: &MemoryRecord) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => record.year == *year,
        }
    }

    pub fn year(&self) -> Option<Year> {
        match self {
            Self::All => None,
            Self::Year(year) => Some(*year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_prefers_explicit_id() {
        let record = MemoryRecord::new("Song", "Artist", 2020).with_id("evt_001");
        assert_eq!(
            record.key(),
            RecordKey::Id {
                id: "evt_001".into()
            }
        );
        assert_eq!(record.key().to_string(), "evt_001");
    }

    #[test]
    fn empty_id_falls_back_to_year_and_position() {
        let record = MemoryRecord::new("Song", "Artist", 2018)
            .with_id("")
            .at_position(3);
        assert_eq!(
            record.key(),
            RecordKey::Fallback {
                year: 2018,
                position: 3
            }
        );
        assert_eq!(record.key().to_string(), "2018-3");
    }

    #[test]
    fn filter_selection_matches_by_year_only() {
        let record = MemoryRecord::new("Song", "Artist", 2018);
        assert!(FilterSelection::All.matches(&record));
        assert!(FilterSelection::Year(2018).matches(&record));
        assert!(!FilterSelection::Year(2020).matches(&record));
        assert_eq!(FilterSelection::from_year(None), FilterSelection::All);
        assert_eq!(FilterSelection::from_year(Some(2020)).year(), Some(2020));
    }
}
