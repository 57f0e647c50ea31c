//! Timeline aggregation and view-state derivation for the music rewind
//! timeline: a single-writer [`TimelineStore`], pure derivations over its
//! records, and the fetch collaborator it is fed from.

pub mod aggregator;
pub mod config;
pub mod controller;
pub mod copy;
pub mod error;
pub mod sequencer;
pub mod source;
pub mod store;
pub mod view_state;

pub use aggregator::{compute_stats, derive_years, filter_by_year, group_by_year, SummaryStats};
pub use config::{load_settings, ClientSettings};
pub use controller::{TimelineController, TimelineEvent};
pub use error::{FetchError, FetchErrorCategory};
pub use sequencer::{sequence, SequencedItem, DEFAULT_STAGGER_MS};
pub use source::{HttpTimelineSource, TimelineSource, UnconfiguredSource};
pub use store::{FetchTicket, Settlement, TimelineStore, TimelineView};
pub use view_state::{reduce, ViewEvent, ViewState, ViewStateKind};
