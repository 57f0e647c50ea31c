//! Single-writer owner of the fetched records and the current render state.
//!
//! The store never awaits. A fetch is split into [`TimelineStore::begin_fetch`]
//! and [`TimelineStore::settle`]; the network work happens in between, outside
//! any transition. Each `begin_fetch` bumps the generation, and `settle` drops
//! results whose ticket is no longer current or that arrive after
//! [`TimelineStore::teardown`].

use serde::Serialize;
use shared::{
    domain::{FilterSelection, MemoryRecord, Year},
    protocol::TimelineResponse,
};
use tracing::{debug, warn};

use crate::{
    aggregator::{compute_stats, derive_years, filter_by_year, SummaryStats},
    error::FetchError,
    sequencer::{sequence, SequencedItem, DEFAULT_STAGGER_MS},
    view_state::{reduce, ViewEvent, ViewState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer fetch started after this ticket was issued.
    Superseded,
    /// The store was torn down before the result arrived.
    Detached,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub state: ViewState,
    pub filter: FilterSelection,
    pub years: Vec<Year>,
    pub stats: SummaryStats,
    pub items: Vec<SequencedItem>,
    /// Base used for `items`; a presentation that reorders them re-sequences
    /// with the same base.
    pub stagger_ms: u64,
}

#[derive(Debug)]
pub struct TimelineStore {
    records: Vec<MemoryRecord>,
    filter: FilterSelection,
    state: ViewState,
    generation: u64,
    in_flight: Option<u64>,
    alive: bool,
    stagger_ms: u64,
}

impl Default for TimelineStore {
    fn default() -> Self {
        Self::init(DEFAULT_STAGGER_MS)
    }
}

impl TimelineStore {
    pub fn init(stagger_ms: u64) -> Self {
        Self {
            records: Vec::new(),
            filter: FilterSelection::All,
            state: ViewState::Loading,
            generation: 0,
            in_flight: None,
            alive: true,
            stagger_ms,
        }
    }

    /// After [`TimelineStore::teardown`] the returned ticket is inert: the
    /// generation does not move and `settle` answers [`Settlement::Detached`].
    pub fn begin_fetch(&mut self) -> FetchTicket {
        if !self.alive {
            debug!(generation = self.generation, "ignoring fetch on torn down store");
            return FetchTicket {
                generation: self.generation,
            };
        }
        self.generation += 1;
        if let Some(stale) = self.in_flight.replace(self.generation) {
            debug!(stale, generation = self.generation, "timeline fetch superseded");
        }
        self.apply(ViewEvent::FetchStarted);
        FetchTicket {
            generation: self.generation,
        }
    }

    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<TimelineResponse, FetchError>,
    ) -> Settlement {
        if !self.alive {
            debug!(generation = ticket.generation, "dropping timeline result after teardown");
            return Settlement::Detached;
        }
        if self.in_flight != Some(ticket.generation) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "dropping superseded timeline result"
            );
            return Settlement::Superseded;
        }
        self.in_flight = None;

        match result {
            Ok(response) => {
                let (records, rejections) = response.into_records();
                for rejection in &rejections {
                    warn!(
                        position = rejection.position,
                        reason = %rejection.reason,
                        "dropping malformed timeline record"
                    );
                }
                self.records = records;
                let visible = filter_by_year(&self.records, self.filter);
                self.apply(ViewEvent::FetchResolved { visible });
            }
            Err(error) => {
                warn!(
                    generation = ticket.generation,
                    category = ?error.category(),
                    %error,
                    "timeline fetch failed"
                );
                self.apply(ViewEvent::FetchFailed {
                    message: error.user_message().to_string(),
                });
            }
        }
        Settlement::Applied
    }

    pub fn set_filter(&mut self, selection: FilterSelection) {
        if !self.alive {
            debug!(?selection, "ignoring filter change on torn down store");
            return;
        }
        self.filter = selection;
        let visible = filter_by_year(&self.records, selection);
        self.apply(ViewEvent::FilterChanged { visible });
    }

    /// Marks the store as disposed. Outstanding tickets become inert.
    pub fn teardown(&mut self) {
        self.alive = false;
        self.in_flight = None;
        debug!(generation = self.generation, "timeline store torn down");
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn filter(&self) -> FilterSelection {
        self.filter
    }

    /// Last successfully loaded records, retained across a failing refetch.
    pub fn records(&self) -> &[MemoryRecord] {
        &self.records
    }

    pub fn view(&self) -> TimelineView {
        let (years, stats) = if self.state.shows_data() {
            (derive_years(&self.records), compute_stats(&self.records))
        } else {
            (Vec::new(), SummaryStats::default())
        };
        let items = match &self.state {
            ViewState::Populated(visible) => sequence(visible, self.stagger_ms),
            _ => Vec::new(),
        };

        TimelineView {
            state: self.state.clone(),
            filter: self.filter,
            years,
            stats,
            items,
            stagger_ms: self.stagger_ms,
        }
    }

    fn apply(&mut self, event: ViewEvent) {
        let event_name = event.name();
        let next = reduce(&self.state, event);
        debug!(
            generation = self.generation,
            event = event_name,
            from = ?self.state.kind(),
            to = ?next.kind(),
            "timeline view transition"
        );
        self.state = next;
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
