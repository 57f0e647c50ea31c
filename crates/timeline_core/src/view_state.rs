//! Render-state machine: `Loading`, `Error`, `Empty`, `Populated`.
//!
//! [`reduce`] is the only place transitions are decided. Settlement events are
//! honored only while `Loading`, and filter changes only while showing loaded
//! data, so the three settled states are never linked without a new fetch.

use serde::Serialize;
use shared::domain::MemoryRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Loading,
    Error(String),
    Empty,
    Populated(Vec<MemoryRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStateKind {
    Loading,
    Error,
    Empty,
    Populated,
}

impl ViewState {
    pub fn kind(&self) -> ViewStateKind {
        match self {
            Self::Loading => ViewStateKind::Loading,
            Self::Error(_) => ViewStateKind::Error,
            Self::Empty => ViewStateKind::Empty,
            Self::Populated(_) => ViewStateKind::Populated,
        }
    }

    /// True once a fetch has succeeded and its data may be shown.
    pub fn shows_data(&self) -> bool {
        matches!(self, Self::Empty | Self::Populated(_))
    }

    fn from_visible(visible: Vec<MemoryRecord>) -> Self {
        if visible.is_empty() {
            Self::Empty
        } else {
            Self::Populated(visible)
        }
    }
}

/// Inputs to the state machine. `visible` is the loaded list after the active
/// filter has been applied.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    FetchStarted,
    FetchFailed { message: String },
    FetchResolved { visible: Vec<MemoryRecord> },
    FilterChanged { visible: Vec<MemoryRecord> },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchStarted => "fetch_started",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::FetchResolved { .. } => "fetch_resolved",
            Self::FilterChanged { .. } => "filter_changed",
        }
    }
}

pub fn reduce(state: &ViewState, event: ViewEvent) -> ViewState {
    match (state, event) {
        (_, ViewEvent::FetchStarted) => ViewState::Loading,
        (ViewState::Loading, ViewEvent::FetchFailed { message }) => ViewState::Error(message),
        (ViewState::Loading, ViewEvent::FetchResolved { visible }) => ViewState::from_visible(visible),
        (ViewState::Empty | ViewState::Populated(_), ViewEvent::FilterChanged { visible }) => {
            ViewState::from_visible(visible)
        }
        (current, event) => {
            tracing::trace!(
                state = ?current.kind(),
                event = event.name(),
                "view event ignored in current state"
            );
            current.clone()
        }
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
