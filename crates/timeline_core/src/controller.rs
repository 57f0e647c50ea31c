//! Async adapter around [`TimelineStore`] for presentation layers.
//!
//! The store lock is held only for a transition, never across the network
//! await, so a second `refetch` can start while the first is still pending and
//! the generation check decides which result lands.

use std::sync::Arc;

use shared::domain::FilterSelection;
use tokio::sync::{broadcast, Mutex};
use tracing::info;

use crate::{
    source::TimelineSource,
    store::{Settlement, TimelineStore, TimelineView},
};

#[derive(Debug, Clone)]
pub enum TimelineEvent {
    ViewChanged(TimelineView),
    Detached,
}

pub struct TimelineController {
    source: Arc<dyn TimelineSource>,
    store: Mutex<TimelineStore>,
    events: broadcast::Sender<TimelineEvent>,
}

impl TimelineController {
    pub fn new(source: Arc<dyn TimelineSource>, stagger_ms: u64) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            source,
            store: Mutex::new(TimelineStore::init(stagger_ms)),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimelineEvent> {
        self.events.subscribe()
    }

    /// Starts a new fetch cycle and waits for it. Returns how its result was
    /// treated; a superseded or detached result leaves the view untouched.
    pub async fn refetch(&self) -> Settlement {
        let ticket = {
            let mut store = self.store.lock().await;
            if !store.is_alive() {
                return Settlement::Detached;
            }
            let ticket = store.begin_fetch();
            self.publish(store.view());
            ticket
        };

        let result = self.source.fetch_timeline().await;

        let mut store = self.store.lock().await;
        let settlement = store.settle(ticket, result);
        if settlement == Settlement::Applied {
            let view = store.view();
            info!(
                generation = ticket.generation(),
                state = ?view.state.kind(),
                items = view.items.len(),
                "timeline refreshed"
            );
            self.publish(view);
        }
        settlement
    }

    pub async fn set_filter(&self, selection: FilterSelection) -> TimelineView {
        let mut store = self.store.lock().await;
        if store.is_alive() {
            store.set_filter(selection);
            self.publish(store.view());
        }
        store.view()
    }

    pub async fn view(&self) -> TimelineView {
        self.store.lock().await.view()
    }

    pub async fn generation(&self) -> u64 {
        self.store.lock().await.generation()
    }

    pub async fn teardown(&self) {
        self.store.lock().await.teardown();
        let _ = self.events.send(TimelineEvent::Detached);
    }

    fn publish(&self, view: TimelineView) {
        let _ = self.events.send(TimelineEvent::ViewChanged(view));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
