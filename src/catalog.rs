//! The event catalog: organizer-published events and their ticket categories.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::ids;
use crate::models::{Event, EventDraft, TicketCategory, User};
use crate::store::KeyValueStore;

const EVENTS_KEY: &str = "ems_events";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("event needs at least one valid ticket category")]
    NoValidCategories,
}

/// Owns the event collection, newest first. Events are immutable once
/// created; there are no update or delete operations.
pub struct Catalog {
    events: RwLock<Vec<Event>>,
    store: Arc<dyn KeyValueStore>,
}

impl Catalog {
    /// Hydrates the catalog from the store. A missing or unreadable slot
    /// starts an empty catalog rather than failing startup.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let events = store
            .load(EVENTS_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(events) => Some(events),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unparseable events collection");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            events: RwLock::new(events),
            store,
        }
    }

    /// Creates an event owned by `organizer`. Invalid categories (blank
    /// name, zero capacity, negative price, or a name already kept for this
    /// event) are dropped without error; creation only fails if nothing
    /// valid remains.
    pub fn create_event(&self, organizer: &User, draft: EventDraft) -> Result<Event, CatalogError> {
        if draft.name.trim().is_empty() {
            return Err(CatalogError::MissingField("name"));
        }
        if draft.venue.trim().is_empty() {
            return Err(CatalogError::MissingField("venue"));
        }

        let mut categories: Vec<TicketCategory> = Vec::new();
        for cat in draft.categories {
            let name = cat.name.trim();
            if name.is_empty() || cat.capacity == 0 || cat.price.is_sign_negative() {
                continue;
            }
            if categories.iter().any(|kept| kept.name == name) {
                continue;
            }
            categories.push(TicketCategory {
                name: name.to_string(),
                price: cat.price,
                capacity: cat.capacity,
            });
        }
        if categories.is_empty() {
            return Err(CatalogError::NoValidCategories);
        }

        let event = Event {
            id: ids::event_id(),
            organizer_id: organizer.id.clone(),
            name: draft.name.trim().to_string(),
            date: draft.date,
            time: draft.time,
            venue: draft.venue.trim().to_string(),
            description: draft.description,
            categories,
            created_at: Utc::now(),
        };

        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        events.insert(0, event.clone());
        self.persist(&events);
        Ok(event)
    }

    /// All events, most recently created first.
    pub fn list_events(&self) -> Vec<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find_event(&self, id: Uuid) -> Option<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    pub fn category_of(&self, event_id: Uuid, name: &str) -> Option<TicketCategory> {
        self.find_event(event_id)
            .and_then(|e| e.category(name).cloned())
    }

    fn persist(&self, events: &[Event]) {
        match serde_json::to_string(events) {
            Ok(json) => self.store.save(EVENTS_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "could not serialize events collection"),
        }
    }
}
