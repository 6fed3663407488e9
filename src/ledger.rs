//! Append-only ledger of issued tickets.
//!
//! The ledger performs no validation; deciding whether a ticket may exist is
//! the booking engine's job. Tickets are never updated or deleted.

use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::models::Ticket;
use crate::store::KeyValueStore;

const TICKETS_KEY: &str = "ems_tickets";

pub struct TicketLedger {
    tickets: RwLock<Vec<Ticket>>,
    store: Arc<dyn KeyValueStore>,
}

impl TicketLedger {
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let tickets = store
            .load(TICKETS_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(tickets) => Some(tickets),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unparseable tickets collection");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            tickets: RwLock::new(tickets),
            store,
        }
    }

    /// Records an issued ticket, newest first.
    pub fn append(&self, ticket: Ticket) {
        let mut tickets = self.tickets.write().unwrap_or_else(PoisonError::into_inner);
        tickets.insert(0, ticket);
        self.persist(&tickets);
    }

    pub fn by_event(&self, event_id: Uuid) -> Vec<Ticket> {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect()
    }

    pub fn by_consumer(&self, consumer_id: &str) -> Vec<Ticket> {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| t.consumer_id == consumer_id)
            .cloned()
            .collect()
    }

    pub fn find(&self, ticket_id: Uuid) -> Option<Ticket> {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.id == ticket_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, tickets: &[Ticket]) {
        match serde_json::to_string(tickets) {
            Ok(json) => self.store.save(TICKETS_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "could not serialize tickets collection"),
        }
    }
}
