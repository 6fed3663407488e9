//! Inventory and booking engine.
//!
//! Seat occupancy is never stored as a mutable counter. Every check derives
//! the occupied-seat set by scanning the ledger, so the count cannot drift
//! from the tickets that actually exist. The scan is O(tickets for that
//! category), which stays cheap at the tens-to-hundreds of seats a category
//! holds.
//!
//! Derived occupancy is only safe when check-and-commit is serialized, so
//! `book_seat` runs under a lock scoped to the (event, category) pair:
//! at most one writer per seat, even with concurrent callers.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::ids;
use crate::ledger::TicketLedger;
use crate::models::{Ticket, User};

/// Recoverable, user-facing booking failures. Checked in this order; the
/// first failing check wins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("event or ticket category not found")]
    CategoryNotFound,

    #[error("seat {seat} is outside the valid range 1..={capacity}")]
    InvalidSeat { seat: u32, capacity: u32 },

    #[error("seat {0} is already booked")]
    SeatTaken(u32),
}

/// Snapshot of one category's seating state, derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub capacity: u32,
    pub price: Decimal,
    pub occupied_seats: BTreeSet<u32>,
}

pub struct BookingEngine {
    catalog: Arc<Catalog>,
    ledger: Arc<TicketLedger>,
    locks: Mutex<HashMap<(Uuid, String), Arc<Mutex<()>>>>,
}

impl BookingEngine {
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<TicketLedger>) -> Self {
        Self {
            catalog,
            ledger,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Current seating state for one (event, category). Pure read: two calls
    /// with no booking in between return identical results.
    pub fn occupancy(&self, event_id: Uuid, category: &str) -> Result<Occupancy, BookingError> {
        let cat = self
            .catalog
            .category_of(event_id, category)
            .ok_or(BookingError::CategoryNotFound)?;

        let occupied_seats = self
            .ledger
            .by_event(event_id)
            .into_iter()
            .filter(|t| t.category == category)
            .map(|t| t.seat_number)
            .collect();

        Ok(Occupancy {
            capacity: cat.capacity,
            price: cat.price,
            occupied_seats,
        })
    }

    /// Books one seat for `buyer`, capturing the category's current price on
    /// the issued ticket. The occupancy check and the ledger append happen
    /// as one indivisible unit relative to other attempts on the same
    /// (event, category).
    pub fn book_seat(
        &self,
        event_id: Uuid,
        category: &str,
        seat_number: u32,
        buyer: &User,
    ) -> Result<Ticket, BookingError> {
        let slot = self.lock_for(event_id, category);
        let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        let occupancy = self.occupancy(event_id, category)?;
        if seat_number < 1 || seat_number > occupancy.capacity {
            return Err(BookingError::InvalidSeat {
                seat: seat_number,
                capacity: occupancy.capacity,
            });
        }
        if occupancy.occupied_seats.contains(&seat_number) {
            return Err(BookingError::SeatTaken(seat_number));
        }

        let ticket = Ticket {
            id: ids::ticket_id(),
            event_id,
            category: category.to_string(),
            seat_number,
            price: occupancy.price,
            consumer_id: buyer.id.clone(),
            consumer_name: buyer.name.clone(),
            purchased_at: Utc::now(),
        };
        self.ledger.append(ticket.clone());

        tracing::info!(
            event_id = %event_id,
            category,
            seat_number,
            consumer_id = %buyer.id,
            "seat booked"
        );
        Ok(ticket)
    }

    fn lock_for(&self, event_id: Uuid, category: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry((event_id, category.to_string()))
            .or_default()
            .clone()
    }
}
