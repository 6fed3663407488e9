use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::booking::BookingEngine;
use crate::catalog::Catalog;
use crate::export::build_ticket_payload;
use crate::ledger::TicketLedger;
use crate::models::{EventDraft, Role, User};
use crate::session::Sessions;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<TicketLedger>,
    pub booking: Arc<BookingEngine>,
    pub sessions: Arc<Sessions>,
}

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "boxoffice-api",
    };
    success(payload, "Health check successful")
}

pub async fn list_events(State(state): State<AppState>) -> Response {
    success(state.catalog.list_events(), "Events retrieved")
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> Result<Response, AppError> {
    let organizer = require_role(&state.sessions, Role::Organizer)?;
    let event = state.catalog.create_event(&organizer, draft)?;
    Ok(created(event, "Event created"))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state
        .catalog
        .find_event(event_id)
        .ok_or_else(|| AppError::NotFound(format!("Event '{event_id}' was not found")))?;
    Ok(success(event, "Event retrieved"))
}

pub async fn event_tickets(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    if state.catalog.find_event(event_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Event '{event_id}' was not found"
        )));
    }
    Ok(success(state.ledger.by_event(event_id), "Tickets retrieved"))
}

pub async fn category_occupancy(
    State(state): State<AppState>,
    Path((event_id, category)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let occupancy = state.booking.occupancy(event_id, &category)?;
    Ok(success(occupancy, "Occupancy retrieved"))
}

#[derive(Deserialize)]
pub struct BookSeatRequest {
    pub seat_number: u32,
}

pub async fn book_seat(
    State(state): State<AppState>,
    Path((event_id, category)): Path<(Uuid, String)>,
    Json(request): Json<BookSeatRequest>,
) -> Result<Response, AppError> {
    let buyer = require_role(&state.sessions, Role::Consumer)?;
    let ticket = state
        .booking
        .book_seat(event_id, &category, request.seat_number, &buyer)?;
    Ok(created(ticket, "Seat booked"))
}

pub async fn my_tickets(State(state): State<AppState>) -> Result<Response, AppError> {
    let consumer = require_role(&state.sessions, Role::Consumer)?;
    Ok(success(
        state.ledger.by_consumer(&consumer.id),
        "Tickets retrieved",
    ))
}

#[derive(Serialize)]
struct PayloadResponse {
    payload: String,
}

pub async fn ticket_payload(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let ticket = state
        .ledger
        .find(ticket_id)
        .ok_or_else(|| AppError::NotFound(format!("Ticket '{ticket_id}' was not found")))?;
    let event = state.catalog.find_event(ticket.event_id);

    // Rendering problems stay on this request; the ticket itself is
    // already committed and untouched.
    let payload = build_ticket_payload(&ticket, event.as_ref())
        .map_err(|e| AppError::ValidationError(format!("Could not encode ticket payload: {e}")))?;
    Ok(success(PayloadResponse { payload }, "Payload built"))
}

pub async fn current_session(State(state): State<AppState>) -> Response {
    success(state.sessions.current(), "Session retrieved")
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    let user = state.sessions.login(request.role, request.name);
    success(user, "Logged in")
}

pub async fn logout(State(state): State<AppState>) -> Response {
    state.sessions.logout();
    empty_success("Logged out")
}

fn require_role(sessions: &Sessions, role: Role) -> Result<User, AppError> {
    let user = sessions
        .current()
        .ok_or_else(|| AppError::AuthError("No active session".to_string()))?;
    if user.role != role {
        return Err(AppError::Forbidden(format!("Requires the {role} role")));
    }
    Ok(user)
}
