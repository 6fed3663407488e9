use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers::{
    book_seat, category_occupancy, create_event, current_session, event_tickets, get_event,
    health_check, list_events, login, logout, my_tickets, ticket_payload, AppState,
};

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/events", get(list_events).post(create_event))
        .route("/events/:event_id", get(get_event))
        .route("/events/:event_id/tickets", get(event_tickets))
        .route(
            "/events/:event_id/categories/:category/occupancy",
            get(category_occupancy),
        )
        .route(
            "/events/:event_id/categories/:category/book",
            post(book_seat),
        )
        .route("/tickets", get(my_tickets))
        .route("/tickets/:ticket_id/payload", get(ticket_payload))
        .route("/session", get(current_session).delete(logout))
        .route("/session/login", post(login))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer());

    apply_security_headers(router)
}
