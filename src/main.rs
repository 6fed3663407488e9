use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use boxoffice::booking::BookingEngine;
use boxoffice::catalog::Catalog;
use boxoffice::config::Config;
use boxoffice::handlers::AppState;
use boxoffice::ledger::TicketLedger;
use boxoffice::models::{CategoryDraft, EventDraft, Role, User};
use boxoffice::routes::create_routes;
use boxoffice::session::Sessions;
use boxoffice::store::{JsonFileStore, KeyValueStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.data_dir));

    let catalog = Arc::new(Catalog::open(store.clone()));
    let ledger = Arc::new(TicketLedger::open(store.clone()));
    let sessions = Arc::new(Sessions::open(store));
    let booking = Arc::new(BookingEngine::new(catalog.clone(), ledger.clone()));

    seed_sample_event(&catalog);

    let app = create_routes(AppState {
        catalog,
        ledger,
        booking,
        sessions,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Box office running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}

/// Publishes one sample event on first run so the demo has something to
/// browse before any organizer logs in.
fn seed_sample_event(catalog: &Catalog) {
    if !catalog.list_events().is_empty() {
        return;
    }
    let organizer = User {
        id: "org_alice".to_string(),
        role: Role::Organizer,
        name: "Alice Organizer".to_string(),
        email: Some("alice@ems.local".to_string()),
    };
    let draft = EventDraft {
        name: "Tech Conference 2025".to_string(),
        date: Utc::now().date_naive(),
        time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid seed time"),
        venue: "Grand Hall A".to_string(),
        description: Some("A full-day event featuring talks and workshops.".to_string()),
        categories: vec![
            CategoryDraft {
                name: "Premium".to_string(),
                price: Decimal::from(199),
                capacity: 12,
            },
            CategoryDraft {
                name: "Standard".to_string(),
                price: Decimal::from(99),
                capacity: 24,
            },
            CategoryDraft {
                name: "Economy".to_string(),
                price: Decimal::from(49),
                capacity: 30,
            },
        ],
    };
    match catalog.create_event(&organizer, draft) {
        Ok(event) => tracing::info!(event_id = %event.id, "Seeded sample event"),
        Err(e) => tracing::warn!(error = %e, "Could not seed sample event"),
    }
}
