pub mod booking;
pub mod catalog;
pub mod config;
pub mod export;
pub mod handlers;
pub mod ids;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;
pub mod utils;
