pub mod event;
pub mod ticket;
pub mod user;

pub use event::{CategoryDraft, Event, EventDraft, TicketCategory};
pub use ticket::Ticket;
pub use user::{Role, User};
