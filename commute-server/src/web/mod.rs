//! Web layer for the commute board.
//!
//! JSON endpoints for BART arrivals, tube arrivals and line status, city
//! forecasts and schedule reset. Everything else is served from the static
//! directory.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
