//! Commute board server.
//!
//! Simulates BART departures from a schedule generated at startup, attaches
//! cached local weather and air quality to each destination, and proxies
//! live London Underground arrivals and line status.

pub mod board;
pub mod cache;
pub mod config;
pub mod domain;
pub mod external;
pub mod openmeteo;
pub mod registry;
pub mod schedule;
pub mod tfl;
pub mod web;
