//! Aggregation layer over an upstream baseball Stats API: two HTTP GET
//! endpoints republishing the team list and a flattened, display-ready
//! schedule, plus a persisted team-selection store for clients.

pub mod config;
pub mod directory;
pub mod error;
pub mod handler;
pub mod model;
pub mod schedule;
pub mod selection;
pub mod statsapi;
