//! Seatplan Core - Seating models, adjacency, and the assignment solver
//!
//! This crate contains the domain logic and port definitions for the Seatplan system.

pub mod adjacency;
pub mod apply;
pub mod config;
pub mod constraints;
pub mod error;
pub mod layout;
pub mod models;
pub mod ports;
pub mod roster;
pub mod scoring;
pub mod solver;
pub mod spatial;

pub use error::{Result, SeatplanError};
