//! # Adapters Layer (Infrastructure)
//!
//! Concrete implementations of the [`crate::ports`]. The in-memory
//! directories stand in for the per-run services of a simulation; the
//! recording outbox captures emissions for drivers and tests.

pub mod outbound;
