//! # Outbound Ports (Driven Actors)
//!
//! Contracts for the services the bridge calls into.
//!
//! ## Rules
//! 1. All items here are `traits` (plus the shared-handle aliases).
//! 2. Concrete implementations live in `adapters/outbound`.
//! 3. Directories take `&self`: one instance is shared by every component
//!    of a simulation run through an injected `Rc`.
pub mod address_directory;
pub mod interface_directory;
pub mod outbox;
