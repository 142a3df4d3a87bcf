//! Shared models for the MIxNET bridge: addresses, topology, channels,
//! interface entries, configuration and the error taxonomy.

pub mod config;
pub mod error;
pub mod network;
