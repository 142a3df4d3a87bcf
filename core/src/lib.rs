//! # MIxNET Bridge Core
//!
//! Lets an upper-stack network layer use a lower-stack network interface by
//! translating addresses and control info in both directions.
//!
//! ## Layout
//! * **[`bridge`]**: the bridge component: address resolution, interface
//!   registration, and the upstream and downstream routers.
//! * **[`ports`]**: traits for the host lifecycle and for the services the
//!   bridge calls into.
//! * **[`adapters`]**: in-memory directories and a recording outbox.
//! * **[`host`]**: a setup driver running the stages of a node's modules.

pub mod adapters;
pub mod bridge;
pub mod host;
pub mod ports;
