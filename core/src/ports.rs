//! # Ports Layer (Boundaries)
//!
//! Traits isolating the bridge from the simulation substrate and from the
//! directory services of the upper stack.
//!
//! ## Types of Ports
//! * **[`inbound`]** (Driving): the lifecycle the host scheduler drives, see
//!   [`inbound::SimModule`].
//! * **[`outbound`]** (Driven): the services the bridge calls into: the
//!   address directory, the interface directory, and the outbox it emits on.

pub mod inbound;
pub mod outbound;
