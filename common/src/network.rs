//! # Network Models
//!
//! * [`address`]: native and foreign addresses and the mapping between them.
//! * [`topology`]: the static connection graph and attachment discovery.
//! * [`channel`]: the six channels of a bridge.
//! * [`interface`]: upper-stack interface directory entries.

pub mod address;
pub mod channel;
pub mod interface;
pub mod topology;
