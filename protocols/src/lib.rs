//! Control-metadata schemas of the two stacks the bridge sits between, and
//! the message envelope both of them use.
//!
//! * [`upper`]: link-layer control info of the upper stack.
//! * [`lower`]: interface control info and control notifications of the
//!   lower stack.
//! * [`message`]: payload, kind tag and attached control info.

pub mod lower;
pub mod message;
pub mod upper;
