//! # Message Envelope
//!
//! Both stacks exchange the same envelope: opaque payload bytes, a numeric
//! kind tag and at most one attached control-info record. The bridge reads
//! and rewrites the control info and the kind, never the payload.

use std::fmt;

use crate::lower::NicControl;
use crate::upper::LinkControl;

/// Numeric message kind as assigned by the sending stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageKind(pub i16);

impl MessageKind {
    /// Plain data frame. The bridge normalizes every forwarded frame to this.
    pub const DATA: MessageKind = MessageKind(0);
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlInfo {
    /// Upper-stack link-layer control info.
    Link(LinkControl),
    /// Lower-stack interface control info.
    Nic(NicControl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub payload: Vec<u8>,
    pub control: Option<ControlInfo>,
}

impl Message {
    pub fn new(kind: MessageKind, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            payload: payload.into(),
            control: None,
        }
    }

    pub fn data(payload: impl Into<Vec<u8>>) -> Self {
        Self::new(MessageKind::DATA, payload)
    }

    pub fn with_control(mut self, control: ControlInfo) -> Self {
        self.control = Some(control);
        self
    }

    /// Detaches the control info, leaving the message bare.
    pub fn take_control(&mut self) -> Option<ControlInfo> {
        self.control.take()
    }

    /// Declared payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn link_control(&self) -> Option<&LinkControl> {
        match &self.control {
            Some(ControlInfo::Link(ctrl)) => Some(ctrl),
            _ => None,
        }
    }

    pub fn nic_control(&self) -> Option<&NicControl> {
        match &self.control {
            Some(ControlInfo::Nic(ctrl)) => Some(ctrl),
            _ => None,
        }
    }
}
