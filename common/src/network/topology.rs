//! # Static Topology
//!
//! The connection graph of a simulated node as the host substrate built it:
//! components, their named gates, and directed links from an output gate to
//! an input gate.
//!
//! The bridge never owns the components it finds here. It only walks the
//! graph once during setup, see [`discover_attached`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::trace;

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Gate identifier, local to the owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateId(pub u32);

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateRef {
    pub component: ComponentId,
    pub gate: GateId,
}

impl fmt::Display for GateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.gate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    /// A protocol-adaptation bridge.
    Bridge,
    /// Forwards traffic without terminating it (compound-module boundaries,
    /// relays). Discovery walks through these.
    Passthrough,
    /// A lower-stack network interface. `mtu` is its declared property, if any.
    Interface { mtu: Option<u32> },
    /// Anything else, labelled for error reporting.
    Other(String),
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Bridge => write!(f, "bridge"),
            ComponentKind::Passthrough => write!(f, "passthrough"),
            ComponentKind::Interface { .. } => write!(f, "interface"),
            ComponentKind::Other(label) => write!(f, "{label}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    gates: BTreeMap<String, GateId>,
}

impl Component {
    pub fn gate(&self, name: &str) -> Option<GateId> {
        self.gates.get(name).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Topology {
    components: BTreeMap<ComponentId, Component>,
    links: BTreeMap<GateRef, GateRef>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a component without gates.
    pub fn add_component(
        &mut self,
        id: ComponentId,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> ComponentId {
        self.components.insert(
            id,
            Component {
                id,
                name: name.into(),
                kind,
                gates: BTreeMap::new(),
            },
        );
        id
    }

    /// Returns the named gate, allocating the next free id if it is new.
    pub fn add_gate(&mut self, component: ComponentId, name: &str) -> Result<GateRef, ConfigurationError> {
        let owner = self
            .components
            .get_mut(&component)
            .ok_or(ConfigurationError::UnknownComponent(component))?;
        let next = GateId(owner.gates.len() as u32);
        let gate = *owner.gates.entry(name.to_string()).or_insert(next);
        Ok(GateRef { component, gate })
    }

    /// Links an output gate to an input gate. An output gate has at most one peer.
    pub fn connect(&mut self, from: GateRef, to: GateRef) -> Result<(), ConfigurationError> {
        for end in [from, to] {
            if !self.components.contains_key(&end.component) {
                return Err(ConfigurationError::UnknownComponent(end.component));
            }
        }
        if let Some(existing) = self.links.get(&from) {
            return Err(ConfigurationError::AlreadyConnected {
                from,
                existing: *existing,
            });
        }
        self.links.insert(from, to);
        Ok(())
    }

    /// [`Topology::connect`] by gate names, creating the gates as needed.
    pub fn connect_named(
        &mut self,
        from: (ComponentId, &str),
        to: (ComponentId, &str),
    ) -> Result<(), ConfigurationError> {
        let from = self.add_gate(from.0, from.1)?;
        let to = self.add_gate(to.0, to.1)?;
        self.connect(from, to)
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn gate(&self, component: ComponentId, name: &str) -> Result<GateRef, ConfigurationError> {
        let owner = self
            .component(component)
            .ok_or(ConfigurationError::UnknownComponent(component))?;
        let gate = owner.gate(name).ok_or_else(|| ConfigurationError::MissingGate {
            component,
            gate: name.to_string(),
        })?;
        Ok(GateRef { component, gate })
    }

    /// The input gate an output gate is linked to.
    pub fn peer(&self, from: GateRef) -> Option<GateRef> {
        self.links.get(&from).copied()
    }

    fn successors(&self, component: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        self.links
            .iter()
            .filter(move |(from, _)| from.component == component)
            .map(|(_, to)| to.component)
    }
}

/// The lower-stack interface a bridge is attached to.
///
/// A handle, not the component: the substrate owns the component itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedInterface {
    pub id: ComponentId,
    pub name: String,
    pub mtu: Option<u32>,
}

/// Walks the connection graph outward from `start` until it reaches a
/// component that is neither a bridge nor a passthrough.
///
/// Passthroughs are crossed through their single onward link, ignoring the
/// link that leads straight back to where the walk came from. More than one
/// onward component is ambiguous; reaching an already-visited component is
/// a cycle.
pub fn discover_attached(
    topology: &Topology,
    start: GateRef,
) -> Result<AttachedInterface, ConfigurationError> {
    let mut visited = BTreeSet::from([start.component]);
    let mut previous = start.component;
    let mut current = topology
        .peer(start)
        .ok_or(ConfigurationError::Unconnected(start))?
        .component;

    loop {
        let component = topology
            .component(current)
            .ok_or(ConfigurationError::UnknownComponent(current))?;
        trace!("discovery visiting {} ({})", component.id, component.kind);

        match &component.kind {
            ComponentKind::Interface { mtu } => {
                return Ok(AttachedInterface {
                    id: component.id,
                    name: component.name.clone(),
                    mtu: *mtu,
                });
            }
            ComponentKind::Bridge => return Err(ConfigurationError::AttachedToBridge(current)),
            ComponentKind::Other(label) => {
                return Err(ConfigurationError::NotAnInterface {
                    component: current,
                    kind: label.clone(),
                });
            }
            ComponentKind::Passthrough => {
                visited.insert(current);
                let candidates: BTreeSet<ComponentId> = topology
                    .successors(current)
                    .filter(|next| *next != previous)
                    .collect();
                let onward = match candidates.len() {
                    0 => return Err(ConfigurationError::DeadEnd(current)),
                    1 => *candidates.iter().next().ok_or(ConfigurationError::DeadEnd(current))?,
                    _ => {
                        return Err(ConfigurationError::Ambiguous {
                            at: current,
                            candidates: candidates.into_iter().collect(),
                        });
                    }
                };
                if visited.contains(&onward) {
                    return Err(ConfigurationError::Cyclic(onward));
                }
                previous = current;
                current = onward;
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
