use std::cell::RefCell;

use mixnet_common::network::address::ForeignAddress;
use mixnet_common::network::interface::{InterfaceEntry, InterfaceHandle};
use tracing::debug;

use crate::ports::outbound::interface_directory::InterfaceDirectory;

/// Interface directory of one simulated node. Handles are insertion indices
/// and stay valid for the directory's lifetime.
#[derive(Debug, Default)]
pub struct MemoryInterfaceDirectory {
    entries: RefCell<Vec<InterfaceEntry>>,
}

impl MemoryInterfaceDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InterfaceDirectory for MemoryInterfaceDirectory {
    fn register_entry(&self, entry: InterfaceEntry) -> InterfaceHandle {
        if let Some(handle) = self.find_by_hw_address(entry.hw_address) {
            debug!("interface directory: updating {handle} ({})", entry.name);
            self.entries.borrow_mut()[handle.0] = entry;
            return handle;
        }
        let mut entries = self.entries.borrow_mut();
        let handle = InterfaceHandle(entries.len());
        debug!("interface directory: adding {handle} ({})", entry.name);
        entries.push(entry);
        handle
    }

    fn entry(&self, handle: InterfaceHandle) -> Option<InterfaceEntry> {
        self.entries.borrow().get(handle.0).cloned()
    }

    fn find_by_hw_address(&self, hw_address: ForeignAddress) -> Option<InterfaceHandle> {
        self.entries
            .borrow()
            .iter()
            .position(|entry| entry.hw_address == hw_address)
            .map(InterfaceHandle)
    }

    fn find_by_name(&self, name: &str) -> Option<InterfaceHandle> {
        self.entries
            .borrow()
            .iter()
            .position(|entry| entry.name == name)
            .map(InterfaceHandle)
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
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
