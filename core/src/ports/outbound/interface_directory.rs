use std::rc::Rc;

use mixnet_common::network::address::ForeignAddress;
use mixnet_common::network::interface::{InterfaceEntry, InterfaceHandle};

/// The upper stack's registry of network interfaces on one node.
pub trait InterfaceDirectory {
    /// Creates an entry, or updates the entry that already carries the same
    /// hardware address. Either way the returned handle identifies it.
    fn register_entry(&self, entry: InterfaceEntry) -> InterfaceHandle;

    fn entry(&self, handle: InterfaceHandle) -> Option<InterfaceEntry>;

    fn find_by_hw_address(&self, hw_address: ForeignAddress) -> Option<InterfaceHandle>;

    fn find_by_name(&self, name: &str) -> Option<InterfaceHandle>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type SharedInterfaceDirectory = Rc<dyn InterfaceDirectory>;
