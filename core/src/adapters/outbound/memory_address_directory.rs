use std::cell::RefCell;
use std::collections::BTreeMap;

use mixnet_common::error::DuplicateMappingError;
use mixnet_common::network::address::{ForeignAddress, NativeAddress};
use tracing::trace;

use crate::ports::outbound::address_directory::AddressDirectory;

#[derive(Debug, Default)]
struct Tables {
    forward: BTreeMap<NativeAddress, ForeignAddress>,
    reverse: BTreeMap<ForeignAddress, NativeAddress>,
}

/// Address directory scoped to one simulation run.
///
/// Writes happen during single-threaded setup only, so a `RefCell` is all
/// the synchronization it needs.
#[derive(Debug, Default)]
pub struct MemoryAddressDirectory {
    tables: RefCell<Tables>,
}

impl MemoryAddressDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressDirectory for MemoryAddressDirectory {
    fn put(&self, native: NativeAddress, foreign: ForeignAddress) -> Result<(), DuplicateMappingError> {
        let mut tables = self.tables.borrow_mut();
        if let Some(existing) = tables.forward.get(&native) {
            return Err(DuplicateMappingError::Native {
                native,
                existing: *existing,
                attempted: foreign,
            });
        }
        if let Some(existing) = tables.reverse.get(&foreign) {
            return Err(DuplicateMappingError::Foreign {
                foreign,
                existing: *existing,
                attempted: native,
            });
        }
        tables.forward.insert(native, foreign);
        tables.reverse.insert(foreign, native);
        trace!("address directory: {native} -> {foreign}");
        Ok(())
    }

    fn get(&self, native: NativeAddress) -> Option<ForeignAddress> {
        self.tables.borrow().forward.get(&native).copied()
    }

    fn get_reverse(&self, foreign: ForeignAddress) -> Option<NativeAddress> {
        self.tables.borrow().reverse.get(&foreign).copied()
    }

    fn remove(&self, native: NativeAddress) -> Option<ForeignAddress> {
        let mut tables = self.tables.borrow_mut();
        let foreign = tables.forward.remove(&native)?;
        tables.reverse.remove(&foreign);
        Some(foreign)
    }

    fn len(&self) -> usize {
        self.tables.borrow().forward.len()
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
