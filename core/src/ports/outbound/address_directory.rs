use std::rc::Rc;

use mixnet_common::error::DuplicateMappingError;
use mixnet_common::network::address::{ForeignAddress, NativeAddress};

/// Per-run translation table between native and foreign addresses.
pub trait AddressDirectory {
    /// Publishes a mapping.
    ///
    /// # Errors
    /// [`DuplicateMappingError`] if `native` or `foreign` is already mapped.
    /// The existing entry is left untouched.
    fn put(&self, native: NativeAddress, foreign: ForeignAddress) -> Result<(), DuplicateMappingError>;

    fn get(&self, native: NativeAddress) -> Option<ForeignAddress>;

    fn get_reverse(&self, foreign: ForeignAddress) -> Option<NativeAddress>;

    /// Withdraws a mapping, returning what was stored.
    fn remove(&self, native: NativeAddress) -> Option<ForeignAddress>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type SharedAddressDirectory = Rc<dyn AddressDirectory>;
