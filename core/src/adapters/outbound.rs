pub mod memory_address_directory;
pub mod memory_interface_directory;
pub mod recording_outbox;
