/// Interface MTU used when the attached interface declares none.
pub const DEFAULT_MTU: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// MTU for the directory entry when the interface has no declared MTU.
    pub default_mtu: u32,
    /// Directory entry name. Defaults to the sanitized interface component name.
    ///
    /// Does not affect addressing.
    pub interface_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mtu: DEFAULT_MTU,
            interface_name: None,
        }
    }
}
