use std::rc::Rc;

use colored::*;
use mixnet_common::config::Config;
use mixnet_core::adapters::outbound::memory_address_directory::MemoryAddressDirectory;
use mixnet_core::host::run_setup;
use mixnet_core::ports::outbound::interface_directory::InterfaceDirectory;

use crate::commands::NodeArgs;
use crate::commands::node::{Node, build_node};
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub fn inspect(args: &NodeArgs, cfg: &Config) -> anyhow::Result<()> {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let Node { mut bridge, interfaces } = build_node(args, addresses, cfg)?;

    run_setup(&mut [&mut bridge])?;

    print::tree_head(0, "address mapping");
    let mut details: Vec<Detail> = Vec::new();
    if let Some(native) = bridge.native_address() {
        details.push(("Native".to_string(), native.to_string().color(colors::NATIVE_ADDR)));
    }
    if let Some(foreign) = bridge.foreign_address() {
        details.push(("Foreign".to_string(), foreign.to_string().color(colors::FOREIGN_ADDR)));
    }
    if let Some(attached) = bridge.attached() {
        details.push(("Interface".to_string(), attached.name.normal()));
    }
    print::as_tree_one_level(details);

    let Some(entry) = bridge.interface_handle().and_then(|handle| interfaces.entry(handle)) else {
        print::print(&"no interface entry registered".bright_black().to_string());
        return Ok(());
    };

    print::tree_head(1, "interface entry");
    let flags = entry.flags;
    let details: Vec<Detail> = vec![
        ("Name".to_string(), entry.name.normal()),
        ("Hw address".to_string(), entry.hw_address.to_string().color(colors::FOREIGN_ADDR)),
        ("Token".to_string(), format!("{:016x}", entry.interface_token).normal()),
        ("MTU".to_string(), entry.mtu.to_string().normal()),
        (
            "Flags".to_string(),
            format!(
                "up={} broadcast={} multicast={} p2p={}",
                flags.up, flags.broadcast, flags.multicast, flags.point_to_point
            )
            .color(colors::ACCENT),
        ),
    ];
    print::as_tree_one_level(details);
    Ok(())
}
