pub mod inspect;
pub mod node;
pub mod simulate;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mixnet")]
#[command(about = "Bridge a lower-stack network interface into an upper-stack node.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log detail (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// MTU registered when the interface declares none
    #[arg(long, default_value_t = mixnet_common::config::DEFAULT_MTU, global = true)]
    pub default_mtu: u32,

    /// Name for the interface directory entry
    #[arg(long, global = true)]
    pub interface_name: Option<String>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct NodeArgs {
    /// Component id of the interface, which becomes its native address
    #[arg(long, default_value_t = 7)]
    pub nic_id: u32,

    /// Passthrough components between the bridge and the interface
    #[arg(long, default_value_t = 0)]
    pub relays: u32,

    /// MTU the interface declares
    #[arg(long)]
    pub nic_mtu: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up one node and show what the bridge resolved and registered
    #[command(alias = "i")]
    Inspect {
        #[command(flatten)]
        node: NodeArgs,
    },
    /// Set up a node and push random traffic through its bridge
    #[command(alias = "s")]
    Simulate {
        #[command(flatten)]
        node: NodeArgs,

        /// Messages to deliver
        #[arg(long, default_value_t = 32)]
        messages: u32,

        /// Other bridged nodes sharing the address directory
        #[arg(long, default_value_t = 3)]
        peers: u32,

        /// Seed for the traffic generator
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
