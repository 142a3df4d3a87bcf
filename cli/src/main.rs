mod commands;
mod terminal;

use commands::{CommandLine, Commands, inspect, simulate};
use mixnet_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = Config {
        default_mtu: commands.default_mtu,
        interface_name: commands.interface_name.clone(),
    };

    let result = match &commands.command {
        Commands::Inspect { node } => {
            print::header("inspecting bridge");
            inspect::inspect(node, &cfg)
        }
        Commands::Simulate {
            node,
            messages,
            peers,
            seed,
        } => {
            print::header("simulating traffic");
            simulate::simulate(node, *messages, *peers, *seed, &cfg)
        }
    };
    print::end_of_program();
    result
}
