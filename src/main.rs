// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use muxtrace::process_design::{process_design_path, Options};

/// Finds the next controlling multiplexer for a named wire in a hierarchical
/// netlist design.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the design (.json or .json.gz).
    netlist: String,

    /// Name of the starting wire, without the leading identifier marker.
    wire: String,

    /// Substring filter for the module containing the starting wire.
    #[arg(long)]
    module: Option<String>,

    /// Log the traversal step by step.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();

    let options = Options {
        wire: args.wire,
        module_filter: args.module,
    };
    let input_path = std::path::Path::new(&args.netlist);
    let (selector, module) = process_design_path(input_path, &options)?;
    println!("Mux select: {}", selector);
    println!("Module: {}", module);
    Ok(())
}
