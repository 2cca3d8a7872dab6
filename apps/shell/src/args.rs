//! Command-line interface of the `modkit` host.

use clap::Parser;
use modkit::domain::side::Side;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "modkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sets up, configures, boots and runs the features of a mod")]
pub(crate) struct Cli {
    /// Host configuration file; `MODKIT__*` environment variables override its values
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Mod id, overriding the configuration
    #[arg(long)]
    pub(crate) id: Option<String>,

    /// Side to run; repeat for several (defaults to common and client)
    #[arg(short, long = "side", value_name = "SIDE")]
    pub(crate) sides: Vec<Side>,

    /// Directory holding the per-side options files
    #[arg(long, value_name = "DIR")]
    pub(crate) options_dir: Option<PathBuf>,

    /// Minimum log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub(crate) log_level: Option<String>,
}
