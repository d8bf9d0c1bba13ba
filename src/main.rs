//! US Map Maker - choropleth maps of U.S. states from the command line
//!
//! Create a map file, edit titles, legend labels and region values, then
//! render it to SVG or PNG.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use us_map_maker::cli::{
    CliResult, ConfigArgs, CycleArgs, ExitCode, NewArgs, RenderArgs, SchemesArgs, SetArgs,
};
use us_map_maker::constants::APP_BINARY_NAME;

/// US Map Maker - choropleth maps of U.S. states
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new map file
    New(NewArgs),
    /// Render a map file to SVG, PNG or CSV
    Render(RenderArgs),
    /// Edit fields of a map file
    Set(SetArgs),
    /// Advance a region's value as if clicked
    Cycle(CycleArgs),
    /// List available color schemes
    Schemes(SchemesArgs),
    /// Manage application configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::New(args) => args.execute(),
            Self::Render(args) => args.execute(),
            Self::Set(args) => args.execute(),
            Self::Cycle(args) => args.execute(),
            Self::Schemes(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match cli.command.execute() {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code
        }
    };

    std::process::exit(code.into());
}
