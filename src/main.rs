//! svmerge CLI entry point

use clap::Parser;
use svmerge::cli::{merge, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Initialize logging; stdout is reserved for the summary
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("SVMERGE_LOG"))
        .init();

    let cli = Cli::parse();

    let result = merge::run(cli);
    if let Err(e) = &result {
        eprintln!("{}", merge::error_line(e));
    }
    std::process::exit(merge::exit_code(&result));
}
