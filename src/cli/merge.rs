use crate::cli::Cli;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::merge;
use crate::output::{format_report, OutputFormat};
use crate::source::InputSource;
use tracing::debug;

/// Run the merge command
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let input = InputSource::from_options(cli.zip, cli.rtl)?;
    debug!(?input, top = %config.top.file, out = %config.output.path.display(), "Starting merge");

    let report = merge::run(&input, &config)?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    print!("{}", format_report(&report, format));
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

/// Config file values with command-line overrides applied
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    apply_overrides(cli, &mut config);
    Ok(config)
}

/// Apply command-line flags on top of `config`
pub fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(top_file) = &cli.top_file {
        config.top.file = top_file.clone();
        // A new top file implies its own module unless one is given
        if cli.top_module.is_none() {
            config.top.module = None;
        }
    }
    if let Some(top_module) = &cli.top_module {
        config.top.module = Some(top_module.clone());
    }
    if let Some(out) = &cli.out {
        config.output.path = out.clone();
    }
    if cli.strict {
        config.order.strict_duplicates = true;
    }
}

/// The single stderr line printed for a failed run
pub fn error_line(err: &Error) -> String {
    let text = err.to_string();
    let parts: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    format!("[svmerge] ERROR: {}", parts.join(" "))
}

/// Process exit status for a finished run
pub fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
