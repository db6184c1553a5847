use clap::{ArgGroup, Parser};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
Merge a SystemVerilog RTL tree into one dependency-ordered source file.

ORDER:
    1. packages   root package first, then by path
    2. headers    root header first, shared typedef/interface headers next
    3. modules    every module reachable from the top file, dependencies first

All `include directives are stripped since files are inlined by order.
Testbench files are never merged.

LOGGING:
    SVMERGE_LOG=debug svmerge --rtl ./rtl     Verbose diagnostics on stderr
"#;

/// Merge a SystemVerilog RTL tree into a single ordered file
#[derive(Parser, Debug)]
#[command(name = "svmerge")]
#[command(author, version)]
#[command(about = "Merge a SystemVerilog RTL tree into a single ordered file")]
#[command(long_about = LONG_ABOUT)]
#[command(group(ArgGroup::new("input").required(true).args(["zip", "rtl"])))]
#[command(after_help = "EXAMPLES:
    svmerge --zip HELIX_RTL.zip --out merged_SITE_0.sv
    svmerge --rtl ./HELIX_RTL/rtl
    svmerge --rtl ./rtl --top-file core/CORE.sv --top-module CORE
    svmerge --rtl ./rtl --json")]
pub struct Cli {
    /// Zip archive containing the rtl/ tree
    #[arg(long, value_name = "ARCHIVE")]
    pub zip: Option<PathBuf>,

    /// Unpacked rtl/ directory
    #[arg(long, value_name = "DIR")]
    pub rtl: Option<PathBuf>,

    /// Top file path relative to the rtl root [default: site/SITE_0.sv]
    #[arg(long, value_name = "PATH")]
    pub top_file: Option<String>,

    /// Top module name [default: stem of the top file]
    #[arg(long, value_name = "NAME")]
    pub top_module: Option<String>,

    /// Output merged .sv file [default: merged_SITE_0.sv]
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail when two files declare the same module
    #[arg(long)]
    pub strict: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}
