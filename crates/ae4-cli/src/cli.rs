//! CLI argument definitions for the `ae4` tool.

use std::path::PathBuf;

use ae4_codec::FormatKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ae4",
    version,
    about = "Export ActionEditor4 files to JSON and rebuild them",
    long_about = "Export ActionEditor4 binary files to JSON and rebuild them.\n\n\
                  Handles stages (.stg4_*), palettes (.cplt4), world maps and the\n\
                  .dat databases. The format is inferred from the file name unless\n\
                  --type is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a binary file and write it as JSON.
    Export(ExportArgs),

    /// Rebuild a binary file from exported JSON.
    Import(ImportArgs),

    /// Print the format inferred for each file name.
    Detect(DetectArgs),

    /// Collect and apply translations in exported JSON trees.
    #[command(subcommand)]
    Keys(KeysCommand),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Binary file to decode.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Format of the input (default: inferred from the file name).
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<FormatKind>,

    /// Output JSON path (default: stdout).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Write single-line JSON instead of pretty-printed.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Maximum nesting depth of event flows.
    #[arg(long = "max-flow-depth", value_name = "N")]
    pub max_flow_depth: Option<usize>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Exported JSON document.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Expected format of the document; rejected if the JSON says otherwise.
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<FormatKind>,

    /// Output binary path (default: rebuilt name next to the input).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Files to classify.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum KeysCommand {
    /// Gather untranslated Japanese strings into `_translate_keys.json`.
    Extract(KeysExtractArgs),

    /// Write translations from `_translate_keys.json` back into the JSON files.
    Apply(KeysDirArgs),

    /// Fill `_translate_keys.json` from earlier tables and list what is missing.
    Prefill(KeysDirArgs),

    /// Merge a finished `_todo.json` into the prefilled table.
    Merge(KeysDirArgs),
}

#[derive(Args)]
pub struct KeysExtractArgs {
    /// Directory holding exported JSON files.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Scan subdirectories too.
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,
}

#[derive(Args)]
pub struct KeysDirArgs {
    /// Directory holding exported JSON files and the translation tables.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
