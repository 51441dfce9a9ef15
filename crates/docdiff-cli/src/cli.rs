use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docdiff", about = "Structural diffs for JSON documents", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./docdiff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two JSON documents (exit 0: identical, 1: changed, 2: error)
    Diff(DiffArgs),
    /// Apply a JSON Patch file to a document
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Output format: unified, jsonpatch or semantic
    #[arg(short, long)]
    pub format: Option<String>,
    /// Compare arrays regardless of element order
    #[arg(long)]
    pub ignore_order: bool,
    /// Skip every `metadata` key
    #[arg(long)]
    pub ignore_metadata: bool,
    /// Lines of context in unified output
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    /// Print added/modified/deleted counts after the patch
    #[arg(long)]
    pub summary: bool,
    /// Print nothing; only set the exit code
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub document: PathBuf,
    pub patch: PathBuf,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
