//! Command-line argument definitions for the lrviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the automaton kinds to reveal, how far
//! to reveal them, where the SVG output goes, configuration file selection,
//! and logging verbosity.

use clap::{Parser, ValueEnum};

use lrviz::automaton::AutomatonKind;

/// Which automata to reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Lr0,
    Slr,
    Both,
}

impl KindArg {
    pub fn kinds(self) -> &'static [AutomatonKind] {
        match self {
            KindArg::Lr0 => &[AutomatonKind::Lr0],
            KindArg::Slr => &[AutomatonKind::Slr],
            KindArg::Both => &[AutomatonKind::Lr0, AutomatonKind::Slr],
        }
    }
}

/// Command-line arguments for the lrviz automaton reveal tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input automaton snapshot
    #[arg(help = "Path to the input .lra file")]
    pub input: String,

    /// Path to the output SVG file
    ///
    /// With `--kind both` the kind is inserted before the extension,
    /// e.g. `out.lr0.svg` and `out.slr.svg`.
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Automaton kind to reveal
    #[arg(short, long, value_enum, default_value_t = KindArg::Lr0)]
    pub kind: KindArg,

    /// Number of transitions to reveal; all of them when omitted
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Print the parse table of each revealed kind
    #[arg(short, long)]
    pub table: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
