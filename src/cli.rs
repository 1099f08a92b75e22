use std::path::PathBuf;

use clap::Parser;

use crate::derivation::DEFAULT_DEPTH_LIMIT;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, one `A -> body | body` rule per line
    pub file: PathBuf,

    /// Longest word to test
    #[arg(value_name = "MAX_LENGTH")]
    pub max_length: usize,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Seed for the rule order of the search (default: random)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Derivation steps tried on one word before giving up
    #[arg(short, long, value_name = "STEPS", default_value_t = DEFAULT_DEPTH_LIMIT)]
    pub depth_limit: usize,

    /// Report every tested word on stderr
    #[arg(short, long)]
    pub verbose: bool
}
