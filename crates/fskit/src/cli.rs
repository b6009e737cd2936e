//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fskit")]
#[command(version, about = "Rotating logger and recursive directory tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a line to a log file, rotating it once oversized
    Log(LogArgs),

    /// List every entry below a directory, children first
    Walk {
        /// Directory to walk
        dir: PathBuf,
    },

    /// Remove a directory and everything below it
    Rmdir {
        /// Directory to remove
        dir: PathBuf,
    },

    /// Find files by name pattern and content
    Search(SearchArgs),
}

#[derive(Args)]
pub struct LogArgs {
    /// Message to append (a trailing newline is added if missing)
    pub message: String,

    /// Log file path
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Rotate once the file is larger than this many bytes
    #[arg(long)]
    pub max_size: Option<u64>,

    /// Number of rotated generations to keep
    #[arg(long)]
    pub rotation: Option<u32>,

    /// Octal permission bits applied after writing (e.g. 640)
    #[arg(long, value_parser = parse_mode)]
    pub file_mode: Option<u32>,

    /// Config file with a [logger] section (default: fskit.* in the current directory)
    #[arg(long, env = "FSKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Directory to search
    pub dir: PathBuf,

    /// File name pattern, repeatable
    #[arg(short = 'p', long = "pattern")]
    pub patterns: Vec<String>,

    /// Subdirectory pattern to descend into, repeatable
    #[arg(short = 'r', long = "recurse")]
    pub recurse: Vec<String>,

    /// Content filter; "/expr/flags" is a regular expression
    #[arg(long, allow_hyphen_values = true)]
    pub needle: Option<String>,

    /// Apply the directories-only glob flag to file patterns
    #[arg(long)]
    pub only_dir: bool,

    /// Match names case-insensitively
    #[arg(long)]
    pub no_case: bool,

    /// Let wildcards match a leading dot
    #[arg(long)]
    pub dot_match: bool,
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode '{}': {}", s, e))
}
