//! Command line argument parsing for the Banter CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Banter - an intent-matching chatbot engine
#[derive(Parser, Debug, Clone)]
#[command(name = "banter")]
#[command(about = "An intent-matching chatbot engine for Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BanterArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BanterArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive chat session
    Chat(ChatArgs),

    /// Validate a corpus definition file
    Validate(ValidateArgs),

    /// Train on a corpus and show engine statistics
    Stats(StatsArgs),

    /// Show or clear a conversation transcript
    History(HistoryArgs),
}

/// Arguments for the interactive chat session
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Path to the intent corpus definition file (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,

    /// Append each turn to this JSON-lines transcript file
    #[arg(short, long, value_name = "TRANSCRIPT_FILE")]
    pub transcript: Option<PathBuf>,

    /// Seed for response selection (reproducible sessions)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum fuzzy-match score (0-100) required to accept a match
    #[arg(long, value_name = "SCORE")]
    pub score_cutoff: Option<f64>,
}

/// Arguments for corpus validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the intent corpus definition file (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,
}

/// Arguments for engine statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the intent corpus definition file (JSON)
    #[arg(value_name = "INTENTS_FILE")]
    pub intents: PathBuf,
}

/// Arguments for transcript inspection
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Path to the transcript file
    #[arg(value_name = "TRANSCRIPT_FILE")]
    pub transcript: PathBuf,

    /// Delete the transcript instead of showing it
    #[arg(long)]
    pub clear: bool,
}
