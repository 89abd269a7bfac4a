//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BanterArgs, OutputFormat};
use crate::error::Result;

/// Result structure for corpus validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    pub intents: usize,
    pub phrases: usize,
    pub responses: usize,
}

/// Result structure for engine statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineStats {
    pub intents: usize,
    pub phrases: usize,
    pub vocabulary_size: usize,
    pub labels: Vec<String>,
    pub training_ms: u64,
}

/// Print a command result in the requested format.
///
/// Human output prints the message followed by the value's pretty JSON at
/// verbose levels; JSON output prints only the machine-readable value.
pub fn output_result<T: Serialize>(message: &str, value: &T, args: &BanterArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
            }
            if args.verbosity() > 1 {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
