//! Append-only conversation transcript.
//!
//! The transcript is the CLI's concern, not the engine's: the chat command
//! calls the core with a string, gets a string back, and separately appends
//! one JSON record per turn here. The core never sees this format.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One user turn and the engine's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Raw user input, before normalization.
    pub input: String,
    /// The reply the engine produced.
    pub response: String,
    /// When the turn happened.
    pub timestamp: DateTime<Utc>,
}

/// Appends chat turns to a JSON-lines transcript file.
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    path: PathBuf,
}

impl TranscriptWriter {
    /// Create a writer for the given transcript path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        TranscriptWriter { path: path.into() }
    }

    /// Append one turn, timestamped now. Creates the file on first use.
    pub fn append(&self, input: &str, response: &str) -> Result<()> {
        let record = ChatRecord {
            input: input.to_string(),
            response: response.to_string(),
            timestamp: Utc::now(),
        };
        let line = serde_json::to_string(&record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Read every record from a transcript file, in order.
///
/// Blank lines are skipped; a malformed line is an error rather than a
/// silent drop.
pub fn read_transcript(path: &Path) -> Result<Vec<ChatRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_and_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transcript.jsonl");

        let writer = TranscriptWriter::new(&path);
        writer.append("hello", "Hi!").unwrap();
        writer.append("bye", "See you!").unwrap();

        let records = read_transcript(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input, "hello");
        assert_eq!(records[0].response, "Hi!");
        assert_eq!(records[1].input, "bye");
        assert!(records[0].timestamp <= records[1].timestamp);
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.jsonl");
        assert!(read_transcript(&path).is_err());
    }
}
