//! Command implementations for the Banter CLI.

use std::fs;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::transcript::{TranscriptWriter, read_transcript};
use crate::corpus::Corpus;
use crate::engine::{ChatEngine, EngineConfig};
use crate::error::{BanterError, Result};
use crate::matching::MatcherConfig;

/// Execute a CLI command.
pub fn execute_command(args: BanterArgs) -> Result<()> {
    match &args.command {
        Command::Chat(chat_args) => run_chat(chat_args.clone(), &args),
        Command::Validate(validate_args) => validate_corpus(validate_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::History(history_args) => show_history(history_args.clone(), &args),
    }
}

/// Run the interactive chat session.
fn run_chat(args: ChatArgs, cli_args: &BanterArgs) -> Result<()> {
    if let Some(cutoff) = args.score_cutoff {
        if !(0.0..=100.0).contains(&cutoff) {
            return Err(BanterError::invalid_operation(format!(
                "score cutoff must be between 0 and 100, got {cutoff}"
            )));
        }
    }

    let (engine, training_ms) = train_engine(&args)?;
    if cli_args.verbosity() > 0 {
        println!(
            "Loaded {} intents ({} phrases) in {training_ms} ms. Type 'exit' to leave.",
            engine.corpus().len(),
            engine.corpus().entries().len()
        );
    }

    let transcript = args.transcript.as_ref().map(TranscriptWriter::new);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "you> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let response = engine.respond(input);
        println!("banter> {response}");

        if let Some(writer) = &transcript {
            writer.append(input, &response)?;
        }
    }

    Ok(())
}

/// Validate a corpus definition file.
fn validate_corpus(args: ValidateArgs, cli_args: &BanterArgs) -> Result<()> {
    let corpus = Corpus::load_from_path(&args.intents)?;

    let result = ValidationResult {
        intents: corpus.len(),
        phrases: corpus.entries().len(),
        responses: corpus.intents().iter().map(|i| i.responses.len()).sum(),
    };
    output_result(
        &format!("Corpus is valid: {}", args.intents.display()),
        &result,
        cli_args,
    )
}

/// Train on a corpus and report engine statistics.
fn show_stats(args: StatsArgs, cli_args: &BanterArgs) -> Result<()> {
    let start_time = Instant::now();
    let corpus = Corpus::load_from_path(&args.intents)?;
    let engine = ChatEngine::train(corpus)?;
    let training_ms = start_time.elapsed().as_millis() as u64;

    let stats = EngineStats {
        intents: engine.corpus().len(),
        phrases: engine.corpus().entries().len(),
        vocabulary_size: engine.vocabulary_size(),
        labels: engine.labels().to_vec(),
        training_ms,
    };
    output_result("Engine trained successfully", &stats, cli_args)
}

/// Show or clear a conversation transcript.
fn show_history(args: HistoryArgs, cli_args: &BanterArgs) -> Result<()> {
    if args.clear {
        if args.transcript.exists() {
            fs::remove_file(&args.transcript)?;
            if cli_args.verbosity() > 0 {
                println!("Transcript deleted: {}", args.transcript.display());
            }
        } else if cli_args.verbosity() > 0 {
            println!("No transcript at {}", args.transcript.display());
        }
        return Ok(());
    }

    let records = read_transcript(&args.transcript)?;
    match cli_args.output_format {
        OutputFormat::Human => {
            for record in &records {
                println!("[{}]", record.timestamp.format("%Y-%m-%d %H:%M:%S"));
                println!("you>    {}", record.input);
                println!("banter> {}", record.response);
                println!();
            }
            if cli_args.verbosity() > 0 {
                println!("{} turns", records.len());
            }
        }
        OutputFormat::Json => {
            output_result("", &records, cli_args)?;
        }
    }
    Ok(())
}

fn train_engine(args: &ChatArgs) -> Result<(ChatEngine, u64)> {
    let start_time = Instant::now();
    let corpus = Corpus::load_from_path(&args.intents)?;

    let mut config = EngineConfig {
        response_seed: args.seed,
        ..Default::default()
    };
    if let Some(cutoff) = args.score_cutoff {
        config.matcher = MatcherConfig {
            score_cutoff: cutoff,
        };
    }

    let engine = ChatEngine::train_with_config(corpus, config)?;
    Ok((engine, start_time.elapsed().as_millis() as u64))
}
