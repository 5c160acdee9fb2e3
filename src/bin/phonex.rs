//! CLI tool for phonex pattern matching.
//!
//! Compiles a pattern and scans transcriptions for matches, highlighting
//! the matched spans. Transcriptions come from the command line or from a
//! file with one transcription per line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use phonex::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phonex")]
#[command(about = "Pattern matching over phonetic transcriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find occurrences of a pattern in transcriptions
    Find {
        /// The phonex pattern
        #[arg(short, long)]
        pattern: String,

        /// Transcriptions to scan
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        transcripts: Vec<String>,

        /// File with one transcription per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Skip syllabification before matching
        #[arg(long)]
        no_syllabify: bool,

        /// Report capture groups for each match
        #[arg(short, long)]
        groups: bool,
    },

    /// Anchored test: does the pattern match each whole transcription?
    Check {
        /// The phonex pattern
        #[arg(short, long)]
        pattern: String,

        /// Transcriptions to test
        #[arg(required = true)]
        transcripts: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Find {
            pattern,
            transcripts,
            file,
            no_syllabify,
            groups,
        } => {
            let pattern = compile(&pattern)?;
            let inputs = match file {
                Some(path) => load_transcripts(&path)?,
                None => transcripts,
            };
            for input in &inputs {
                find_in(&pattern, input, !no_syllabify, groups)?;
            }
        }
        Commands::Check {
            pattern,
            transcripts,
        } => {
            let pattern = compile(&pattern)?;
            for input in &transcripts {
                let mut elements = parse_transcript(input)
                    .with_context(|| format!("Failed to parse transcription '{}'", input))?;
                SonoritySyllabifier::new()
                    .annotate(&mut elements)
                    .with_context(|| format!("Failed to syllabify '{}'", input))?;
                let ok = pattern.matcher(&elements).matches();
                let verdict = if ok { "match".green() } else { "no match".red() };
                println!("{}\t{}", input, verdict);
            }
        }
    }
    Ok(())
}

fn compile(pattern: &str) -> Result<PhonexPattern> {
    PhonexPattern::compile(pattern)
        .with_context(|| format!("Failed to compile pattern '{}'", pattern))
}

fn load_transcripts(path: &PathBuf) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open transcript file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut transcripts = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("Failed to read line {} from {}", line_num + 1, path.display())
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            transcripts.push(trimmed.to_string());
        }
    }

    if transcripts.is_empty() {
        anyhow::bail!("Transcript file is empty: {}", path.display());
    }

    Ok(transcripts)
}

fn find_in(pattern: &PhonexPattern, input: &str, syllabify: bool, groups: bool) -> Result<()> {
    let mut elements = parse_transcript(input)
        .with_context(|| format!("Failed to parse transcription '{}'", input))?;
    if syllabify {
        SonoritySyllabifier::new()
            .annotate(&mut elements)
            .with_context(|| format!("Failed to syllabify '{}'", input))?;
    }

    let mut matcher = pattern.matcher(&elements);
    let mut found = false;
    while matcher.find() {
        found = true;
        let (start, end) = (matcher.start().unwrap_or(0), matcher.end().unwrap_or(0));
        let before = transcript_text(&elements[..start]);
        let hit = transcript_text(&elements[start..end]);
        let after = transcript_text(&elements[end..]);
        println!(
            "{}\t[{}..{})\t{}{}{}",
            input,
            start,
            end,
            before.dimmed(),
            hit.green().bold(),
            after.dimmed()
        );
        if groups {
            for g in 1..=matcher.group_count() {
                if let Some(span) = matcher.group(g) {
                    let name = pattern
                        .group_name(g)
                        .map(|n| format!("{} ({})", g, n))
                        .unwrap_or_else(|| g.to_string());
                    println!("  group {}: {}", name, transcript_text(span).cyan());
                }
            }
        }
    }
    if !found {
        println!("{}\t{}", input, "no match".red());
    }
    Ok(())
}
