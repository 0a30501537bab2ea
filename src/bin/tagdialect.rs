//! Creates the list of UPDATE statements that label words in the lexicon
//! database by Serbian dialect. Input lines are either
//! `label wordform lemma` or `wordform lemma`; a label carries over to the
//! pairs below it until a blank line or a new label appears.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use srlex::corpus::{open_input, RunStats};
use srlex::dialect::{DialectScanner, ScanOutcome};
use srlex::{LexError, Result};

#[derive(Parser)]
#[command(name = "tagdialect")]
#[command(about = "Creates SQL UPDATE statements labeling words by Serbian dialect")]
struct Args {
    /// Input file of label/wordform/lemma lines
    #[arg(short, long)]
    input_file: PathBuf,

    /// Output file for the UPDATE statements
    #[arg(short, long, default_value = "out.txt")]
    output_file: PathBuf,

    /// Stop after this many input lines
    #[arg(short = 'n', long)]
    first_n_lines: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let reader = open_input(&args.input_file)?;
    let output = File::create(&args.output_file).map_err(|source| LexError::OutputOpen {
        path: args.output_file.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(output);

    let mut scanner = DialectScanner::new();
    let mut stats = RunStats::default();
    info!(
        "started processing input file '{}' ...",
        args.input_file.display()
    );

    for line in reader.lines() {
        let line = line?;
        stats.total += 1;
        match scanner.scan(&line) {
            ScanOutcome::Directive(directive) => {
                stats.handled += 1;
                writeln!(writer, "{}", directive.to_sql())?;
            }
            ScanOutcome::Ignored => {}
            ScanOutcome::Malformed => {
                warn!("unknown line form, skipping: '{}'", line.trim());
            }
        }
        if stats.reached(args.first_n_lines) {
            break;
        }
    }
    writer.flush()?;

    info!(
        "finished processing input file '{}': total {} lines, {} update statements",
        args.input_file.display(),
        stats.total,
        stats.handled
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);
    if let Err(err) = run(&args) {
        error!("{err}, aborting ...");
        process::exit(err.exit_code());
    }
}
