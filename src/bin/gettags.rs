//! Collects the distinct PoS tags occurring in a corpus file, writing each
//! tag once, in order of first appearance.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use srlex::corpus::{nfc_line, open_input, RunStats};
use srlex::extract::{extract, PatternKind, TagCollector};
use srlex::{LexError, Result};

#[derive(Parser)]
#[command(name = "gettags")]
#[command(about = "Collects distinct PoS tags from a Serbian word corpus")]
struct Args {
    /// Input corpus file (plain or .bz2)
    #[arg(short, long)]
    input_file: PathBuf,

    /// Output file for the deduplicated tag list
    #[arg(short, long, default_value = "out.txt")]
    output_file: PathBuf,

    /// Line pattern to match input against
    #[arg(short = 'r', long, value_enum)]
    regex: PatternKind,

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

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}").unwrap());

    let mut stats = RunStats::default();
    let mut tags = TagCollector::default();
    info!(
        "started processing input file '{}' ...",
        args.input_file.display()
    );

    for line in reader.lines() {
        let line = line?;
        let line = nfc_line(line.trim());
        stats.total += 1;
        match extract(&line, args.regex) {
            Some(tag) => {
                stats.handled += 1;
                debug!(tag, "matched");
                if tags.insert(tag) {
                    writeln!(writer, "{tag}")?;
                }
            }
            None => warn!("unmatched line: {line}"),
        }
        if stats.total % 1000 == 0 {
            pb.set_message(format!(
                "lines: {} | distinct tags: {}",
                stats.total,
                tags.len()
            ));
        }
        if stats.reached(args.first_n_lines) {
            break;
        }
    }
    writer.flush()?;
    pb.finish_and_clear();

    info!(
        "finished processing input file '{}': total {} lines, {} matching lines",
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
