//! Checks corpus lines against the lexicon database and reports the words
//! that would be inserted. Lines carrying exclusion-alphabet markers are
//! routed to a side-channel file for manual review instead.
//!
//! Inserts are report-only by default; pass --commit to execute them.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use srlex::config::ReconcileConfig;
use srlex::corpus::{open_input, RunStats};
use srlex::reconcile::{Action, ExclusionFilter, Reconciler, SkipReason};
use srlex::store::{LexiconStore, PgStore};
use srlex::{LexError, Result};

#[derive(Parser)]
#[command(name = "csv2pg")]
#[command(about = "Checks words against the PostgreSQL Serbian word corpus")]
struct Args {
    /// Run configuration (database URL and statements)
    #[arg(short, long)]
    config_file: PathBuf,

    /// Input corpus file (plain or .bz2)
    #[arg(short, long)]
    input_file: PathBuf,

    /// Directory for the skipped-lines file, named after the input file
    #[arg(short, long, default_value = "/tmp")]
    output_dir: PathBuf,

    /// Stop after this many input lines
    #[arg(short = 'n', long)]
    first_n_lines: Option<u64>,

    /// Execute inserts instead of only reporting them
    #[arg(long)]
    commit: bool,

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

fn output_path(output_dir: &Path, input_file: &Path) -> PathBuf {
    match input_file.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join("out.txt"),
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = ReconcileConfig::load(&args.config_file)?;

    let reader = open_input(&args.input_file)?;
    let out_path = output_path(&args.output_dir, &args.input_file);
    info!("writing skipped lines to file '{}' ...", out_path.display());
    let output = File::create(&out_path).map_err(|source| LexError::OutputOpen {
        path: out_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(output);

    debug!("opening database ...");
    let store = PgStore::connect(&config.database).await?;
    let reconciler = Reconciler::new(store, ExclusionFilter::new(&config.exclusion_letters));
    if !args.commit {
        info!("dry run: insert directives are reported, not executed");
    }

    let mut stats = RunStats::default();
    info!(
        "started processing input file '{}' ...",
        args.input_file.display()
    );

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        stats.total += 1;
        match reconciler.reconcile(line).await? {
            Action::Skip(SkipReason::Malformed) => {
                warn!("non-compliant line, skipping: '{line}'");
            }
            Action::Skip(SkipReason::AlreadyPresent) => {
                stats.handled += 1;
            }
            Action::ForwardFiltered => {
                stats.handled += 1;
                debug!("skipping filtered line '{line}'");
                writeln!(writer, "{line}")?;
            }
            Action::Insert {
                wordform,
                lemma,
                tag,
                frequency,
            } => {
                stats.handled += 1;
                if args.commit {
                    reconciler
                        .store()
                        .insert(&wordform, &lemma, &tag, &frequency)
                        .await?;
                }
                info!("insert: ({wordform}, {lemma}, {tag}, {frequency})");
            }
        }
        if stats.reached(args.first_n_lines) {
            break;
        }
    }
    writer.flush()?;
    debug!("closing database ...");
    reconciler.store().close().await;

    info!(
        "finished processing input file '{}': total {} lines, {} handled",
        args.input_file.display(),
        stats.total,
        stats.handled
    );
    info!("skipped lines are in output file");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);
    if let Err(err) = run(&args).await {
        error!("{err}, aborting ...");
        process::exit(err.exit_code());
    }
}
