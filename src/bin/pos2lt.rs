//! Replaces PoS tags with LT tags in a Serbian word corpus file, reporting
//! the distinct LT feature codes seen at the end of the run.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use srlex::corpus::{open_input, CorpusLine, RunStats};
use srlex::translate::{TagMap, TranslateError, Translator};
use srlex::{LexError, Result};

/// Separator between feature codes in a composite LT tag.
const SEPARATOR: char = ':';

#[derive(Parser)]
#[command(name = "pos2lt")]
#[command(about = "Changes PoS tags to LT tags in a Serbian word corpus file")]
struct Args {
    /// Input corpus file (plain or .bz2)
    #[arg(short, long)]
    input_file: PathBuf,

    /// Directory for the translated file, named after the input file
    #[arg(short, long, default_value = "/tmp")]
    output_dir: PathBuf,

    /// Tag-mapping table
    #[arg(short, long, default_value = "schema/pos2lt.yaml")]
    tag_map: PathBuf,

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

/// Output goes to the output directory under the input file's own name.
fn output_path(output_dir: &Path, input_file: &Path) -> PathBuf {
    match input_file.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join("out.txt"),
    }
}

fn run(args: &Args) -> Result<()> {
    let map = TagMap::from_yaml(&args.tag_map)?;
    info!(
        "loaded {} tag mappings from '{}'",
        map.len(),
        args.tag_map.display()
    );

    let reader = open_input(&args.input_file)?;
    let out_path = output_path(&args.output_dir, &args.input_file);
    info!("writing output to file '{}' ...", out_path.display());
    let output = File::create(&out_path).map_err(|source| LexError::OutputOpen {
        path: out_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(output);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}").unwrap());

    let mut translator = Translator::new(&map);
    let mut stats = RunStats::default();
    info!(
        "started processing input file '{}' ...",
        args.input_file.display()
    );

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        stats.total += 1;
        match CorpusLine::parse(line) {
            None => warn!("non-compliant line, skipping: '{line}'"),
            Some(record) if record.pos_tag.is_empty() => {
                warn!("no PoS tag found on line: {line}");
            }
            Some(record) => match translator.translate(record.pos_tag, SEPARATOR) {
                Ok(lt_tag) => {
                    stats.handled += 1;
                    writeln!(writer, "{}\t{}\t{}", record.wordform, record.lemma, lt_tag)?;
                }
                Err(err @ TranslateError::EmptyMapping(_)) => {
                    warn!(
                        "{err}: wordform {}, lemma {}",
                        record.wordform, record.lemma
                    );
                }
                Err(err) => {
                    error!(
                        "{err}: wordform {}, lemma {}",
                        record.wordform, record.lemma
                    );
                }
            },
        }
        if stats.total % 1000 == 0 {
            pb.set_message(format!(
                "lines: {} | translated: {}",
                stats.total, stats.handled
            ));
        }
        if stats.reached(args.first_n_lines) {
            break;
        }
    }
    writer.flush()?;
    pb.finish_and_clear();

    info!(
        "finished processing input file '{}': total {} lines, {} translated",
        args.input_file.display(),
        stats.total,
        stats.handled
    );
    info!(
        "found following distinctive LT tags: {:?}",
        translator.distinct().sorted()
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
