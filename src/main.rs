use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use degrees::cli::{prompt_name, resolve_person, write_json, write_path};
use degrees::loader::load_directory;
use degrees::{PathSearch, SearchLimits};

/// Find the fewest shared-movie links between two people.
#[derive(Parser, Debug)]
#[command(name = "degrees")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding people.csv, movies.csv and stars.csv
    #[arg(default_value = "large", env = "DEGREES_DATA_DIR")]
    directory: PathBuf,

    /// Source person's name (prompted for when omitted)
    #[arg(long)]
    source: Option<String>,

    /// Target person's name (prompted for when omitted)
    #[arg(long)]
    target: Option<String>,

    /// Give up after discovering this many people
    #[arg(long, env = "DEGREES_MAX_EXPLORED")]
    max_explored: Option<usize>,

    /// Print the result as JSON instead of a numbered trace
    #[arg(long)]
    json: bool,
}

/// Logs go to stderr so stdout carries only prompts and results.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("degrees=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    info!(directory = %args.directory.display(), "loading data");
    let catalogue = load_directory(&args.directory)
        .with_context(|| format!("failed to load {}", args.directory.display()))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let source_name = match args.source {
        Some(name) => name,
        None => prompt_name("Name: ", &mut input, &mut out)?,
    };
    let source = resolve_person(&catalogue, &source_name, &mut input, &mut out)?;
    let target_name = match args.target {
        Some(name) => name,
        None => prompt_name("Name: ", &mut input, &mut out)?,
    };
    let target = resolve_person(&catalogue, &target_name, &mut input, &mut out)?;

    let limits = SearchLimits {
        max_explored: args.max_explored,
    };
    let outcome = PathSearch::new(&catalogue, &source, &target)?
        .with_limits(limits)
        .run()?;

    if args.json {
        write_json(&source, &target, &outcome, &mut out)?;
    } else {
        write_path(&catalogue, &source, &outcome, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
