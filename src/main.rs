use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use datasweep::Query;

/// Diagnostics go to a log file so they never interleave with the report
/// on stdout. Overwritten on every run.
const LOG_FILE: &str = "datasweep.log";

#[derive(Parser)]
#[command(
    name = "datasweep",
    version,
    about = "Scans all relevant files (CSV, PDF, TXT, XLSX, XML) for a given name, login handle, and matriculation number."
)]
struct Cli {
    /// The directory to analyze.
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// The name to look for, as `Lastname Firstname` or `Firstname Lastname`.
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// The matriculation number to look for.
    #[arg(short = 'm', long)]
    matriculation: Option<String>,

    /// The login handle to look for, e.g. ga12acb.
    #[arg(short = 't', long)]
    handle: Option<String>,

    /// Skip the PDFs. Text extraction takes some time; you can leave it
    /// out for a first run.
    #[arg(short = 'S', long)]
    skip_pdfs: bool,

    /// Skip the XLSX files.
    #[arg(short = 'X', long)]
    skip_xlsx: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let name = prompt_if_missing(cli.name, "Name to search")?;
    let matriculation = prompt_if_missing(cli.matriculation, "Matriculation number")?;
    let handle = prompt_if_missing(cli.handle, "Login handle")?;
    let query = Query::new(&name, &matriculation, &handle)?;

    let report = datasweep::scan()
        .root(&cli.directory)
        .query(query)
        .skip_documents(cli.skip_pdfs)
        .skip_spreadsheets(cli.skip_xlsx)
        .run()?;

    let stdout = io::stdout();
    report
        .write_to(&mut stdout.lock())
        .context("could not write the report")?;
    Ok(())
}

fn init_logging() -> anyhow::Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)
        .with_context(|| format!("could not create {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DATASWEEP_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn prompt_if_missing(value: Option<String>, label: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("could not read from stdin")?;
    Ok(line.trim().to_owned())
}
