//! `shredfilter` — read a SCF-B report, apply filters, write SCF-B back.
use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use regex::Regex;
use serde::Serialize;

use shredcompare::Error;
use shredcompare::filters::{filter_by_filename, filter_by_significance, filter_by_size};
use shredcompare::model::TreeProperties;
use shredcompare::report_helpers::print_json_stdout;
use shredcompare::scf_b;

/// Read a SCF-B report (from FILE or stdin), apply the requested filters,
/// and write the filtered SCF-B report to stdout.
#[derive(Parser)]
#[command(name = "shredfilter", version, about = "Filter a SCF-B report")]
struct Cli {
    /// Keep only cliques with a range of at least this many lines
    #[arg(long = "min-size", value_name = "N")]
    min_size: Option<usize>,

    /// Keep only cliques with a location matching this filename pattern
    #[arg(long = "name", value_name = "PATTERN")]
    name: Option<String>,

    /// Keep only cliques the triviality classifier deems significant
    #[arg(long = "significant")]
    significant: bool,

    /// Directory file paths in the report are relative to (default: ".")
    #[arg(long = "base-dir", value_name = "DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Print a JSON summary instead of writing filtered SCF-B
    #[arg(long)]
    json: bool,

    /// Read SCF-B from this file instead of stdin
    file: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary {
    matches: usize,
    trees: Vec<(String, TreeProperties)>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut report = match &cli.file {
        Some(path) => {
            let mut file = std::fs::File::open(path)?;
            scf_b::read(&mut file)?
        }
        None => {
            let mut input = Vec::new();
            std::io::stdin().read_to_end(&mut input)?;
            scf_b::read(&mut &input[..])?
        }
    };

    if let Some(min_size) = cli.min_size {
        filter_by_size(&mut report, min_size);
    }
    if let Some(pattern) = &cli.name {
        let regex = Regex::new(pattern)
            .map_err(|err| Error::MalformedInput(format!("bad --name pattern: {err}")))?;
        filter_by_filename(&mut report, &regex);
    }
    if cli.significant {
        filter_by_significance(&mut report, &cli.base_dir)?;
    }

    if cli.json {
        let summary = Summary {
            matches: report.matches.unwrap_or(report.cliques.len()),
            trees: report.trees.clone(),
        };
        print_json_stdout(&summary)
            .map_err(|err| Error::MalformedInput(format!("cannot render JSON summary: {err}")))?;
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    scf_b::write(&mut handle, &report)?;
    handle.flush()?;
    Ok(())
}
