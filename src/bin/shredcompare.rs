//! `shredcompare` — read SHIF-A streams, build and coalesce cliques, and
//! write a SCF-B report to stdout.
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use shredcompare::Error;
use shredcompare::cancel::CancelToken;
use shredcompare::clique::build_cliques;
use shredcompare::coalesce::coalesce;
use shredcompare::model::Report;
use shredcompare::reporter::Reporter;
use shredcompare::scf_b;
use shredcompare::shif_a::{self, BodyFraming};

/// Read one or more SHIF-A streams and write a merged, coalesced SCF-B
/// report to stdout.
#[derive(Parser)]
#[command(
    name = "shredcompare",
    version,
    about = "Merge SHIF-A streams into a SCF-B report"
)]
struct Cli {
    /// Drop cliques entirely within one tree (cross-tree-only)
    #[arg(short = 'd')]
    cross_tree_only: bool,

    /// Print a one-line progress summary to stderr
    #[arg(short = 'x')]
    verbose: bool,

    /// SHIF-A files to merge
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut docs = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let mut file = std::fs::File::open(path)?;
        let doc = shif_a::read(&mut file, BodyFraming::Binary)?;
        docs.push(doc);
    }

    let mut reporter = Reporter::new();
    let ingest = build_cliques(&docs, cli.cross_tree_only, &mut reporter)?;

    let cancel = CancelToken::new();
    let cliques = coalesce(ingest.cliques, &mut reporter, &cancel);

    let mut report = Report {
        header: ingest.header,
        merge_program: Some("shredcompare".to_string()),
        filter_program: None,
        filtering: if cli.cross_tree_only {
            Some("cross-tree-only".to_string())
        } else {
            None
        },
        matches: None,
        trees: ingest.trees,
        files: ingest.files,
        cliques,
    };
    report.preen();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    scf_b::write(&mut handle, &report)?;
    handle.flush()?;

    if cli.verbose {
        eprintln!("{}", reporter.summary());
    }
    Ok(())
}
