//! `shredtree` — shred a source tree and write a SHIF-A stream to stdout.
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use shredcompare::Error;
use shredcompare::cancel::CancelToken;
use shredcompare::model::Header;
use shredcompare::normalize::NormalizationSet;
use shredcompare::reporter::Reporter;
use shredcompare::shif_a::{self, BodyFraming, ShifADocument};
use shredcompare::shred::shred_files;
use shredcompare::walk::TreeWalker;

/// Shred a source tree into a SHIF-A stream, written to stdout.
#[derive(Parser)]
#[command(
    name = "shredtree",
    version,
    about = "Shred a source tree into a SHIF-A stream"
)]
struct Cli {
    /// Restrict eligibility to .c/.h/.txt files
    #[arg(short = 'c')]
    c_only: bool,

    /// Change to this directory before scanning TREE
    #[arg(short = 'd', value_name = "DIR")]
    chdir: Option<PathBuf>,

    /// Shred size, in relevant lines
    #[arg(short = 's', default_value_t = 5)]
    shred_size: usize,

    /// Enable remove_whitespace normalization
    #[arg(short = 'w')]
    remove_whitespace: bool,

    /// Print a one-line progress summary to stderr
    #[arg(short = 'x')]
    verbose: bool,

    /// Root of the tree to shred
    tree: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if cli.shred_size == 0 {
        eprintln!("error: shred size must be at least 1");
        std::process::exit(2);
    }

    if let Some(dir) = &cli.chdir
        && let Err(err) = std::env::set_current_dir(dir)
    {
        eprintln!("error: cannot chdir to {}: {err}", dir.display());
        std::process::exit(2);
    }

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let normalization = NormalizationSet::with_remove_whitespace(cli.remove_whitespace);
    let walker = TreeWalker::new(&cli.tree, cli.c_only, None)?;
    let files = walker.files()?;

    let mut reporter = Reporter::new();
    let cancel = CancelToken::new();
    let shredded = shred_files(
        &files,
        cli.shred_size,
        &normalization,
        &mut reporter,
        &cancel,
    )?
    .expect("the CLI never requests cancellation");

    let doc = ShifADocument {
        header: Header {
            hash_method: "md5".to_string(),
            shred_size: cli.shred_size,
            normalization,
        },
        generator_program: "shredtree".to_string(),
        comments: Vec::new(),
        files: shredded,
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    shif_a::write(&mut handle, &doc, BodyFraming::Binary)?;
    handle.flush()?;

    if cli.verbose {
        eprintln!("{}", reporter.summary());
    }
    Ok(())
}
