//! `shred-magicgen` — print a table of MD5-derived magic bit patterns
//! for a Rabin-Karp-style rolling hash (C13). Standalone; not part of the
//! C3–C9 matching pipeline.
use clap::Parser;

use shredcompare::magicbits::generate_magic_table;

/// Generate a table of pseudo-random magic values from MD5 digests.
#[derive(Parser)]
#[command(
    name = "shred-magicgen",
    version,
    about = "Generate a magic-bits table"
)]
struct Cli {
    /// Number of magic values to generate
    #[arg(default_value_t = 256)]
    count: usize,
}

fn main() {
    let cli = Cli::parse();
    for value in generate_magic_table(cli.count) {
        println!("{value:#018x}");
    }
}
