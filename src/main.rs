//! CLI entry point for reordering cover-art collections by color

use chromagrid::io::cli::{BatchRunner, Cli, init_logging};
use clap::Parser;

fn main() -> chromagrid::Result<()> {
    let cli = Cli::parse();
    init_logging();
    BatchRunner::new(cli).run().map(|_| ())
}
