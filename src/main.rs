#![forbid(unsafe_code)]

//! wviz — witness distribution viewer CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("wviz: {e}");
        std::process::exit(1);
    }
}
