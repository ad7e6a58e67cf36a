use clap::Parser;
use tally::cli::commands::Cli;
use tally::cli::handlers;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = handlers::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
