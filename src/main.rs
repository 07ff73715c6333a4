use buoybot::cli::{self, Args};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(error) = cli::setup_logging(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }

    // Single-threaded runtime; the run is strictly sequential
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to create async runtime: {}", e);
            process::exit(1);
        });

    let result = runtime.block_on(cli::run(args));

    match result {
        Ok(_outcome) => {
            // Publishing failures are reported by the run and still exit cleanly
            process::exit(0);
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
