use std::process::ExitCode;

use clap::Parser;
use mdcolor::{app, logging, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match app::run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
