mod check;
mod logging;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let args = check::Args::parse();
    logging::init(args.verbose);

    match check::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("telemetry-check: {}", e);
            ExitCode::FAILURE
        }
    }
}
