use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use worldgen_app::{CliArgs, init_logging, run};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(summary) => {
            println!(
                "Generated {}x{} world (seed {}) into {}",
                summary.width,
                summary.height,
                summary.seed,
                args.out.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
