//! # acai
//!
//! ```bash
//! acai seed                       # load the sample catalog
//! acai menu                       # cost, markup and margin per item
//! acai alerts --json              # machine-readable alerts
//! acai suggest --cost 4,40        # price for the configured margin
//! acai scenarios --cost 10 --margins 40,50,60
//! ```

use std::process::ExitCode;

use acai_cli::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    acai_cli::init_tracing();

    match acai_cli::run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error[{}]: {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}
