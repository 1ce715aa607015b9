use std::process::ExitCode;

use clap::Parser;
use precis_cli::commands::abst_summarize::AbstSummarizeArgs;

fn main() -> ExitCode {
    match AbstSummarizeArgs::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
