use std::process::ExitCode;

use clap::Parser;
use precis_cli::commands::ext_summarize::ExtSummarizeArgs;

fn main() -> ExitCode {
    match ExtSummarizeArgs::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
