use std::process::ExitCode;

use clap::Parser;
use precis_cli::commands::get_synonyms::GetSynonymsArgs;

fn main() -> ExitCode {
    match GetSynonymsArgs::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
