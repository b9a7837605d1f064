//! CLI entry point for tpm.

use std::process::ExitCode;

use tpm::run;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if error.is_reported() {
                eprintln!("{error}");
            }
            error.exit_code()
        }
    }
}
