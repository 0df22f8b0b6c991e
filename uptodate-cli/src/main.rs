//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::Env;
use uptodate_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on the terminal before exiting"
)]
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    match uptodate_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("uptodate: {err}");
            std::process::exit(1);
        }
    }
}
