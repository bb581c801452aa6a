//! The `ifjc` binary: command-line entry point for the IFJ25 front end.
//!
//! Takes exactly one positional argument (the source file path); any
//! other argument shape fails argument parsing with a usage message and a
//! non-zero status. On a front-end error the message goes to stderr and
//! the process exits with the error's taxonomy code; success exits 0.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ifjc_drv::{Config, FrontEndError, Session};

/// IFJ25 compiler front end
#[derive(Parser, Debug)]
#[command(name = "ifjc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiler front end for the IFJ25 language", long_about = None)]
struct Cli {
    /// Path to the IFJ25 source file
    input: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let session = Session::new(Config { input: cli.input });

    match session.compile() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            let code = err
                .downcast_ref::<FrontEndError>()
                .map(|e| e.exit_code())
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
