//! # Scanline Register Entry Point
//!
//! ```bash
//! scanline VOUCHER TSHIRT MUG
//! scanline --rules prices.json --json < scans.txt
//! RUST_LOG=debug scanline --strict voucher voucher
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use scanline_cli::config::{AppConfig, Args};
use scanline_cli::error::AppResult;
use scanline_cli::{init_tracing, load_rules, read_items, run};
use tracing::error;

fn main() -> ExitCode {
    init_tracing();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Register run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> AppResult<()> {
    let args = Args::parse();
    let config = AppConfig::from_env().with_args(&args);

    let build = load_rules(&config)?;

    let items = if args.items.is_empty() && !io::stdin().is_terminal() {
        read_items(io::stdin().lock())?
    } else {
        args.items.clone()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &build, &items, &mut out)?;
    Ok(())
}
