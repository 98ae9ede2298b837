use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use dnid_core::apply::{apply, ApplyConfig};
use dnid_core::identity::error::IdentityError;

mod args;

/// Exit code for a user interrupt; distinct from validation failures.
const EXIT_INTERRUPTED: i32 = 1;

/// Exit code for identity lookup/validation failures.
const EXIT_LOAD_FAILURE: i32 = 2;

fn main() -> Result<()> {
    ctrlc::set_handler(|| std::process::exit(EXIT_INTERRUPTED))
        .context("failed to install interrupt handler")?;

    let args = args::Args::parse();
    let config = ApplyConfig::for_root(Path::new("."));

    let outcome = match apply(&config, &args.identity) {
        Ok(outcome) => outcome,
        Err(err) => match err.downcast_ref::<IdentityError>() {
            // Expected user-facing failures get one clean line; anything
            // else propagates with its full context chain.
            Some(load_err) => {
                eprintln!("{load_err}");
                std::process::exit(EXIT_LOAD_FAILURE);
            }
            None => return Err(err),
        },
    };

    if outcome.changed() {
        println!("Applied signing identity '{}'", outcome.identity);
    } else {
        println!("Signing identity '{}' already applied", outcome.identity);
    }

    Ok(())
}
