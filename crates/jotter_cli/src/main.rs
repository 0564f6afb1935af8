//! Interactive note prompt.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the note store.
//! - Hand the store to the command session and surface fatal errors.

mod session;

use jotter_core::{init_logging, JotterConfig, NoteStore};
use log::{error, info};
use session::Session;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let config = JotterConfig::resolve_default()?;
    init_logging(&config.log_level, &config.log_dir)?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        jotter_core::core_version()
    );

    let mut store = NoteStore::open(config.storage()).inspect_err(|err| {
        error!("event=store_open module=cli status=error error={err}");
    })?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(&mut store, stdin.lock(), stdout.lock())
        .run()
        .inspect_err(|err| {
            error!("event=session_end module=cli status=error error={err}");
        })?;
    Ok(())
}
