//! Terminal front end for the task board.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open slot storage.
//! - Run the interactive loop over stdin/stdout.
//!
//! # Invariants
//! - Storage problems never abort startup; the session falls back to memory.

mod cli;
mod repl;
mod terminal;

use clap::Parser;
use log::{error, info};
use std::io;
use taskboard_core::db::open_db;
use taskboard_core::{
    init_logging_from_config, BoardConfig, MemorySlotStorage, PersistenceAdapter, Presenter,
    SlotStorage, SqliteSlotStorage, TaskStore,
};

use crate::cli::Args;
use crate::repl::Repl;
use crate::terminal::TerminalUi;

fn main() {
    let args = Args::parse();
    let config = args.board_config();

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if args.in_memory {
        info!("event=session_start module=cli status=ok storage=memory");
        run(&config, MemorySlotStorage::new());
        return;
    }

    match open_db(config.db_path()) {
        Ok(conn) => {
            info!("event=session_start module=cli status=ok storage=sqlite");
            run(&config, SqliteSlotStorage::new(&conn));
        }
        Err(err) => {
            error!(
                "event=session_start module=cli status=degraded storage=memory error={}",
                err
            );
            eprintln!(
                "warning: cannot open {} ({err}); tasks will not be saved this session",
                config.db_path().display()
            );
            run(&config, MemorySlotStorage::new());
        }
    }
}

fn run<S: SlotStorage>(config: &BoardConfig, storage: S) {
    let persistence = PersistenceAdapter::with_key(storage, config.storage_key.as_str());
    let store = TaskStore::open(persistence);
    let ui = TerminalUi::new(io::stdin().lock(), io::stdout());
    let mut repl = Repl::new(store, Presenter::new(ui));
    repl.run();
    info!(
        "event=session_end module=cli status=ok count={}",
        repl.store().len()
    );
}
