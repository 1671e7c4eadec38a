//! Terminal host for the todo sync core.
//!
//! Reads one command per line, dispatches it to the `App`, and redraws the
//! screen after every command. The screen goes to `output`; logs go to
//! stderr through tracing.

pub mod command;
pub mod config;
pub mod transport;

use std::io::{BufRead, Write};

use anyhow::Result;
use todo_sync_core::{App, Transport};

use command::{Command, HELP};

pub use config::Config;
pub use transport::UreqTransport;

/// Mount the app, then run commands from `input` until EOF or `quit`.
pub fn run_session<T: Transport>(app: &mut App<T>, input: impl BufRead, mut output: impl Write) -> Result<()> {
    app.mount();
    write!(output, "{}", app.screen())?;
    for line in input.lines() {
        match command::parse(&line?) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Ok(Command::List) => {}
            Ok(Command::Intent(intent)) => app.dispatch(intent),
            Err(e) => {
                writeln!(output, "! {e}")?;
                continue;
            }
        }
        write!(output, "{}", app.screen())?;
    }
    output.flush()?;
    Ok(())
}
