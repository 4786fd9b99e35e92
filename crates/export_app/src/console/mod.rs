//! Line-oriented stand-in for the presentation layer.
mod input;
mod render;

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use export_app::Session;
use export_core::OperationKind;
use export_logging::export_debug;

use input::{parse_command, Command};

const TICK: Duration = Duration::from_millis(75);

pub fn run(session: &Session) -> anyhow::Result<()> {
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut out = io::stdout().lock();
    writeln!(out, "{}", render::help())?;
    writeln!(out, "{}", render::render(&session.view()))?;
    out.flush()?;

    loop {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => match parse_command(&line) {
                Ok(Command::Msg(msg)) => {
                    if let Some(view) = session.dispatch(msg) {
                        writeln!(out, "{}", render::render(&view))?;
                    }
                }
                Ok(Command::Show) => writeln!(out, "{}", render::render(&session.view()))?,
                Ok(Command::Help) => writeln!(out, "{}", render::help())?,
                Ok(Command::Quit) => break,
                Err(err) => writeln!(out, "{err}")?,
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                export_debug!("Input closed; letting in-flight work settle");
                drain_in_flight(session, &mut out)?;
                break;
            }
        }

        if let Some(view) = session.pump() {
            writeln!(out, "{}", render::render(&view))?;
        }
        for notification in session.take_notifications() {
            writeln!(out, "{}", render::notification(&notification))?;
        }
        out.flush()?;
    }
    Ok(())
}

/// Requests cannot be cancelled, so at end of input wait for them to finish.
fn drain_in_flight(session: &Session, out: &mut impl Write) -> io::Result<()> {
    while matches!(
        session.view().operation,
        OperationKind::Previewing | OperationKind::Downloading
    ) {
        if let Some(view) = session.wait_for_event(TICK) {
            writeln!(out, "{}", render::render(&view))?;
        }
        for notification in session.take_notifications() {
            writeln!(out, "{}", render::notification(&notification))?;
        }
    }
    Ok(())
}
