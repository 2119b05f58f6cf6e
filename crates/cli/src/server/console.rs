use std::io::BufRead;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Exit,
    Help,
    Unknown,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "exit" => Self::Exit,
            "help" => Self::Help,
            _ => Self::Unknown,
        }
    }
}

/// Starts the operator console on stdin.
///
/// Stdin is read on a plain OS thread rather than through `tokio::io::stdin`,
/// whose blocking read would keep the runtime from shutting down after the
/// last line was consumed.
pub fn spawn_console(shutdown: CancellationToken) {
    let (tx, rx) = mpsc::channel::<String>(16);

    let reader = std::thread::Builder::new()
        .name("console-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Console read failed");
                        break;
                    }
                }
            }
        });

    if let Err(e) = reader {
        warn!(error = %e, "Console unavailable");
        return;
    }

    tokio::spawn(run_console(rx, shutdown));
}

/// Processes console lines until `exit`, end of input, or shutdown.
/// End of input only stops the console; the server keeps running.
pub async fn run_console(mut lines: mpsc::Receiver<String>, shutdown: CancellationToken) {
    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.recv() => line,
        };

        let Some(line) = line else {
            debug!("Console input closed");
            break;
        };

        match ConsoleCommand::parse(&line) {
            ConsoleCommand::Exit => {
                println!("Wait until exit");
                info!("Shutdown requested from console");
                shutdown.cancel();
                break;
            }
            ConsoleCommand::Help => println!("Enter \"exit\" to terminate"),
            ConsoleCommand::Unknown => {}
        }
    }
}

/// Cancels `shutdown` on Ctrl-C.
pub fn spawn_interrupt_watcher(shutdown: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    info!("Interrupt received, shutting down");
                    shutdown.cancel();
                }
                Err(e) => warn!(error = %e, "Unable to listen for Ctrl-C"),
            },
        }
    });
}
