use crate::{PrintCommand, PrintUpdate};
use print_bridge::{CommandRunner, PrintBridge};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Async worker task that processes print commands one at a time and sends
/// updates. Returns when the command channel closes.
pub async fn worker_task<R: CommandRunner>(
    bridge: Arc<PrintBridge<R>>,
    mut command_rx: mpsc::UnboundedReceiver<PrintCommand>,
    update_tx: mpsc::UnboundedSender<PrintUpdate>,
) {
    let mut deferred = VecDeque::new();

    loop {
        let cmd = match deferred.pop_front() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        if let PrintCommand::ListPrinters = cmd {
            // Drain queued listings, one query answers them all
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let PrintCommand::ListPrinters = next_cmd {
                    log::debug!("Discarding queued printer listing");
                } else {
                    deferred.push_back(next_cmd);
                }
            }
        }

        process_command(cmd, &bridge, &update_tx).await;
    }

    log::debug!("Print worker stopped");
}

async fn process_command<R: CommandRunner>(
    cmd: PrintCommand,
    bridge: &PrintBridge<R>,
    update_tx: &mpsc::UnboundedSender<PrintUpdate>,
) {
    let update = match cmd {
        PrintCommand::ListPrinters => PrintUpdate::PrintersListed {
            printers: bridge.list_printers().await,
        },
        PrintCommand::DefaultPrinter => PrintUpdate::DefaultPrinter {
            printer: bridge.default_printer().await,
        },
        PrintCommand::Capabilities { printer } => {
            let capabilities = bridge.capabilities(&printer).await;
            PrintUpdate::CapabilitiesFetched {
                printer,
                capabilities,
            }
        }
        PrintCommand::RecommendTray {
            width_mm,
            height_mm,
        } => PrintUpdate::TrayRecommended {
            width_mm,
            height_mm,
            tray: bridge.recommend_tray(width_mm, height_mm),
        },
        PrintCommand::Print { path, settings } => {
            let outcome = bridge.print(&path, settings).await;
            PrintUpdate::PrintFinished { path, outcome }
        }
    };

    if update_tx.send(update).is_err() {
        log::debug!("Update receiver dropped");
    }
}
