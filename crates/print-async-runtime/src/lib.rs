use std::path::PathBuf;

mod worker;

pub use worker::worker_task;

// Re-export types from library crates
pub use print_bridge::{Capabilities, PrintOutcome, PrintSettings, Printer};

/// Commands sent from the front end to the worker
#[derive(Debug, Clone)]
pub enum PrintCommand {
    ListPrinters,
    DefaultPrinter,
    Capabilities {
        printer: String,
    },
    RecommendTray {
        width_mm: f32,
        height_mm: f32,
    },
    Print {
        path: PathBuf,
        settings: PrintSettings,
    },
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum PrintUpdate {
    PrintersListed {
        printers: Vec<Printer>,
    },
    DefaultPrinter {
        printer: Option<String>,
    },
    CapabilitiesFetched {
        printer: String,
        capabilities: Capabilities,
    },
    TrayRecommended {
        width_mm: f32,
        height_mm: f32,
        tray: Option<String>,
    },
    PrintFinished {
        path: PathBuf,
        outcome: PrintOutcome,
    },
}
