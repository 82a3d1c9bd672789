//! Printer discovery and job submission.
//!
//! [`PrintBridge`] is the single entry point: it lists printers, reports
//! their capabilities, recommends trays, and submits geometry-adjusted jobs
//! through the platform [`Backend`].

pub mod backend;
mod bridge;
mod catalog;
mod config;
mod job;
pub mod parse;
mod runner;
mod tray;
mod types;

pub use backend::{Backend, UnixBackend, WindowsBackend};
pub use bridge::PrintBridge;
pub use catalog::ProductCatalog;
pub use config::BridgeConfig;
pub use job::{AUTO_SELECT_TRAY, JobTicket};
pub use print_geometry::Margins;
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use tray::TrayRecommender;
pub use types::*;

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] print_geometry::GeometryError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} failed ({status}): {message}")]
    CommandFailed {
        program: String,
        status: String,
        message: String,
    },
    #[error("{program} timed out after {limit:?}")]
    Timeout { program: String, limit: Duration },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
