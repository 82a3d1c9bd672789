//! Platform printing backends
//!
//! Both variants expose the same operations. The variant is chosen once, at
//! startup, and every query goes through the injected [`CommandRunner`].

mod unix;
mod windows;

pub use unix::UnixBackend;
pub use windows::WindowsBackend;

use crate::config::BridgeConfig;
use crate::job::JobTicket;
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{Capabilities, Platform, Printer};
use crate::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum Backend {
    Windows(WindowsBackend),
    Unix(UnixBackend),
}

impl Backend {
    /// Backend for the platform this process runs on
    pub fn detect(config: &BridgeConfig) -> Self {
        Self::for_platform(Platform::current(), config)
    }

    pub fn for_platform(platform: Platform, config: &BridgeConfig) -> Self {
        match platform {
            Platform::Windows => Backend::Windows(WindowsBackend::new(config)),
            Platform::Unix => Backend::Unix(UnixBackend::new(config)),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Backend::Windows(_) => Platform::Windows,
            Backend::Unix(_) => Platform::Unix,
        }
    }

    /// Printers that are neither offline nor in error
    pub async fn list_printers<R: CommandRunner>(&self, runner: &R) -> Result<Vec<Printer>> {
        let printers = match self {
            Backend::Windows(b) => b.list_printers(runner).await?,
            Backend::Unix(b) => b.list_printers(runner).await?,
        };
        Ok(printers
            .into_iter()
            .filter(|p| p.status.is_available())
            .collect())
    }

    pub async fn default_printer<R: CommandRunner>(&self, runner: &R) -> Result<Option<String>> {
        match self {
            Backend::Windows(b) => b.default_printer(runner).await,
            Backend::Unix(b) => b.default_printer(runner).await,
        }
    }

    pub async fn capabilities<R: CommandRunner>(
        &self,
        runner: &R,
        printer: &str,
    ) -> Result<Capabilities> {
        match self {
            Backend::Windows(b) => b.capabilities(runner, printer).await,
            Backend::Unix(b) => b.capabilities(runner, printer).await,
        }
    }

    /// The command that prints `document` with the ticket's settings
    pub fn submit_command(&self, document: &Path, ticket: &JobTicket) -> CommandSpec {
        match self {
            Backend::Windows(b) => b.submit_command(document, ticket),
            Backend::Unix(b) => b.submit_command(document, ticket),
        }
    }
}
