//! Unix: CUPS command-line tools (`lpstat`, `lpoptions`, `lp`)

use crate::config::BridgeConfig;
use crate::job::JobTicket;
use crate::parse;
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{Capabilities, ColorMode, DuplexMode, Orientation, Printer};
use crate::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct UnixBackend {
    lp: String,
    lpstat: String,
    lpoptions: String,
}

impl UnixBackend {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            lp: config.lp.clone(),
            lpstat: config.lpstat.clone(),
            lpoptions: config.lpoptions.clone(),
        }
    }

    /// Query commands run in the C locale so their text stays parseable
    fn query(&self, program: &str) -> CommandSpec {
        CommandSpec::new(program).env("LC_ALL", "C")
    }

    fn options_command(&self, printer: &str) -> CommandSpec {
        self.query(&self.lpoptions).args(["-p", printer, "-l"])
    }

    pub(crate) async fn list_printers<R: CommandRunner>(&self, runner: &R) -> Result<Vec<Printer>> {
        let command = self.query(&self.lpstat).arg("-p");
        let output = runner.run(&command).await?.into_success(&command.program)?;

        let mut printers = parse::parse_lpstat_printers(&output.stdout);
        for printer in printers.iter_mut().filter(|p| p.status.is_available()) {
            printer.duplex_supported = self.supports_duplex(runner, &printer.name).await;
        }
        Ok(printers)
    }

    /// Duplex probe for the listing; a failed probe means "no duplex"
    async fn supports_duplex<R: CommandRunner>(&self, runner: &R, printer: &str) -> bool {
        let command = self.options_command(printer);
        match runner
            .run(&command)
            .await
            .and_then(|output| output.into_success(&command.program))
        {
            Ok(output) => parse::options_support_duplex(&parse::parse_option_listing(&output.stdout)),
            Err(e) => {
                log::warn!("Duplex probe for {printer} failed: {e}");
                false
            }
        }
    }

    pub(crate) async fn default_printer<R: CommandRunner>(
        &self,
        runner: &R,
    ) -> Result<Option<String>> {
        let command = self.query(&self.lpstat).arg("-d");
        let output = runner.run(&command).await?.into_success(&command.program)?;
        Ok(parse::parse_lpstat_default(&output.stdout))
    }

    pub(crate) async fn capabilities<R: CommandRunner>(
        &self,
        runner: &R,
        printer: &str,
    ) -> Result<Capabilities> {
        let command = self.options_command(printer);
        let output = runner.run(&command).await?.into_success(&command.program)?;
        Ok(parse::parse_capabilities(&output.stdout))
    }

    /// `lp` invocation. Duplex and color are sent under several keyword
    /// spellings because drivers disagree on which one they honor.
    pub(crate) fn submit_command(&self, document: &Path, ticket: &JobTicket) -> CommandSpec {
        let mut command = CommandSpec::new(&self.lp);
        if let Some(printer) = &ticket.printer {
            command = command.arg("-d").arg(printer);
        }
        command = command
            .arg("-n")
            .arg(ticket.copies.to_string())
            .args(["-o", "fit-to-page=false", "-o", "scaling=100"]);

        if let Some(pages) = &ticket.pages {
            command = command.arg("-P").arg(pages);
        }
        if let Some(tray) = &ticket.tray {
            command = command.arg("-o").arg(format!("InputSlot={tray}"));
        }

        let duplex: &[&str] = match ticket.duplex {
            DuplexMode::LongEdge => &["sides=two-sided-long-edge", "Duplex=DuplexNoTumble", "duplex=on"],
            DuplexMode::ShortEdge => &["sides=two-sided-short-edge", "Duplex=DuplexTumble", "duplex=on"],
            DuplexMode::None => &["sides=one-sided", "Duplex=None", "duplex=off"],
        };
        let color: &[&str] = match ticket.color {
            ColorMode::Grayscale => &[
                "ColorModel=Gray",
                "ColorModel=Grayscale",
                "print-color-mode=monochrome",
            ],
            ColorMode::Color => &["ColorModel=CMYK", "print-color-mode=color"],
        };
        for option in duplex.iter().chain(color) {
            command = command.arg("-o").arg(*option);
        }

        command = command.args(["-o", "print-quality=5"]);
        if let Some(media) = &ticket.media_type {
            command = command.arg("-o").arg(format!("MediaType={media}"));
        }

        command = match ticket.orientation {
            Orientation::Landscape => command.args(["-o", "landscape", "-o", "orientation-requested=4"]),
            Orientation::Portrait => command.args(["-o", "orientation-requested=3"]),
        };

        command.arg(document.to_string_lossy())
    }
}
