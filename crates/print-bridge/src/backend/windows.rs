//! Windows: PowerShell queries against the print spooler, SumatraPDF for
//! submission.

use crate::config::BridgeConfig;
use crate::job::JobTicket;
use crate::parse::{self, MAX_PAPER_SIZES};
use crate::runner::{CommandRunner, CommandSpec};
use crate::types::{Capabilities, ColorMode, DuplexMode, Orientation, Printer};
use crate::Result;
use std::path::{Path, PathBuf};

const UTF8_OUTPUT: &str = "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8;";

const LIST_PRINTERS_SCRIPT: &str = "Add-Type -AssemblyName System.Drawing; \
Get-Printer | ForEach-Object { \
$settings = New-Object System.Drawing.Printing.PrinterSettings; \
$settings.PrinterName = $_.Name; \
[PSCustomObject]@{ Name = $_.Name; PrinterStatus = $_.PrinterStatus; CanDuplex = $settings.CanDuplex } \
} | ConvertTo-Csv -NoTypeInformation";

const DEFAULT_PRINTER_SCRIPT: &str = "Get-CimInstance -ClassName Win32_Printer | \
Where-Object { $_.Default -eq $true } | Select-Object -ExpandProperty Name";

#[derive(Debug, Clone)]
pub struct WindowsBackend {
    powershell: String,
    sumatra_pdf: PathBuf,
}

impl WindowsBackend {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            powershell: config.powershell.clone(),
            sumatra_pdf: config.sumatra_pdf.clone(),
        }
    }

    fn powershell(&self, script: &str) -> CommandSpec {
        let script = format!("{UTF8_OUTPUT} {script}");
        CommandSpec::new(&self.powershell).args([
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
            script.as_str(),
        ])
    }

    pub(crate) async fn list_printers<R: CommandRunner>(&self, runner: &R) -> Result<Vec<Printer>> {
        let command = self.powershell(LIST_PRINTERS_SCRIPT);
        let output = runner.run(&command).await?.into_success(&command.program)?;
        Ok(parse::parse_printer_csv(&output.stdout))
    }

    pub(crate) async fn default_printer<R: CommandRunner>(
        &self,
        runner: &R,
    ) -> Result<Option<String>> {
        let command = self.powershell(DEFAULT_PRINTER_SCRIPT);
        let output = runner.run(&command).await?.into_success(&command.program)?;
        Ok(parse::parse_single_value(&output.stdout))
    }

    pub(crate) async fn capabilities<R: CommandRunner>(
        &self,
        runner: &R,
        printer: &str,
    ) -> Result<Capabilities> {
        let command = self.powershell(&capabilities_script(printer));
        let output = runner.run(&command).await?.into_success(&command.program)?;
        Ok(parse::parse_sectioned(&output.stdout))
    }

    /// SumatraPDF invocation. Every directive is spelled out in
    /// `-print-settings`, including simplex, so driver defaults never leak in.
    pub(crate) fn submit_command(&self, document: &Path, ticket: &JobTicket) -> CommandSpec {
        let mut settings: Vec<String> = vec![
            match ticket.duplex {
                DuplexMode::None => "simplex",
                DuplexMode::LongEdge => "duplexlong",
                DuplexMode::ShortEdge => "duplexshort",
            }
            .to_string(),
            match ticket.color {
                ColorMode::Grayscale => "monochrome",
                ColorMode::Color => "color",
            }
            .to_string(),
            match ticket.orientation {
                Orientation::Landscape => "landscape",
                Orientation::Portrait => "portrait",
            }
            .to_string(),
            "noscale".to_string(),
            format!("{}x", ticket.copies),
        ];
        if let Some(tray) = &ticket.tray {
            settings.push(format!("bin={tray}"));
        }
        if let Some(pages) = &ticket.pages {
            settings.push(pages.clone());
        }

        let command = CommandSpec::new(self.sumatra_pdf.to_string_lossy());
        let command = match &ticket.printer {
            Some(printer) => command.arg("-print-to").arg(printer),
            None => command.arg("-print-to-default"),
        };
        command
            .arg("-print-settings")
            .arg(settings.join(","))
            .arg("-silent")
            .arg(document.to_string_lossy())
    }
}

/// PowerShell single-quoted literal
fn ps_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn capabilities_script(printer: &str) -> String {
    format!(
        "Add-Type -AssemblyName System.Drawing; \
$printer = New-Object System.Drawing.Printing.PrinterSettings; \
$printer.PrinterName = {name}; \
if ($printer.IsValid) {{ \
Write-Output 'TRAYS_START'; \
$printer.PaperSources | ForEach-Object {{ Write-Output $_.SourceName }}; \
Write-Output 'TRAYS_END'; \
Write-Output ('DUPLEX:' + $printer.CanDuplex); \
Write-Output 'DUPLEX_MODES_START'; \
if ($printer.CanDuplex) {{ Write-Output 'long'; Write-Output 'short' }}; \
Write-Output 'DUPLEX_MODES_END'; \
Write-Output ('COLOR:' + $printer.SupportsColor); \
Write-Output 'PAPER_SIZES_START'; \
$printer.PaperSizes | Select-Object -First {max} | ForEach-Object {{ Write-Output $_.PaperName }}; \
Write-Output 'PAPER_SIZES_END' \
}}",
        name = ps_literal(printer),
        max = MAX_PAPER_SIZES,
    )
}
