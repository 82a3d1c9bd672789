//! Parsers for printer-query output.
//!
//! Nothing in here fails: malformed input yields the best partial structure
//! that could be recovered.

use crate::types::{Capabilities, ColorMode, DuplexMode, Printer, PrinterStatus};

/// Upper bound on reported paper sizes, to keep descriptors small
pub const MAX_PAPER_SIZES: usize = 20;

const TRAYS_START: &str = "TRAYS_START";
const TRAYS_END: &str = "TRAYS_END";
const DUPLEX_MODES_START: &str = "DUPLEX_MODES_START";
const DUPLEX_MODES_END: &str = "DUPLEX_MODES_END";
const PAPER_SIZES_START: &str = "PAPER_SIZES_START";
const PAPER_SIZES_END: &str = "PAPER_SIZES_END";
const DUPLEX_PREFIX: &str = "DUPLEX:";
const COLOR_PREFIX: &str = "COLOR:";

/// Split shell output into trimmed, non-empty lines with the BOM and
/// carriage returns removed.
pub fn clean_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.trim_start_matches('\u{feff}')
        .lines()
        .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
        .filter(|line| !line.is_empty())
}

// =============================================================================
// Capability Descriptors
// =============================================================================

/// Parse either shape of capability output: sentinel sections or an option
/// listing.
pub fn parse_capabilities(raw: &str) -> Capabilities {
    let sectioned = clean_lines(raw).any(|line| {
        line.ends_with("_START") || line.starts_with(DUPLEX_PREFIX) || line.starts_with(COLOR_PREFIX)
    });

    if sectioned {
        parse_sectioned(raw)
    } else {
        capabilities_from_options(&parse_option_listing(raw))
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Trays,
    DuplexModes,
    PaperSizes,
}

/// Parse sentinel-delimited output:
///
/// ```text
/// TRAYS_START
/// Tray 1
/// TRAYS_END
/// DUPLEX:True
/// DUPLEX_MODES_START
/// long
/// DUPLEX_MODES_END
/// COLOR:False
/// PAPER_SIZES_START
/// A4
/// PAPER_SIZES_END
/// ```
///
/// Lines outside a section are ignored; a missing section is empty.
pub fn parse_sectioned(raw: &str) -> Capabilities {
    let mut caps = Capabilities::default();
    let mut section = Section::None;

    for line in clean_lines(raw) {
        match line {
            TRAYS_START => section = Section::Trays,
            DUPLEX_MODES_START => section = Section::DuplexModes,
            PAPER_SIZES_START => section = Section::PaperSizes,
            TRAYS_END | DUPLEX_MODES_END | PAPER_SIZES_END => section = Section::None,
            _ if line.starts_with(DUPLEX_PREFIX) => {
                caps.can_duplex = parse_bool(&line[DUPLEX_PREFIX.len()..]);
            }
            _ if line.starts_with(COLOR_PREFIX) => {
                caps.supports_color = parse_bool(&line[COLOR_PREFIX.len()..]);
            }
            _ => match section {
                Section::None => {}
                Section::Trays => push_unique(&mut caps.trays, line),
                Section::DuplexModes => {
                    if let Some(mode) = DuplexMode::from_keyword(line) {
                        if mode != DuplexMode::None && !caps.duplex_modes.contains(&mode) {
                            caps.duplex_modes.push(mode);
                        }
                    }
                }
                Section::PaperSizes => {
                    if caps.paper_sizes.len() < MAX_PAPER_SIZES {
                        push_unique(&mut caps.paper_sizes, line);
                    }
                }
            },
        }
    }

    caps
}

fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// One entry of a CUPS option listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOption {
    pub key: String,
    pub choices: Vec<String>,
}

impl PrinterOption {
    fn key_is(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.key.eq_ignore_ascii_case(n))
    }
}

/// Parse `key/Label: *Default Other ...` lines as printed by
/// `lpoptions -l`. Lines without a colon are skipped.
pub fn parse_option_listing(raw: &str) -> Vec<PrinterOption> {
    clean_lines(raw)
        .filter_map(|line| {
            let (head, rest) = line.split_once(':')?;
            let key = head.split_once('/').map_or(head, |(key, _)| key).trim();
            if key.is_empty() {
                return None;
            }

            let mut choices = Vec::new();
            for token in rest.split_whitespace() {
                let choice = token.trim_start_matches('*');
                if !choice.is_empty() {
                    push_unique(&mut choices, choice);
                }
            }

            Some(PrinterOption {
                key: key.to_string(),
                choices,
            })
        })
        .collect()
}

/// Whether an option listing advertises two-sided printing
pub fn options_support_duplex(options: &[PrinterOption]) -> bool {
    options.iter().any(is_duplex_option)
}

fn is_duplex_option(option: &PrinterOption) -> bool {
    option.key_is(&["sides"]) || option.key.to_ascii_lowercase().ends_with("duplex")
}

fn is_color_choice(choice: &str) -> bool {
    let lower = choice.to_ascii_lowercase();
    ColorMode::from_keyword(&lower) == ColorMode::Color
        && ["color", "colour", "cmyk", "cmy", "rgb"]
            .iter()
            .any(|k| lower.contains(k))
}

/// Derive a capability descriptor from a CUPS option listing
pub fn capabilities_from_options(options: &[PrinterOption]) -> Capabilities {
    let mut caps = Capabilities::default();

    for option in options {
        if option.key_is(&["InputSlot", "MediaSource"]) {
            for choice in &option.choices {
                push_unique(&mut caps.trays, choice);
            }
        } else if is_duplex_option(option) {
            caps.can_duplex = true;
            for choice in &option.choices {
                match DuplexMode::from_keyword(choice) {
                    Some(mode) if mode != DuplexMode::None && !caps.duplex_modes.contains(&mode) => {
                        caps.duplex_modes.push(mode)
                    }
                    _ => {}
                }
            }
        } else if option.key_is(&["ColorModel", "ColorMode", "print-color-mode"]) {
            if option.choices.iter().any(|c| is_color_choice(c)) {
                caps.supports_color = true;
            }
        } else if option.key_is(&["PageSize", "media"]) {
            for choice in &option.choices {
                if caps.paper_sizes.len() >= MAX_PAPER_SIZES {
                    break;
                }
                push_unique(&mut caps.paper_sizes, choice);
            }
        }
    }

    caps
}

// =============================================================================
// Printer Listings
// =============================================================================

/// Parse `ConvertTo-Csv` output of the printer query.
///
/// Columns are located by header (`Name`, `PrinterStatus`/`Status`,
/// `CanDuplex`); without a header row the first three columns are assumed in
/// that order. Rows missing a name or status are skipped. No filtering by
/// status happens here.
pub fn parse_printer_csv(raw: &str) -> Vec<Printer> {
    let cleaned: String = clean_lines(raw).collect::<Vec<_>>().join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(cleaned.as_bytes());

    let mut name_col = 0;
    let mut status_col = 1;
    let mut duplex_col = Some(2);
    let mut printers = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let Ok(record) = record else {
            continue;
        };

        if index == 0 && record.iter().any(|field| field == "Name") {
            let find = |names: &[&str]| {
                record
                    .iter()
                    .position(|field| names.iter().any(|n| field.eq_ignore_ascii_case(n)))
            };
            name_col = find(&["Name"]).unwrap_or(0);
            status_col = find(&["PrinterStatus", "Status"]).unwrap_or(1);
            duplex_col = find(&["CanDuplex", "Duplex"]);
            continue;
        }

        let (Some(name), Some(status)) = (record.get(name_col), record.get(status_col)) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let duplex_supported = duplex_col
            .and_then(|col| record.get(col))
            .map(parse_bool)
            .unwrap_or(false);

        printers.push(Printer {
            name: name.to_string(),
            status: PrinterStatus::from_os_status(status),
            status_detail: status.to_string(),
            duplex_supported,
        });
    }

    printers
}

/// Parse `lpstat -p` output (C locale):
///
/// ```text
/// printer Office_Laser is idle.  enabled since Mon 01 Jan 2024
/// printer Label_Printer disabled since Mon 01 Jan 2024 -
/// ```
///
/// Disabled or offline queues are reported with [`PrinterStatus::Offline`].
/// Duplex support is not part of this listing and is left `false`.
pub fn parse_lpstat_printers(raw: &str) -> Vec<Printer> {
    clean_lines(raw)
        .filter_map(|line| {
            let rest = line.strip_prefix("printer ")?;
            let mut parts = rest.splitn(2, char::is_whitespace);
            let name = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            let remainder = parts.next().unwrap_or("").trim();
            let detail = remainder.strip_prefix("is ").unwrap_or(remainder);
            let detail = detail.split('.').next().unwrap_or("").trim();

            let status = if remainder.contains("disabled") || remainder.contains("offline") {
                PrinterStatus::Offline
            } else {
                PrinterStatus::Ready
            };

            Some(Printer {
                name: name.to_string(),
                status,
                status_detail: detail.to_string(),
                duplex_supported: false,
            })
        })
        .collect()
}

/// Parse `lpstat -d` output (`system default destination: NAME`)
pub fn parse_lpstat_default(raw: &str) -> Option<String> {
    clean_lines(raw).find_map(|line| {
        let (_, name) = line.split_once("system default destination:")?;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// First non-empty line, used for single-value queries
pub fn parse_single_value(raw: &str) -> Option<String> {
    clean_lines(raw).next().map(str::to_string)
}
