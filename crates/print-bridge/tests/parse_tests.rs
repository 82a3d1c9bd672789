use print_bridge::parse::*;
use print_bridge::{DuplexMode, PrinterStatus};

const SECTIONED: &str = "\u{feff}TRAYS_START\r\n\
Tray 1\r\n\
Tray 2\r\n\
Tray 1\r\n\
TRAYS_END\r\n\
DUPLEX:True\r\n\
DUPLEX_MODES_START\r\n\
long\r\n\
short\r\n\
DUPLEX_MODES_END\r\n\
COLOR:False\r\n\
PAPER_SIZES_START\r\n\
A4\r\n\
Letter\r\n\
PAPER_SIZES_END\r\n";

#[test]
fn test_sectioned_capabilities() {
    let caps = parse_capabilities(SECTIONED);

    assert_eq!(caps.trays, vec!["Tray 1", "Tray 2"]);
    assert!(caps.can_duplex);
    assert_eq!(
        caps.duplex_modes,
        vec![DuplexMode::LongEdge, DuplexMode::ShortEdge]
    );
    assert!(!caps.supports_color);
    assert_eq!(caps.paper_sizes, vec!["A4", "Letter"]);
}

#[test]
fn test_sectioned_missing_sections_are_empty() {
    let caps = parse_sectioned("DUPLEX:False\nCOLOR:True\n");

    assert!(caps.trays.is_empty());
    assert!(caps.paper_sizes.is_empty());
    assert!(caps.duplex_modes.is_empty());
    assert!(!caps.can_duplex);
    assert!(caps.supports_color);
}

#[test]
fn test_sectioned_paper_sizes_are_capped() {
    let mut raw = String::from("PAPER_SIZES_START\n");
    for i in 0..35 {
        raw.push_str(&format!("Size {i}\n"));
    }
    raw.push_str("PAPER_SIZES_END\n");

    let caps = parse_sectioned(&raw);
    assert_eq!(caps.paper_sizes.len(), MAX_PAPER_SIZES);
    assert_eq!(caps.paper_sizes[0], "Size 0");
}

#[test]
fn test_garbage_yields_empty_descriptor() {
    let caps = parse_capabilities("Exception calling \"PrinterName\"\n   at line 1\n");
    assert!(caps.trays.is_empty());
    assert!(!caps.can_duplex);
    assert!(!caps.supports_color);
}

const LPOPTIONS: &str = "PageSize/Media Size: Letter *A4 Legal\n\
InputSlot/Media Source: *Auto Tray1 Tray2 Manual\n\
Duplex/2-Sided Printing: *None DuplexNoTumble DuplexTumble\n\
ColorModel/Color Mode: Gray *CMYK\n\
cupsPrintQuality/Quality: Draft *Normal High\n";

#[test]
fn test_option_listing() {
    let options = parse_option_listing(LPOPTIONS);

    assert_eq!(options.len(), 5);
    let slot = &options[1];
    assert_eq!(slot.key, "InputSlot");
    assert_eq!(slot.choices, vec!["Auto", "Tray1", "Tray2", "Manual"]);
}

#[test]
fn test_capabilities_from_option_listing() {
    let caps = parse_capabilities(LPOPTIONS);

    assert_eq!(caps.trays, vec!["Auto", "Tray1", "Tray2", "Manual"]);
    assert!(caps.can_duplex);
    assert_eq!(
        caps.duplex_modes,
        vec![DuplexMode::LongEdge, DuplexMode::ShortEdge]
    );
    assert!(caps.supports_color);
    assert_eq!(caps.paper_sizes, vec!["Letter", "A4", "Legal"]);
}

#[test]
fn test_grayscale_only_printer_has_no_color() {
    let caps = parse_capabilities("ColorModel/Color Mode: *Gray\nsides/2-Sided: *one-sided two-sided-long-edge\n");

    assert!(!caps.supports_color);
    assert!(caps.can_duplex);
    assert_eq!(caps.duplex_modes, vec![DuplexMode::LongEdge]);
}

#[test]
fn test_duplex_probe() {
    assert!(options_support_duplex(&parse_option_listing(LPOPTIONS)));
    assert!(options_support_duplex(&parse_option_listing(
        "sides/Two-Sided: *one-sided two-sided-long-edge\n"
    )));
    assert!(!options_support_duplex(&parse_option_listing(
        "PageSize/Media Size: *A4\n"
    )));
}

#[test]
fn test_printer_csv_with_header() {
    let raw = "\u{feff}\"Name\",\"PrinterStatus\",\"CanDuplex\"\r\n\
\"Office Laser\",\"Normal\",\"True\"\r\n\
\"Plotter, Large\",\"Offline\",\"False\"\r\n\
\"Old Inkjet\",\"7\",\"False\"\r\n\
\"Label Printer\",\"Error\",\"False\"\r\n";

    let printers = parse_printer_csv(raw);
    assert_eq!(printers.len(), 4);

    assert_eq!(printers[0].name, "Office Laser");
    assert_eq!(printers[0].status, PrinterStatus::Ready);
    assert!(printers[0].duplex_supported);

    assert_eq!(printers[1].name, "Plotter, Large");
    assert_eq!(printers[1].status, PrinterStatus::Offline);
    assert_eq!(printers[2].status, PrinterStatus::Offline);
    assert_eq!(printers[3].status, PrinterStatus::Error);
}

#[test]
fn test_printer_csv_reordered_columns() {
    let raw = "\"CanDuplex\",\"Name\",\"PrinterStatus\"\n\"False\",\"Front Desk\",\"Normal\"\n";

    let printers = parse_printer_csv(raw);
    assert_eq!(printers.len(), 1);
    assert_eq!(printers[0].name, "Front Desk");
    assert!(!printers[0].duplex_supported);
}

#[test]
fn test_printer_csv_skips_incomplete_rows() {
    let raw = "\"Name\",\"PrinterStatus\"\n\"Only Name\"\n\"\",\"Normal\"\n\"Good\",\"Normal\"\n";

    let printers = parse_printer_csv(raw);
    assert_eq!(printers.len(), 1);
    assert_eq!(printers[0].name, "Good");
}

#[test]
fn test_lpstat_printers() {
    let raw = "printer Office_Laser is idle.  enabled since Mon 01 Jan 2024 09:00:00 AM\n\
printer Label_Printer disabled since Mon 01 Jan 2024 09:00:00 AM -\n\
\treason unknown\n\
printer Photo now printing Photo-12.  enabled since Tue 02 Jan 2024\n";

    let printers = parse_lpstat_printers(raw);
    assert_eq!(printers.len(), 3);

    assert_eq!(printers[0].name, "Office_Laser");
    assert_eq!(printers[0].status, PrinterStatus::Ready);
    assert_eq!(printers[0].status_detail, "idle");

    assert_eq!(printers[1].name, "Label_Printer");
    assert_eq!(printers[1].status, PrinterStatus::Offline);

    assert_eq!(printers[2].name, "Photo");
    assert_eq!(printers[2].status, PrinterStatus::Ready);
}

#[test]
fn test_disabled_in_printer_name_is_not_a_status() {
    let printers = parse_lpstat_printers("printer disabled_queue is idle.  enabled since today\n");
    assert_eq!(printers[0].status, PrinterStatus::Ready);
}

#[test]
fn test_lpstat_default() {
    assert_eq!(
        parse_lpstat_default("system default destination: Office_Laser\n"),
        Some("Office_Laser".to_string())
    );
    assert_eq!(parse_lpstat_default("no system default destination\n"), None);
}

#[test]
fn test_single_value() {
    assert_eq!(
        parse_single_value("\u{feff}\r\n  Office Laser  \r\n"),
        Some("Office Laser".to_string())
    );
    assert_eq!(parse_single_value("\r\n\r\n"), None);
}
