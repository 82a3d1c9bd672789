use print_bridge::*;
use std::path::Path;

fn unix() -> Backend {
    Backend::for_platform(Platform::Unix, &BridgeConfig::default())
}

fn windows() -> Backend {
    Backend::for_platform(Platform::Windows, &BridgeConfig::default())
}

fn settings(json: &str) -> PrintSettings {
    PrintSettings::from_json(json).unwrap()
}

#[test]
fn test_ticket_defaults() {
    let ticket = JobTicket::default();

    assert_eq!(ticket.printer, None);
    assert_eq!(ticket.copies, 1);
    assert_eq!(ticket.duplex, DuplexMode::None);
    assert_eq!(ticket.color, ColorMode::Color);
    assert_eq!(ticket.orientation, Orientation::Portrait);
    assert_eq!(ticket.tray, None);
}

#[test]
fn test_ticket_normalizes_settings() {
    let ticket = JobTicket::from_settings(&settings(
        r#"{"printerName":"  ","tray":"Auto-Select","copies":"0","rotation":270,"duplex":"short","color":"gray","pages":"1-3"}"#,
    ));

    assert_eq!(ticket.printer, None);
    assert_eq!(ticket.tray, None);
    assert_eq!(ticket.copies, 1);
    assert_eq!(ticket.orientation, Orientation::Landscape);
    assert_eq!(ticket.duplex, DuplexMode::ShortEdge);
    assert_eq!(ticket.color, ColorMode::Grayscale);
    assert_eq!(ticket.pages.as_deref(), Some("1-3"));
}

#[test]
fn test_only_quarter_turns_print_landscape() {
    for (rotation, expected) in [
        (90, Orientation::Landscape),
        (270, Orientation::Landscape),
        (0, Orientation::Portrait),
        (180, Orientation::Portrait),
        (450, Orientation::Portrait),
        (-90, Orientation::Portrait),
    ] {
        let ticket =
            JobTicket::from_settings(&settings(&format!(r#"{{"rotation":{rotation}}}"#)));
        assert_eq!(ticket.orientation, expected, "rotation {rotation}");
    }
}

#[test]
fn test_fractional_copies_truncate() {
    assert_eq!(settings(r#"{"copies":2.5}"#).copies, Some(2));
    assert_eq!(settings(r#"{"copies":"2.5"}"#).copies, Some(2));
    assert_eq!(settings(r#"{"copies":" 3 "}"#).copies, Some(3));
    assert_eq!(settings(r#"{"copies":"two"}"#).copies, None);
    assert_eq!(JobTicket::from_settings(&settings(r#"{"copies":"0.5"}"#)).copies, 1);
}

#[test]
fn test_simplex_is_explicit_on_both_platforms() {
    let ticket = JobTicket::from_settings(&settings(r#"{"printerName":"Office","duplex":""}"#));
    let doc = Path::new("/tmp/job.pdf");

    let lp = unix().submit_command(doc, &ticket);
    assert!(lp.has_pair("-o", "sides=one-sided"));

    let sumatra = windows().submit_command(doc, &ticket);
    let print_settings = sumatra
        .args
        .iter()
        .skip_while(|a| *a != "-print-settings")
        .nth(1)
        .unwrap();
    assert!(print_settings.split(',').any(|s| s == "simplex"));
}

#[test]
fn test_lp_command() {
    let ticket = JobTicket::from_settings(&settings(
        r#"{"printerName":"Office_Laser","tray":"Tray2","copies":3,"rotation":90,"duplex":"long","color":"gray","mediaType":"Cardstock","pages":"2-4"}"#,
    ));
    let command = unix().submit_command(Path::new("/tmp/job.pdf"), &ticket);

    assert_eq!(command.program, "lp");
    assert!(command.has_pair("-d", "Office_Laser"));
    assert!(command.has_pair("-n", "3"));
    assert!(command.has_pair("-P", "2-4"));
    assert!(command.has_pair("-o", "InputSlot=Tray2"));
    assert!(command.has_pair("-o", "sides=two-sided-long-edge"));
    assert!(command.has_pair("-o", "Duplex=DuplexNoTumble"));
    assert!(command.has_pair("-o", "ColorModel=Gray"));
    assert!(command.has_pair("-o", "print-color-mode=monochrome"));
    assert!(command.has_pair("-o", "MediaType=Cardstock"));
    assert!(command.has_pair("-o", "fit-to-page=false"));
    assert!(command.has_pair("-o", "orientation-requested=4"));
    assert_eq!(command.args.last().map(String::as_str), Some("/tmp/job.pdf"));
}

#[test]
fn test_lp_short_edge_and_default_printer() {
    let ticket = JobTicket::from_settings(&settings(r#"{"duplex":"short"}"#));
    let command = unix().submit_command(Path::new("job.pdf"), &ticket);

    assert!(!command.args.iter().any(|a| a == "-d"));
    assert!(command.has_pair("-o", "sides=two-sided-short-edge"));
    assert!(command.has_pair("-o", "Duplex=DuplexTumble"));
    assert!(command.has_pair("-o", "print-color-mode=color"));
    assert!(command.has_pair("-o", "orientation-requested=3"));
}

#[test]
fn test_auto_select_tray_is_omitted() {
    let ticket = JobTicket::from_settings(&settings(r#"{"tray":"Auto-Select"}"#));

    let lp = unix().submit_command(Path::new("job.pdf"), &ticket);
    assert!(!lp.args.iter().any(|a| a.starts_with("InputSlot=")));

    let sumatra = windows().submit_command(Path::new("job.pdf"), &ticket);
    assert!(!sumatra.args.iter().any(|a| a.contains("bin=")));
}

#[test]
fn test_sumatra_command() {
    let ticket = JobTicket::from_settings(&settings(
        r#"{"printerName":"Office Laser","tray":"Tray 2","copies":2,"rotation":90,"duplex":"short","color":"gray","pages":"1-2"}"#,
    ));
    let command = windows().submit_command(Path::new(r"C:\Temp\job.pdf"), &ticket);

    assert_eq!(command.program, "SumatraPDF.exe");
    assert!(command.has_pair("-print-to", "Office Laser"));
    assert!(command.has_pair(
        "-print-settings",
        "duplexshort,monochrome,landscape,noscale,2x,bin=Tray 2,1-2"
    ));
    assert!(command.args.iter().any(|a| a == "-silent"));
    assert_eq!(
        command.args.last().map(String::as_str),
        Some(r"C:\Temp\job.pdf")
    );
}

#[test]
fn test_sumatra_default_printer() {
    let command = windows().submit_command(Path::new("job.pdf"), &JobTicket::default());

    assert!(command.args.iter().any(|a| a == "-print-to-default"));
    assert!(command.has_pair("-print-settings", "simplex,color,portrait,noscale,1x"));
}

#[test]
fn test_configured_programs_are_used() {
    let config = BridgeConfig {
        lp: "/usr/local/bin/lp".to_string(),
        sumatra_pdf: r"C:\Tools\SumatraPDF.exe".into(),
        ..BridgeConfig::default()
    };

    let lp = Backend::for_platform(Platform::Unix, &config)
        .submit_command(Path::new("job.pdf"), &JobTicket::default());
    assert_eq!(lp.program, "/usr/local/bin/lp");

    let sumatra = Backend::for_platform(Platform::Windows, &config)
        .submit_command(Path::new("job.pdf"), &JobTicket::default());
    assert_eq!(sumatra.program, r"C:\Tools\SumatraPDF.exe");
}
