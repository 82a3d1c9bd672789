use crate::types::{ColorMode, DuplexMode, Orientation, PrintSettings, non_empty};

/// Tray value meaning "let the printer choose"
pub const AUTO_SELECT_TRAY: &str = "Auto-Select";

/// Print settings normalized for the backends: every directive has a
/// concrete value, so nothing is left to driver defaults by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTicket {
    /// `None` prints to the system default printer
    pub printer: Option<String>,
    /// Always at least 1
    pub copies: u32,
    pub duplex: DuplexMode,
    pub color: ColorMode,
    pub orientation: Orientation,
    /// `None` means auto-select
    pub tray: Option<String>,
    /// Page range, passed through verbatim
    pub pages: Option<String>,
    pub media_type: Option<String>,
}

impl JobTicket {
    pub fn from_settings(settings: &PrintSettings) -> Self {
        let tray = non_empty(settings.tray.as_deref())
            .filter(|tray| *tray != AUTO_SELECT_TRAY)
            .map(str::to_string);

        Self {
            printer: non_empty(settings.printer_name.as_deref()).map(str::to_string),
            copies: settings.copies.unwrap_or(1).max(1),
            duplex: settings.duplex.unwrap_or_default(),
            color: settings.color.unwrap_or_default(),
            orientation: Orientation::from_rotation(settings.rotation.unwrap_or(0)),
            tray,
            pages: non_empty(settings.pages.as_deref()).map(str::to_string),
            media_type: non_empty(settings.media_type.as_deref()).map(str::to_string),
        }
    }
}

impl Default for JobTicket {
    fn default() -> Self {
        Self::from_settings(&PrintSettings::default())
    }
}
