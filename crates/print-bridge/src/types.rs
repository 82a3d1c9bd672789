use print_geometry::Margins;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operating-system family, detected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Printer availability as reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterStatus {
    #[default]
    Ready,
    Offline,
    Error,
}

impl PrinterStatus {
    /// Classify a raw spooler status (`Normal`, `Offline`, `7`, ...).
    /// Anything that is not explicitly offline or in error counts as ready.
    pub fn from_os_status(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "offline" | "7" => PrinterStatus::Offline,
            "error" => PrinterStatus::Error,
            _ => PrinterStatus::Ready,
        }
    }

    pub fn is_available(self) -> bool {
        self == PrinterStatus::Ready
    }
}

/// A printer snapshot. Never cached: every listing queries the OS again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    pub name: String,
    pub status: PrinterStatus,
    /// Raw status text from the OS, kept for display
    #[serde(default)]
    pub status_detail: String,
    pub duplex_supported: bool,
}

/// What a printer can do. `Default` is the "nothing known" descriptor used
/// whenever discovery fails.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub trays: Vec<String>,
    pub can_duplex: bool,
    pub duplex_modes: Vec<DuplexMode>,
    pub supports_color: bool,
    pub paper_sizes: Vec<String>,
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Exactly 90 or 270 prints landscape; every other value portrait
    pub fn from_rotation(degrees: i32) -> Self {
        match degrees {
            90 | 270 => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }

    pub fn rotation(self) -> i32 {
        match self {
            Orientation::Portrait => 0,
            Orientation::Landscape => 90,
        }
    }
}

/// Two-sided printing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DuplexMode {
    /// One-sided. Always sent explicitly, never left to the driver default.
    #[default]
    None,
    /// Bound on the long edge (`DuplexNoTumble`)
    LongEdge,
    /// Bound on the short edge (`DuplexTumble`)
    ShortEdge,
}

impl DuplexMode {
    /// Parse settings values and driver keywords alike.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" | "simplex" | "one-sided" => Some(DuplexMode::None),
            "long" | "long-edge" | "longedge" | "duplexlong" | "duplexnotumble"
            | "two-sided-long-edge" => Some(DuplexMode::LongEdge),
            "short" | "short-edge" | "shortedge" | "duplexshort" | "duplextumble"
            | "two-sided-short-edge" => Some(DuplexMode::ShortEdge),
            _ => None,
        }
    }

    /// Value used in settings payloads and capability descriptors
    pub fn as_str(self) -> &'static str {
        match self {
            DuplexMode::None => "",
            DuplexMode::LongEdge => "long",
            DuplexMode::ShortEdge => "short",
        }
    }
}

impl Serialize for DuplexMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DuplexMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DuplexMode::from_keyword(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(&s, &["", "none", "long", "short"])
        })
    }
}

/// Color mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Color,
    Grayscale,
}

impl ColorMode {
    /// Gray-ish keywords select grayscale; everything else is color.
    pub fn from_keyword(keyword: &str) -> Self {
        let lower = keyword.trim().to_ascii_lowercase();
        if lower.contains("gray")
            || lower.contains("grey")
            || lower.contains("mono")
            || lower.contains("black")
            || lower == "bw"
        {
            ColorMode::Grayscale
        } else {
            ColorMode::Color
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Color => "color",
            ColorMode::Grayscale => "gray",
        }
    }
}

impl Serialize for ColorMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ColorMode::from_keyword(&s))
    }
}

/// A configured paper product. Owned by the product catalog; treated as an
/// immutable input by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaperProduct {
    /// Catalog key, filled in when the catalog is loaded
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub display_name: String,
    pub width: f32,
    pub height: f32,
    pub orientation: Orientation,
    pub printer_name: String,
    pub tray: String,
    pub media_type: String,
    #[serde(deserialize_with = "lenient_copies")]
    pub copies: Option<u32>,
    pub duplex: DuplexMode,
    pub color: ColorMode,
    pub offset_x: f32,
    pub offset_y: f32,
    pub custom_margins: Option<Margins>,
    pub is_custom: bool,
}

impl Default for PaperProduct {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            width: 0.0,
            height: 0.0,
            orientation: Orientation::Portrait,
            printer_name: String::new(),
            tray: String::new(),
            media_type: String::new(),
            copies: None,
            duplex: DuplexMode::None,
            color: ColorMode::Color,
            offset_x: 0.0,
            offset_y: 0.0,
            custom_margins: None,
            is_custom: false,
        }
    }
}

impl PaperProduct {
    /// Name shown to the operator: the display name, or the key with
    /// underscores turned into spaces.
    pub fn label(&self) -> String {
        if self.display_name.is_empty() {
            self.id.replace('_', " ")
        } else {
            self.display_name.clone()
        }
    }

    /// Margins used for cropping: the custom margins, or none
    pub fn margins(&self) -> Margins {
        self.custom_margins.unwrap_or(Margins::zero())
    }
}

/// One print request. Every field is optional; absent fields fall back to
/// the referenced product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintSettings {
    pub printer_name: Option<String>,
    pub tray: Option<String>,
    #[serde(deserialize_with = "lenient_copies")]
    pub copies: Option<u32>,
    pub rotation: Option<i32>,
    pub duplex: Option<DuplexMode>,
    pub color: Option<ColorMode>,
    pub media_type: Option<String>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub product_key: Option<String>,
    pub pages: Option<String>,
}

impl PrintSettings {
    /// Parse a settings payload
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The product key, ignoring blanks
    pub fn product_key(&self) -> Option<&str> {
        non_empty(self.product_key.as_deref())
    }

    /// Fill every absent field from `product`. Explicit settings win.
    pub fn with_product_defaults(mut self, product: &PaperProduct) -> Self {
        fill_text(&mut self.printer_name, &product.printer_name);
        fill_text(&mut self.tray, &product.tray);
        fill_text(&mut self.media_type, &product.media_type);
        self.copies = self.copies.or(product.copies);
        self.rotation = self.rotation.or(Some(product.orientation.rotation()));
        self.duplex = self.duplex.or(Some(product.duplex));
        self.color = self.color.or(Some(product.color));
        self.offset_x = self.offset_x.or(Some(product.offset_x));
        self.offset_y = self.offset_y.or(Some(product.offset_y));
        self
    }
}

/// Result of a print request as reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PrintOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn fill_text(slot: &mut Option<String>, fallback: &str) {
    if slot.is_none() && !fallback.trim().is_empty() {
        *slot = Some(fallback.to_string());
    }
}

/// Copies arrive as numbers or numeric strings; fractions truncate either
/// way. Anything else (including zero and negatives) is treated as absent.
fn lenient_copies<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let copies = match value {
        serde_json::Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        _ => None,
    };
    Ok(copies
        .filter(|&c| c > 0)
        .and_then(|c| u32::try_from(c).ok()))
}
