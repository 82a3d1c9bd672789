use crate::constants::mm_to_pt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Physical margins of a paper product, in millimeters.
///
/// Serialized with the short `top`/`right`/`bottom`/`left` keys used by
/// product catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    #[cfg_attr(feature = "serde", serde(rename = "top", default))]
    pub top_mm: f32,
    #[cfg_attr(feature = "serde", serde(rename = "right", default))]
    pub right_mm: f32,
    #[cfg_attr(feature = "serde", serde(rename = "bottom", default))]
    pub bottom_mm: f32,
    #[cfg_attr(feature = "serde", serde(rename = "left", default))]
    pub left_mm: f32,
}

impl Margins {
    /// No margins on any side
    pub const fn zero() -> Self {
        Self {
            top_mm: 0.0,
            right_mm: 0.0,
            bottom_mm: 0.0,
            left_mm: 0.0,
        }
    }

    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            right_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
        }
    }
}

/// Edge compensation: shifts the crop window (not the content) to correct
/// mechanical paper-feed skew. Millimeters; positive values move right/up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x_mm: f32,
    pub y_mm: f32,
}

impl Offset {
    pub fn new(x_mm: f32, y_mm: f32) -> Self {
        Self { x_mm, y_mm }
    }
}

/// Everything the transformer needs for one print job
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropSpec {
    pub margins: Margins,
    pub offset: Offset,
}

impl CropSpec {
    pub fn new(margins: Margins, offset: Offset) -> Self {
        Self { margins, offset }
    }

    /// Margins and offset converted to points, in the order
    /// `(top, right, bottom, left, offset_x, offset_y)`.
    pub(crate) fn to_points(self) -> (f32, f32, f32, f32, f32, f32) {
        (
            mm_to_pt(self.margins.top_mm),
            mm_to_pt(self.margins.right_mm),
            mm_to_pt(self.margins.bottom_mm),
            mm_to_pt(self.margins.left_mm),
            mm_to_pt(self.offset.x_mm),
            mm_to_pt(self.offset.y_mm),
        )
    }
}

/// A page boundary box in points, relative to the MediaBox origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageBox {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}
