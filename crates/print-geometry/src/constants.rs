//! Shared constants for print geometry
//!
//! This module centralizes the unit conversion and the defaults used when a
//! page carries no usable MediaBox.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter. Fixed at five decimals so that crop boxes are
/// reproducible across runs and platforms.
pub const POINTS_PER_MM: f32 = 2.83465;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Temporary Files
// =============================================================================

/// File name prefix for rewritten documents handed to the printer
pub const TEMP_FILE_PREFIX: &str = "print_job_";

/// File name suffix for rewritten documents
pub const TEMP_FILE_SUFFIX: &str = ".pdf";

/// Page boxes that receive the computed crop region
pub const MIRRORED_BOXES: [&str; 3] = ["CropBox", "TrimBox", "BleedBox"];
