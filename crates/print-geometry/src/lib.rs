//! Page-geometry adjustment for print jobs.
//!
//! Margins and feed-edge offsets are applied by rewriting each page's
//! crop/trim/bleed boxes. Content is never scaled.

pub mod constants;
mod crop;
mod io;
mod transform;
mod types;

pub use crop::{apply_crop_to_document, compute_crop_box, page_media_box};
pub use io::{load_pdf, save_temp_pdf};
pub use transform::{TransformResult, apply_margins};
pub use types::*;
