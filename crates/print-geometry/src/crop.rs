//! Crop box computation and page-box rewriting

use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT, MIRRORED_BOXES};
use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Page trees nested deeper than this are treated as malformed
const MAX_PAGE_TREE_DEPTH: usize = 64;

// =============================================================================
// Box Computation
// =============================================================================

/// Compute the crop region for a page of the given size (points).
///
/// The origin is shifted by the left/bottom margins plus the offset and
/// clamped at zero; the size shrinks by the margin sums and is clamped so the
/// box never leaves the page. Returns `None` when the result would have a
/// non-positive width or height, in which case the page must be left alone.
pub fn compute_crop_box(page_width: f32, page_height: f32, spec: &CropSpec) -> Option<PageBox> {
    let (top, right, bottom, left, offset_x, offset_y) = spec.to_points();

    let x = (left + offset_x).max(0.0);
    let y = (bottom + offset_y).max(0.0);
    let width = (page_width - left - right).min(page_width - x);
    let height = (page_height - top - bottom).min(page_height - y);

    if width > 0.0 && height > 0.0 {
        Some(PageBox {
            x,
            y,
            width,
            height,
        })
    } else {
        None
    }
}

// =============================================================================
// Document Rewriting
// =============================================================================

/// Apply the crop spec to every page of `doc`.
///
/// Returns the number of pages whose boxes were rewritten. Pages whose crop
/// region would be empty keep their original boxes.
pub fn apply_crop_to_document(doc: &mut Document, spec: &CropSpec) -> Result<usize> {
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let mut modified = 0;

    for (index, page_id) in page_ids.into_iter().enumerate() {
        let [llx, lly, urx, ury] = page_media_box(doc, page_id)?;
        let Some(crop) = compute_crop_box(urx - llx, ury - lly, spec) else {
            log::debug!(
                "Page {} left unmodified: margins leave no printable area",
                index + 1
            );
            continue;
        };

        let rect = Object::Array(vec![
            Object::Real(llx + crop.x),
            Object::Real(lly + crop.y),
            Object::Real(llx + crop.right()),
            Object::Real(lly + crop.top()),
        ]);

        let page = doc.get_dictionary_mut(page_id)?;
        for key in MIRRORED_BOXES {
            page.set(key, rect.clone());
        }
        modified += 1;
    }

    Ok(modified)
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get the MediaBox of a page as `[llx, lly, urx, ury]` in points.
///
/// MediaBox is inheritable, so the page tree is walked upwards until one is
/// found. Falls back to US Letter when no ancestor defines it.
pub fn page_media_box(doc: &Document, page_id: ObjectId) -> Result<[f32; 4]> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(obj) = node.get(b"MediaBox") {
            if let Some(rect) = extract_rect(doc, obj) {
                return Ok(rect);
            }
        }

        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => node = doc.get_dictionary(parent_id)?,
            Err(_) => break,
        }
    }

    Ok([0.0, 0.0, DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT])
}

/// Read a rectangle, following a reference if needed, normalized so the
/// lower-left corner comes first.
fn extract_rect(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = obj.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }

    let x0 = extract_number(&arr[0])?;
    let y0 = extract_number(&arr[1])?;
    let x1 = extract_number(&arr[2])?;
    let y1 = extract_number(&arr[3])?;

    Some([x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)])
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
