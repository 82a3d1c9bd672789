//! Margin and offset compensation for a document on disk

use crate::crop::apply_crop_to_document;
use crate::io::{load_pdf, save_temp_pdf};
use crate::types::*;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Outcome of [`apply_margins`]: the document to print, and the temporary
/// artifact backing it when the source had to be rewritten.
#[derive(Debug)]
pub struct TransformResult {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl TransformResult {
    /// The document that should be sent to the printer
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a rewritten temporary copy was produced
    pub fn is_rewritten(&self) -> bool {
        self.temp.is_some()
    }

    /// Delete the temporary artifact, if any.
    ///
    /// Dropping the result also removes the file; this variant reports the
    /// error instead of swallowing it.
    pub fn cleanup(self) -> std::io::Result<()> {
        match self.temp {
            Some(temp) => temp.close(),
            None => Ok(()),
        }
    }
}

/// Crop every page of `source` according to `spec`.
///
/// When at least one page changed, the rewritten document is written to a
/// temporary file (in `temp_dir`, or the OS temp dir) and its path returned;
/// otherwise the source path is returned untouched. Any load, parse or write
/// failure is returned as an error: callers must not print unverified
/// geometry.
pub async fn apply_margins(
    source: impl AsRef<Path>,
    spec: &CropSpec,
    temp_dir: Option<&Path>,
) -> Result<TransformResult> {
    let source = source.as_ref().to_owned();
    let mut doc = load_pdf(&source).await?;

    let spec = *spec;
    let (doc, modified) = tokio::task::spawn_blocking(move || {
        let modified = apply_crop_to_document(&mut doc, &spec)?;
        Ok::<_, GeometryError>((doc, modified))
    })
    .await??;

    if modified == 0 {
        log::debug!("No pages cropped, printing {} as-is", source.display());
        return Ok(TransformResult {
            path: source,
            temp: None,
        });
    }

    let temp = save_temp_pdf(doc, temp_dir).await?;
    log::info!(
        "Cropped {} page(s) of {} into {}",
        modified,
        source.display(),
        temp.display()
    );

    Ok(TransformResult {
        path: temp.to_path_buf(),
        temp: Some(temp),
    })
}
