//! Document I/O for print jobs

use crate::constants::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use crate::types::*;
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document to a fresh temporary file.
///
/// The name carries a millisecond timestamp plus a random suffix, so
/// concurrent jobs never share a path. The returned [`TempPath`] deletes the
/// file when dropped.
pub async fn save_temp_pdf(mut doc: Document, dir: Option<&Path>) -> Result<TempPath> {
    let dir: PathBuf = dir.map(Path::to_owned).unwrap_or_else(std::env::temp_dir);
    let prefix = format!(
        "{}{}_",
        TEMP_FILE_PREFIX,
        chrono::Utc::now().timestamp_millis()
    );

    let temp = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;

        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(&dir)?;
        file.write_all(&writer)?;
        file.flush()?;
        Ok::<_, GeometryError>(file.into_temp_path())
    })
    .await??;

    Ok(temp)
}
