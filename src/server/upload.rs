use crate::{Error, Result};
use axum::{body::Bytes, extract::Multipart};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Reads the multipart field called `field_name`, skipping any others.
pub async fn read_field(multipart: &mut Multipart, field_name: &str) -> Result<Option<Upload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(e.body_text()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_input(e.body_text()))?;
        return Ok(Some(Upload { file_name, bytes }));
    }
    Ok(None)
}

pub fn is_allowed_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduces a client-supplied name to a safe single path component.
pub fn secure_filename(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']).to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Writes the upload under `dir` with a unique prefix and returns its path.
pub async fn store(dir: &Path, upload: &Upload) -> Result<PathBuf> {
    let name = secure_filename(&upload.file_name)
        .ok_or_else(|| Error::invalid_input("Invalid file name"))?;
    let path = dir.join(format!("{}_{}", Uuid::new_v4().simple(), name));
    tokio::fs::write(&path, &upload.bytes).await?;
    Ok(path)
}

/// Deletes a stored upload once it has been classified.
pub async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Could not remove upload {}: {}", path.display(), e);
    }
}
