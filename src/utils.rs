use crate::errors::ForgeError;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::trace;

pub fn normalize_path(path: &str) -> String {
    let path = Path::new(path);
    let normalized_path = path.strip_prefix("./").unwrap_or(path);

    normalized_path.to_string_lossy().replace('\\', "/")
}

pub async fn read_file_content(file_path: &Path) -> Result<String, ForgeError> {
    trace!("Reading {}", file_path.display());
    async_fs::read_to_string(file_path)
        .await
        .map_err(|err| ForgeError::FileReadError(file_path.display().to_string(), err.to_string()))
}

/// Writes `content` to `file_path`, creating missing parent directories.
pub async fn write_file_content(file_path: &Path, content: &str) -> Result<(), ForgeError> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await.map_err(|err| {
            ForgeError::FileWriteError(parent.display().to_string(), err.to_string())
        })?;
    }
    trace!("Writing {} bytes to {}", content.len(), file_path.display());
    async_fs::write(file_path, content)
        .await
        .map_err(|err| ForgeError::FileWriteError(file_path.display().to_string(), err.to_string()))
}
