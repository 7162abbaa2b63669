use std::path::{Path, PathBuf};

/// Writes `bytes` to `dir/file_name`, creating `dir` when missing.
pub async fn save_download(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
