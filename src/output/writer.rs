//! Output directory housekeeping and playlist persistence

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};

/// Owns the output directory: wipes it before a run and writes the playlist
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Delete everything inside the output directory, or create it.
    /// Entries that cannot be removed are logged and skipped.
    pub async fn prepare(&self) -> AppResult<usize> {
        if !fs::try_exists(&self.output_dir)
            .await
            .map_err(|e| AppError::io(&self.output_dir, e))?
        {
            fs::create_dir_all(&self.output_dir)
                .await
                .map_err(|e| AppError::io(&self.output_dir, e))?;
            debug!("Created output directory {}", self.output_dir.display());
            return Ok(0);
        }

        info!("Cleaning up old playlists in {}...", self.output_dir.display());
        let mut entries = fs::read_dir(&self.output_dir)
            .await
            .map_err(|e| AppError::io(&self.output_dir, e))?;

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::io(&self.output_dir, e))?
        {
            let path = entry.path();
            let result = match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => fs::remove_dir_all(&path).await,
                Ok(_) => fs::remove_file(&path).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
            }
        }

        debug!("Removed {} entries from {}", removed, self.output_dir.display());
        Ok(removed)
    }

    /// Write `content` to `filename` inside the output directory, replacing
    /// any existing file. `filename` must be a bare file name.
    pub async fn write(&self, filename: &str, content: &str) -> AppResult<PathBuf> {
        if filename.is_empty() || Path::new(filename).file_name() != Some(OsStr::new(filename)) {
            return Err(AppError::configuration(format!(
                "Output filename '{filename}' must be a plain file name"
            )));
        }

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::io(&self.output_dir, e))?;

        let path = self.output_dir.join(filename);
        fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| AppError::io(&path, e))?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prepare_creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(temp.path().join("playlists"));

        assert_eq!(writer.prepare().await.unwrap(), 0);
        assert!(writer.output_dir().is_dir());
    }

    #[tokio::test]
    async fn test_prepare_wipes_files_and_subdirectories() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("playlists");
        std::fs::create_dir_all(dir.join("old/nested")).unwrap();
        std::fs::write(dir.join("old/nested/a.m3u"), "x").unwrap();
        std::fs::write(dir.join("stale.m3u"), "x").unwrap();

        let writer = OutputWriter::new(&dir);
        assert_eq!(writer.prepare().await.unwrap(), 2);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(temp.path());

        writer.write("out.m3u", "first").await.unwrap();
        let path = writer.write("out.m3u", "second").await.unwrap();

        assert_eq!(path, temp.path().join("out.m3u"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_write_rejects_paths() {
        let temp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(temp.path());

        assert!(writer.write("../escape.m3u", "x").await.is_err());
        assert!(writer.write("sub/dir.m3u", "x").await.is_err());
        assert!(writer.write("", "x").await.is_err());
    }
}
