//! Cover image storage.
//!
//! One JPEG per work, named `RJ<code>.jpg` under the configured image
//! directory. The extension is always `.jpg` regardless of the actual bytes;
//! nothing here sniffs the image format (the upstream source promises JPEG).

use crate::error::{ErrorKind, Result};
use std::path::PathBuf;
use tokio::fs::{self, File};
use tokio::io::{self, AsyncRead, AsyncWriteExt};

/// Store for per-work cover art.
///
/// Performs no locking: concurrent saves and deletes for the same code race
/// at the filesystem level and the last write wins.
#[derive(Debug, Clone)]
pub struct CoverStore {
    image_dir: PathBuf,
}

impl CoverStore {
    /// Create a store rooted at `image_dir`. The directory is expected to
    /// exist already; it is not created here.
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self { image_dir: image_dir.into() }
    }

    /// Path of the cover image for a work code. `code` is the caller's
    /// six-digit, zero-padded code string; the file name is `RJ{code}.jpg`.
    fn image_path(&self, code: &str) -> PathBuf {
        self.image_dir.join(format!("RJ{code}.jpg"))
    }

    /// Deletes a work's cover image.
    ///
    /// # Errors
    ///
    /// Fails with [`NotFound`](ErrorKind::NotFound) when no cover exists for
    /// the code; any other filesystem failure surfaces as its mapped io
    /// error.
    pub async fn delete(&self, code: &str) -> Result<()> {
        let path = self.image_path(code);
        fs::remove_file(&path).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        tracing::info!(path = %path.display(), "cover image deleted");
        Ok(())
    }

    /// Streams a cover image to disk, overwriting any existing cover for the
    /// code, and returns the number of bytes written. Returns only once the
    /// file is fully flushed.
    ///
    /// # Errors
    ///
    /// Any error from the source stream or the destination file propagates;
    /// a partially written file may be left behind.
    pub async fn save(&self, stream: &mut (impl AsyncRead + Unpin), code: &str) -> Result<u64> {
        let path = self.image_path(code);
        let mut file = File::create(&path).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        let written = io::copy(stream, &mut file).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        file.flush().await.map_err(ErrorKind::Io)?;
        tracing::info!(path = %path.display(), bytes = written, "cover image saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_uses_exact_file_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = CoverStore::new(temp_dir.path());
        let mut source: &[u8] = b"\xff\xd8\xff\xe0 pretend jpeg";
        let written = store.save(&mut source, "123456").await.unwrap();
        let path = temp_dir.path().join("RJ123456.jpg");
        assert_eq!(written, 17);
        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xd8\xff\xe0 pretend jpeg");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_cover() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = CoverStore::new(temp_dir.path());
        let mut first: &[u8] = b"a much longer original image payload";
        store.save(&mut first, "000042").await.unwrap();
        let mut second: &[u8] = b"short";
        store.save(&mut second, "000042").await.unwrap();
        assert_eq!(std::fs::read(temp_dir.path().join("RJ000042.jpg")).unwrap(), b"short");
    }

    #[tokio::test]
    async fn test_delete_then_repeat_delete_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = CoverStore::new(temp_dir.path());
        let mut source: &[u8] = b"data";
        store.save(&mut source, "123456").await.unwrap();
        store.delete("123456").await.unwrap();
        assert!(!temp_dir.path().join("RJ123456.jpg").exists());
        let err = store.delete("123456").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = CoverStore::new(temp_dir.path().join("missing"));
        let mut source: &[u8] = b"data";
        let err = store.save(&mut source, "123456").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }
}
