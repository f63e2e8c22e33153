//! Saving rendered forms to disk.
//!
//! The artifact is written to a temporary file next to the destination and
//! persisted with a rename, so a failed save never leaves a truncated PDF
//! behind. The temporary file is removed on every failure path.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;

use crate::assembler::{FormAssembler, RenderedForm};
use crate::backend::DocumentBackend;
use crate::elements::FormDocument;
use crate::error::{download_failure_message, Error, Result};
use crate::progress::RenderReporter;

/// File name used when the destination is a directory.
pub const DEFAULT_FILE_NAME: &str = "fillable_form.pdf";

/// Render `document` and save it at `destination`.
///
/// `destination` may be a file path or an existing directory, in which
/// case [`DEFAULT_FILE_NAME`] is used inside it. Any failure, whether in
/// rendering or writing, is published to `reporter` as a download failure
/// and returned.
pub async fn save_pdf<B: DocumentBackend>(
    assembler: &FormAssembler,
    document: &FormDocument,
    backend: B,
    reporter: &RenderReporter,
    destination: impl AsRef<Path>,
) -> Result<PathBuf> {
    let destination = destination.as_ref();
    let result = match assembler.render(document, backend, reporter).await {
        Ok(rendered) => write_artifact(&rendered, destination).await,
        Err(err) => Err(err),
    };

    if let Err(ref err) = result {
        let message = download_failure_message(err);
        log::error!("{}", message);
        reporter.fail(message);
    }
    result
}

/// Atomically write `rendered` to `destination`; returns the final path.
pub async fn write_artifact(rendered: &RenderedForm, destination: &Path) -> Result<PathBuf> {
    let target = resolve_destination(destination).await;
    let bytes = Bytes::copy_from_slice(&rendered.bytes);

    let path = target.clone();
    tokio::task::spawn_blocking(move || persist(&bytes, &path))
        .await
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

    log::info!("Saved {} bytes to {}", rendered.len(), target.display());
    Ok(target)
}

async fn resolve_destination(destination: &Path) -> PathBuf {
    match tokio::fs::metadata(destination).await {
        Ok(meta) if meta.is_dir() => destination.join(DEFAULT_FILE_NAME),
        _ => destination.to_path_buf(),
    }
}

fn persist(bytes: &[u8], target: &Path) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Read logo image bytes.
pub async fn read_logo(path: impl AsRef<Path>) -> Result<Bytes> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    log::debug!("Read {} byte logo from {}", data.len(), path.display());
    Ok(Bytes::from(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> RenderedForm {
        RenderedForm {
            bytes: b"%PDF-1.7\n%%EOF".to_vec(),
            content_type: crate::assembler::PDF_CONTENT_TYPE,
        }
    }

    #[tokio::test]
    async fn test_write_to_directory_uses_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&artifact(), dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join(DEFAULT_FILE_NAME));
        assert_eq!(std::fs::read(&path).unwrap(), artifact().bytes);
        // only the persisted file remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("form.pdf");
        assert!(write_artifact(&artifact(), &target).await.is_err());
    }

    #[tokio::test]
    async fn test_read_logo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert_eq!(read_logo(&path).await.unwrap(), Bytes::from_static(&[1, 2, 3]));
        assert!(read_logo(dir.path().join("nope.png")).await.is_err());
    }
}
