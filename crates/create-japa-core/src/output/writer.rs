//! Non-destructive file writes relative to the project root

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// What happened to a single generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// A file was already there; it was left untouched
    Skipped,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Created => write!(f, "created"),
            WriteOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Outcome of one write, keyed by the path relative to the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub outcome: WriteOutcome,
}

/// Writes generated files without ever overwriting existing ones
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `content` to `relative_path` unless something already exists there.
    /// Missing parent directories are created.
    pub async fn write(&self, relative_path: &str, content: &str) -> Result<WriteOutcome> {
        let target_path = self.root.join(relative_path);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::fs("create directory", parent, e))?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::info!(path = relative_path, "file already exists, skipping");
                return Ok(WriteOutcome::Skipped);
            }
            Err(e) => return Err(ScaffoldError::fs("create", &target_path, e)),
        };

        write_or_discard(file, &target_path, content).await?;

        tracing::info!(path = relative_path, "created file");
        Ok(WriteOutcome::Created)
    }

    /// Same as [`write`](Self::write), returning a report for the summary
    pub async fn write_report(&self, relative_path: &str, content: &str) -> Result<FileReport> {
        let outcome = self.write(relative_path, content).await?;
        Ok(FileReport {
            path: relative_path.to_string(),
            outcome,
        })
    }
}

/// Write `content` into a freshly created file. On failure the partial file is
/// removed so the next run creates it again instead of skipping it.
async fn write_or_discard<W>(mut sink: W, path: &Path, content: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match sink.write_all(content.as_bytes()).await {
        Ok(()) => sink.flush().await,
        Err(e) => Err(e),
    };
    drop(sink);

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %remove_err, "could not remove partial file");
        }
        return Err(ScaffoldError::fs("write", path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Sink that fails every write
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.ts");
        std::fs::write(&path, "half a boot").unwrap();

        let err = write_or_discard(FullDisk, &path, "content").await.unwrap_err();

        assert!(matches!(err, ScaffoldError::FileSystem { .. }));
        assert!(!path.exists());

        let outcome = ArtifactWriter::new(dir.path())
            .write("test.ts", "content")
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Created);
    }

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        let outcome = writer.write("tests/unit/maths.spec.ts", "hello").await.unwrap();

        assert_eq!(outcome, WriteOutcome::Created);
        let content = std::fs::read_to_string(dir.path().join("tests/unit/maths.spec.ts")).unwrap();
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_second_write_is_skipped_and_bytes_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        let first = writer.write("bin/test.ts", "content").await.unwrap();
        let after_first = std::fs::read(dir.path().join("bin/test.ts")).unwrap();
        let second = writer.write("bin/test.ts", "content").await.unwrap();
        let after_second = std::fs::read(dir.path().join("bin/test.ts")).unwrap();

        assert_eq!(first, WriteOutcome::Created);
        assert_eq!(second, WriteOutcome::Skipped);
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn test_existing_file_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::write(dir.path().join("bin/test.ts"), "").unwrap();

        let report = ArtifactWriter::new(dir.path())
            .write_report("bin/test.ts", "new content")
            .await
            .unwrap();

        assert_eq!(report.outcome, WriteOutcome::Skipped);
        assert_eq!(report.path, "bin/test.ts");
        assert_eq!(std::fs::read_to_string(dir.path().join("bin/test.ts")).unwrap(), "");
    }

    #[tokio::test]
    async fn test_directory_creation_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bin"), "not a directory").unwrap();

        let err = ArtifactWriter::new(dir.path())
            .write("bin/test.ts", "x")
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::FileSystem { .. }));
    }
}
