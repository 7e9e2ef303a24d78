//! Persistence of encoded frames into a flat output directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CaptureError;

/// Writes encoded frames into one directory.
///
/// The directory is created once, when the sink is prepared. Files are
/// written to a temporary sibling and renamed into place, so a failed write
/// never leaves a truncated image under the final name.
#[derive(Debug)]
pub struct OutputSink {
    directory: PathBuf,
    ready: bool,
}

impl OutputSink {
    /// Create the output directory (and parents). A failure is logged and
    /// remembered; the sink retries before the next write.
    pub fn prepare(directory: impl Into<PathBuf>) -> Self {
        let mut sink = Self {
            directory: directory.into(),
            ready: false,
        };
        if let Err(e) = sink.ensure_directory() {
            tracing::error!("{e}");
        }
        sink
    }

    /// Directory receiving the frames.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether the output directory is known to exist.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Persist `bytes` as `file_name` and return the final path.
    pub fn write(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, CaptureError> {
        if !self.ready {
            self.ensure_directory()?;
        }

        let path = self.directory.join(file_name);
        let tmp = self.directory.join(format!(".{file_name}.partial"));

        let result = write_synced(&tmp, bytes).and_then(|()| fs::rename(&tmp, &path));
        if let Err(source) = result {
            let _ = fs::remove_file(&tmp);
            return Err(CaptureError::Write { path, source });
        }
        Ok(path)
    }

    fn ensure_directory(&mut self) -> Result<(), CaptureError> {
        fs::create_dir_all(&self.directory).map_err(|source| CaptureError::DirectoryCreation {
            path: self.directory.clone(),
            source,
        })?;
        self.ready = true;
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn prepare_creates_nested_directory() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("a/b/frames");
        let sink = OutputSink::prepare(&dir);
        assert!(sink.is_ready());
        assert!(dir.is_dir());
    }

    #[test]
    fn write_leaves_only_final_file() {
        let tmp = tempdir().unwrap();
        let mut sink = OutputSink::prepare(tmp.path());
        let path = sink.write("3.png", b"abc").unwrap();

        assert_eq!(path, tmp.path().join("3.png"));
        assert_eq!(fs::read(&path).unwrap(), b"abc");
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .flatten()
            .map(|e| e.file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn blocked_directory_reports_creation_failure() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        let mut sink = OutputSink::prepare(blocker.join("frames"));
        assert!(!sink.is_ready());
        assert!(matches!(
            sink.write("1.png", b"abc"),
            Err(CaptureError::DirectoryCreation { .. })
        ));
    }

    #[test]
    fn sink_recovers_once_directory_can_be_created() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("out");
        fs::write(&blocker, b"x").unwrap();

        let mut sink = OutputSink::prepare(&blocker);
        assert!(!sink.is_ready());

        fs::remove_file(&blocker).unwrap();
        sink.write("1.png", b"abc").unwrap();
        assert!(sink.is_ready());
        assert!(blocker.join("1.png").is_file());
    }
}
