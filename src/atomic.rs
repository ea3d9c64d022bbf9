//! Crash-safe file replacement.
//!
//! Data goes to a temporary file in the target's directory, is flushed and
//! synced, and only then renamed over the target. A reader of the target path
//! sees either the previous file or the complete new one.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::SaveError;

/// Permission bits guaranteed on a saved file (owner read/write, others read).
#[cfg(unix)]
pub const SAVED_FILE_MODE: u32 = 0o644;

/// Atomically replace `path` with whatever `write_body` writes.
///
/// On any failure before the rename the temporary file is removed and `path`
/// is left untouched.
pub fn write_atomic<F>(path: &Path, write_body: F) -> Result<(), SaveError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let write_failed = |source: io::Error| SaveError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".pdfwrap-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_failed)?;
    log::debug!("Writing '{}' via '{}'", path.display(), tmp.path().display());

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_body(&mut writer).map_err(write_failed)?;
        writer.flush().map_err(write_failed)?;
    }
    tmp.as_file().sync_all().map_err(write_failed)?;

    // Dropping the returned NamedTempFile on error deletes the temporary file.
    tmp.persist(path).map_err(|e| SaveError::RenameFailed {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    sync_dir(dir);
    Ok(())
}

/// Make `path` readable and writable by its owner. Does nothing if it already is.
pub fn make_writable(path: &Path) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = perms.mode();
        if mode & SAVED_FILE_MODE != SAVED_FILE_MODE {
            perms.set_mode(mode | SAVED_FILE_MODE);
            fs::set_permissions(path, perms)?;
        }
    }

    #[cfg(not(unix))]
    {
        if perms.readonly() {
            perms.set_readonly(false);
            fs::set_permissions(path, perms)?;
        }
    }

    Ok(())
}

/// Persist the rename itself. Failure here is not reported: the data is
/// already complete on disk.
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
            log::debug!("Could not sync directory '{}': {e}", dir.display());
        }
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `remaining` bytes, then fails like a full disk.
    struct FailAfter<'a> {
        inner: &'a mut dyn Write,
        remaining: usize,
    }

    impl Write for FailAfter<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left on device"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            self.inner.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        write_atomic(&target, |w| w.write_all(b"%PDF-1.3 body")).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"%PDF-1.3 body");
        assert_eq!(entries(dir.path()), vec!["out.pdf".to_string()]);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        let result = write_atomic(&target, |w| {
            let mut w = FailAfter {
                inner: w,
                remaining: 16,
            };
            w.write_all(&[b'x'; 64])
        });
        assert!(matches!(result, Err(SaveError::WriteFailed { .. })));
        assert!(!target.exists());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn failed_write_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        fs::write(&target, b"old").unwrap();
        let result = write_atomic(&target, |w| {
            w.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::Other, "interrupted"))
        });
        assert!(result.is_err());
        assert_eq!(fs::read(&target).unwrap(), b"old");
        assert_eq!(entries(dir.path()), vec!["out.pdf".to_string()]);
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        fs::write(&target, b"old").unwrap();
        write_atomic(&target, |w| w.write_all(b"new")).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn missing_directory_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.pdf");
        let result = write_atomic(&target, |w| w.write_all(b"x"));
        assert!(matches!(result, Err(SaveError::WriteFailed { .. })));
    }

    #[test]
    fn rename_onto_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();
        let result = write_atomic(&target, |w| w.write_all(b"data"));
        assert!(matches!(result, Err(SaveError::RenameFailed { .. })));
        assert_eq!(entries(dir.path()), vec!["taken".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn make_writable_is_idempotent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        fs::write(&target, b"x").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o400)).unwrap();

        make_writable(&target).unwrap();
        make_writable(&target).unwrap();
        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
