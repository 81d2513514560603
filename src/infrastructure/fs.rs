//! Local file helpers
//!
//! Outputs are written to a temporary file in the destination directory and
//! renamed into place, so readers never observe a half-written artifact.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Create a temporary file next to `path` (same filesystem, so `persist` is a rename)
///
/// The staged file takes the mode of the file it will replace, or `0644`
/// for a new file, instead of the private mode temp files default to.
pub fn staging_file_for(path: &Path) -> io::Result<NamedTempFile> {
    let dir = parent_dir(path);
    fs::create_dir_all(&dir)?;
    let mut builder = tempfile::Builder::new();
    builder.prefix(".texrun-");
    #[cfg(unix)]
    builder.permissions(staged_permissions(path));
    builder.tempfile_in(dir)
}

#[cfg(unix)]
fn staged_permissions(target: &Path) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(target)
        .map(|m| m.permissions())
        .unwrap_or_else(|_| fs::Permissions::from_mode(0o644))
}

/// Rename a staged file onto `path`, replacing any previous content
pub fn persist(staged: NamedTempFile, path: &Path) -> io::Result<()> {
    staged.persist(path).map(|_| ()).map_err(|e| e.error)
}

/// Write content to a file atomically
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut staged = staging_file_for(path)?;
    staged.write_all(content)?;
    staged.as_file().sync_all()?;
    persist(staged, path)
}

/// Error from [`concat_files`], naming the input or output that failed
#[derive(Debug)]
pub struct ConcatError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Concatenate `inputs` byte-for-byte into `output`, atomically.
///
/// Every input is opened before the output is touched, so a missing input
/// leaves any previous output in place.
pub fn concat_files(inputs: &[&Path], output: &Path) -> Result<u64, ConcatError> {
    let mut readers = Vec::with_capacity(inputs.len());
    for input in inputs {
        let file = File::open(input).map_err(|source| ConcatError {
            path: input.to_path_buf(),
            source,
        })?;
        readers.push((input, file));
    }

    let out_err = |source| ConcatError {
        path: output.to_path_buf(),
        source,
    };

    let mut staged = staging_file_for(output).map_err(out_err)?;
    let mut total = 0;
    for (input, mut reader) in readers {
        total += io::copy(&mut reader, &mut staged).map_err(|source| ConcatError {
            path: input.to_path_buf(),
            source,
        })?;
    }
    staged.flush().map_err(out_err)?;
    persist(staged, output).map_err(out_err)?;
    Ok(total)
}

/// Remove a file, treating "already gone" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
