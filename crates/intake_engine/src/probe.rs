use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot inspect {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0:?} is not a regular file")]
    NotAFile(PathBuf),
}

/// What the platform knows about a selected file before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedFile {
    pub name: String,
    /// Guessed from the extension; empty when unknown.
    pub mime_type: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Reads name, size and MIME type of a file without touching its contents.
pub fn probe_file(path: &Path) -> Result<ProbedFile, ProbeError> {
    let meta = fs::metadata(path).map_err(|source| ProbeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(ProbeError::NotAFile(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string();

    Ok(ProbedFile {
        name,
        mime_type,
        size_bytes: meta.len(),
        path: path.to_path_buf(),
    })
}

/// Probes every path, keeping input order. Failures are returned separately.
pub fn probe_files<I, P>(paths: I) -> (Vec<ProbedFile>, Vec<ProbeError>)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut probed = Vec::new();
    let mut errors = Vec::new();
    for path in paths {
        match probe_file(path.as_ref()) {
            Ok(file) => probed.push(file),
            Err(err) => errors.push(err),
        }
    }
    (probed, errors)
}
