use std::collections::BTreeSet;

use crate::{Candidate, RawFile, ValidationRejected};

pub const DEFAULT_ACCEPTED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/jpg", "application/pdf"];

/// 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Which files may become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptancePolicy {
    accepted_mime_types: BTreeSet<String>,
    max_file_size_bytes: u64,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTED_MIME_TYPES, DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}

impl AcceptancePolicy {
    pub fn new<I, S>(accepted_mime_types: I, max_file_size_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted_mime_types: accepted_mime_types
                .into_iter()
                .map(|mime| normalize_mime_type(mime.as_ref()))
                .filter(|mime| !mime.is_empty())
                .collect(),
            max_file_size_bytes,
        }
    }

    pub fn accepted_mime_types(&self) -> impl Iterator<Item = &str> {
        self.accepted_mime_types.iter().map(String::as_str)
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Checks a single file against the type and size limits.
    pub fn check(&self, file: &RawFile) -> Result<(), ValidationRejected> {
        let mime_type = normalize_mime_type(&file.mime_type);
        if !self.accepted_mime_types.contains(&mime_type) {
            return Err(ValidationRejected::UnsupportedType { mime_type });
        }
        if file.size_bytes > self.max_file_size_bytes {
            return Err(ValidationRejected::TooLarge {
                size_bytes: file.size_bytes,
                max_bytes: self.max_file_size_bytes,
            });
        }
        Ok(())
    }

    /// Filters a selection down to the files that pass [`Self::check`],
    /// preserving input order. Failing files are reported, never raised.
    pub fn accept(&self, files: Vec<RawFile>) -> Selection {
        let mut selection = Selection::default();
        for file in files {
            match self.check(&file) {
                Ok(()) => selection.accepted.push(Candidate::new(
                    file.name,
                    normalize_mime_type(&file.mime_type),
                    file.size_bytes,
                    file.handle,
                )),
                Err(reason) => selection.rejected.push(RejectedFile {
                    name: file.name,
                    reason,
                }),
            }
        }
        selection
    }
}

/// Result of running a selection through the acceptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub accepted: Vec<Candidate>,
    pub rejected: Vec<RejectedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub name: String,
    pub reason: ValidationRejected,
}

/// Lowercases and trims a MIME type and strips any parameters.
pub fn normalize_mime_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Drag affordance for the drop zone. Has no bearing on validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Inactive,
    Hovering,
}
