use std::path::{Path, PathBuf};

/// Opaque reference to a file's payload.
///
/// The payload is owned by the platform; a handle only names it. Bytes are
/// read once, when a submission packages its request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayloadHandle(PathBuf);

impl PayloadHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A file as reported by a selection event, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub handle: PayloadHandle,
}

impl RawFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        handle: PayloadHandle,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            handle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Document,
    Image,
}

/// A file staged for upload. Only the acceptor constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name: String,
    mime_type: String,
    size_bytes: u64,
    handle: PayloadHandle,
}

impl Candidate {
    pub(crate) fn new(name: String, mime_type: String, size_bytes: u64, handle: PayloadHandle) -> Self {
        Self {
            name,
            mime_type,
            size_bytes,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn handle(&self) -> &PayloadHandle {
        &self.handle
    }

    pub fn kind(&self) -> CandidateKind {
        if self.mime_type.contains("pdf") {
            CandidateKind::Document
        } else {
            CandidateKind::Image
        }
    }
}

/// Ordered collection of staged candidates.
///
/// Entries are never edited in place: the set is replaced wholesale, shrunk by
/// one, or emptied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSet {
    entries: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, candidates: Vec<Candidate>) {
        self.entries = candidates;
    }

    /// Removes the entry at `index`. Returns `false` and leaves the set
    /// untouched when the index is out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> Candidate {
        Candidate::new(
            name.to_string(),
            "application/pdf".to_string(),
            10,
            PayloadHandle::new(name),
        )
    }

    #[test]
    fn remove_at_keeps_order_of_remaining_entries() {
        let mut set = CandidateSet::new();
        set.replace_all(vec![candidate("a"), candidate("b"), candidate("c")]);

        assert!(set.remove_at(1));
        let names: Vec<_> = set.iter().map(Candidate::name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn kind_follows_mime_type() {
        let image = Candidate::new(
            "scan.png".to_string(),
            "image/png".to_string(),
            1,
            PayloadHandle::new("scan.png"),
        );
        assert_eq!(image.kind(), CandidateKind::Image);
        assert_eq!(candidate("report.pdf").kind(), CandidateKind::Document);
    }
}
