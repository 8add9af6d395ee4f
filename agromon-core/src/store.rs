//! Append-Only Record Stores
//!
//! The storage collaborator from the monitor's point of view is tiny:
//! ask whether the store is empty (to decide about the header block)
//! and append one line. Implementations acquire and release the
//! backing resource *per call* — on the device the SD card is shared
//! with other tooling and must never be held open across ticks.
//!
//! Two backends ship with the crate:
//!
//! - [`MemoryStore`]: fixed-capacity in-memory store for tests, replay,
//!   and targets without persistent storage.
//! - [`FileStore`] (`store-file` feature, std): a path-based store that
//!   opens the file in append mode around each write.

use crate::errors::RecordError;

/// Append-only line store.
///
/// `&mut self` throughout: even `is_empty` may have to open the
/// backing resource, and stores are single-writer by design.
pub trait RecordStore {
    /// Backend-specific failure type.
    type Error;

    /// Whether the store currently holds no records.
    ///
    /// Used exactly once per successful tick, before the write, to
    /// decide whether the header block must be emitted first.
    fn is_empty(&mut self) -> Result<bool, Self::Error>;

    /// Appends one line (without a trailing newline in `line`).
    fn append_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

/// Fixed-capacity in-memory store.
///
/// ## Use Cases
///
/// 1. **Unit testing**: assert on exactly what would hit the SD card
/// 2. **Replay**: feed captured rows back through offline tooling
/// 3. **RAM-only targets**: short bench runs without a card present
#[cfg(feature = "store-memory")]
pub struct MemoryStore<const CAP: usize = 64> {
    lines: heapless::Vec<crate::record::RecordLine, CAP>,
}

#[cfg(feature = "store-memory")]
impl<const CAP: usize> MemoryStore<CAP> {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            lines: heapless::Vec::new(),
        }
    }

    /// All stored lines, oldest first.
    pub fn lines(&self) -> &[crate::record::RecordLine] {
        &self.lines
    }

    /// Drops all stored lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(feature = "store-memory")]
impl<const CAP: usize> Default for MemoryStore<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "store-memory")]
impl<const CAP: usize> RecordStore for MemoryStore<CAP> {
    type Error = RecordError;

    fn is_empty(&mut self) -> Result<bool, Self::Error> {
        Ok(self.lines.is_empty())
    }

    fn append_line(&mut self, line: &str) -> Result<(), Self::Error> {
        let mut owned = crate::record::RecordLine::new();
        owned
            .push_str(line)
            .map_err(|_| RecordError::LineOverflow)?;
        self.lines.push(owned).map_err(|_| RecordError::StoreFull)
    }
}

/// Path-based append-only store (std only).
///
/// The file is opened and closed around every call, in append mode
/// with create-if-missing, so a tick never leaves a handle open. A
/// missing file counts as an empty store.
#[cfg(feature = "store-file")]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "store-file")]
impl FileStore {
    /// Store backed by the file at `path`. Nothing is touched until
    /// the first call.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "store-file")]
impl RecordStore for FileStore {
    type Error = std::io::Error;

    fn is_empty(&mut self) -> Result<bool, Self::Error> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e),
        }
    }

    fn append_line(&mut self, line: &str) -> Result<(), Self::Error> {
        use std::io::Write;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
        // File handle drops (and closes) here, per the scoped
        // acquisition contract.
    }
}

#[cfg(all(test, feature = "store-memory"))]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store: MemoryStore<8> = MemoryStore::new();
        assert!(store.is_empty().unwrap());

        store.append_line("first").unwrap();
        store.append_line("second").unwrap();

        assert!(!store.is_empty().unwrap());
        assert_eq!(store.lines()[0].as_str(), "first");
        assert_eq!(store.lines()[1].as_str(), "second");
    }

    #[test]
    fn memory_store_reports_full() {
        let mut store: MemoryStore<1> = MemoryStore::new();
        store.append_line("only").unwrap();
        assert_eq!(store.append_line("extra"), Err(RecordError::StoreFull));
    }

    #[cfg(feature = "store-file")]
    #[test]
    fn file_store_appends_and_detects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DADOS.CSV");
        let mut store = FileStore::new(&path);

        // Missing file counts as empty.
        assert!(store.is_empty().unwrap());

        store.append_line("Data,Hora").unwrap();
        store.append_line("2025-04-29,13:20:00").unwrap();
        assert!(!store.is_empty().unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Data,Hora\n2025-04-29,13:20:00\n");
    }
}
