//! MIME-typed clipboard entries and transactions.
//!
//! A [`ClipboardTransaction`] is the unit a copy action hands to a platform:
//! several representations of the same logical content, each keyed by a MIME
//! type (or an application-specific identifier), committed together.

// =============================================================================
// Well-known MIME types
// =============================================================================

/// Plain UTF-8 text. Every paste target understands this one.
pub const MIME_TEXT_PLAIN: &str = "text/plain";

/// Generic structured data
pub const MIME_JSON: &str = "application/json";

/// HTML fragment
pub const MIME_TEXT_HTML: &str = "text/html";

// =============================================================================
// Clipboard Entry
// =============================================================================

/// One representation inside a clipboard transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    /// MIME type or application-specific identifier
    pub mime_type: String,

    /// Raw bytes for this representation
    pub data: Vec<u8>,
}

impl ClipboardEntry {
    /// Create a new entry
    pub fn new(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Entry data as UTF-8, if valid
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

// =============================================================================
// Clipboard Transaction
// =============================================================================

/// An ordered set of entries committed to the clipboard as one copy action.
///
/// Setting a MIME type that is already present replaces its data in place,
/// so each type appears at most once and keeps its first-insertion position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardTransaction {
    entries: Vec<ClipboardEntry>,
}

impl ClipboardTransaction {
    /// Create an empty transaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data for a MIME type
    pub fn set(&mut self, mime_type: &str, data: impl Into<Vec<u8>>) {
        let data = data.into();
        match self.entries.iter_mut().find(|e| e.mime_type == mime_type) {
            Some(entry) => entry.data = data,
            None => self.entries.push(ClipboardEntry::new(mime_type, data)),
        }
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, mime_type: &str, data: impl Into<Vec<u8>>) -> Self {
        self.set(mime_type, data);
        self
    }

    /// Data stored for a MIME type
    pub fn get(&self, mime_type: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.mime_type == mime_type)
            .map(|e| e.data.as_slice())
    }

    /// Data stored for a MIME type, as UTF-8
    pub fn get_text(&self, mime_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.mime_type == mime_type)
            .and_then(ClipboardEntry::as_str)
    }

    /// Whether a MIME type is present
    pub fn contains(&self, mime_type: &str) -> bool {
        self.entries.iter().any(|e| e.mime_type == mime_type)
    }

    /// MIME types in insertion order
    pub fn mime_types(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.mime_type.as_str()).collect()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    /// Consume into entries
    pub fn into_entries(self) -> Vec<ClipboardEntry> {
        self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry sizes in bytes
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.data.len()).sum()
    }
}
