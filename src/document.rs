//! Candidate files handed to the controller by the file picker.

use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

/// Media type a candidate must declare to be accepted.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type declared for anything the picker cannot identify.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Errors raised while loading a candidate from disk.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path we attempted to read.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// A file offered for upload together with the media type its source declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Display name, sent as the multipart filename.
    pub name: String,
    /// Declared media type; only inspected, never sniffed from the bytes.
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    /// Build a candidate from in-memory parts.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            media_type: media_type_for(path).to_string(),
            name,
            bytes,
        })
    }

    /// Whether the declared media type is exactly the PDF media type.
    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    /// Hex SHA-256 of the contents, used to correlate log lines.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pdf_extension_declares_pdf_media_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Report.PDF");
        std::fs::File::create(&path)
            .and_then(|mut file| file.write_all(b"%PDF-1.4"))
            .expect("write pdf");

        let file = CandidateFile::from_path(&path).expect("load");
        assert_eq!(file.name, "Report.PDF");
        assert_eq!(file.media_type, PDF_MEDIA_TYPE);
        assert!(file.is_pdf());
        assert_eq!(file.bytes, b"%PDF-1.4");
    }

    #[test]
    fn other_extensions_are_not_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "%PDF-1.4").expect("write");

        let file = CandidateFile::from_path(&path).expect("load");
        assert_eq!(file.media_type, FALLBACK_MEDIA_TYPE);
        assert!(!file.is_pdf());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CandidateFile::from_path(Path::new("/nonexistent/input.pdf"))
            .expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/input.pdf"));
    }

    #[test]
    fn fingerprint_is_stable_sha256() {
        let file = CandidateFile::new("a.pdf", PDF_MEDIA_TYPE, b"abc".to_vec());
        assert_eq!(
            file.fingerprint(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
