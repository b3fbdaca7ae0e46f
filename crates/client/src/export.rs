//! Server-generated export blobs.
//!
//! Exports are produced entirely by the backend; the client only picks a
//! format, fetches the blob, and saves it to disk.

use bytes::Bytes;
use std::fmt;
use std::path::Path;

use ledgerdesk_shared::{ApiError, AppResult};

/// Formats the backend can export lists in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// JSON document.
    Json,
    /// Excel workbook.
    Xlsx,
}

impl ExportFormat {
    /// Returns the format's query-parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }

    /// Parses a format from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Returns the MIME type of the exported file.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Returns the conventional file extension.
    #[must_use]
    pub fn file_extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Writes an export blob to disk. Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_export(content: &Bytes, path: impl AsRef<Path>) -> AppResult<usize> {
    tokio::fs::write(path.as_ref(), content)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_roundtrip() {
        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Xlsx] {
            assert_eq!(ExportFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(ExportFormat::parse("pdf"), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Csv.mime(), "text/csv");
        assert_eq!(ExportFormat::Json.mime(), "application/json");
        assert!(ExportFormat::Xlsx.mime().contains("spreadsheetml"));
    }

    #[tokio::test]
    async fn test_save_export_writes_file() {
        let dir = std::env::temp_dir().join("ledgerdesk-export-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("accounts.csv");

        let content = Bytes::from_static(b"code,name\n1100,Bancos\n");
        let written = save_export(&content, &path).await.unwrap();

        assert_eq!(written, content.len());
        let on_disk = tokio::fs::read(&path).await.unwrap();
        assert_eq!(on_disk, content.to_vec());

        tokio::fs::remove_file(&path).await.ok();
    }
}
