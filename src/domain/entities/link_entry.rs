//! Link entry entity: a resolved URL plus the row metadata describing it.

use serde::Serialize;

use super::file_size::FileSize;

/// Availability of a single link as reported by its table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkStatus {
    Online,
    Offline,
    Unknown,
}

/// Row-level attributes scraped from the container page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkMetadata {
    file_name: Option<String>,
    file_size: Option<FileSize>,
    status: LinkStatus,
}

impl LinkMetadata {
    /// Creates row metadata. The page uses `"n/a"` as a placeholder for a
    /// missing filename; it normalizes to `None`.
    pub fn new(
        file_name: Option<String>,
        file_size: Option<FileSize>,
        status: LinkStatus,
    ) -> Self {
        let file_name = file_name.filter(|name| name != "n/a");
        Self {
            file_name,
            file_size,
            status,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn file_size(&self) -> Option<&FileSize> {
        self.file_size.as_ref()
    }

    pub fn status(&self) -> LinkStatus {
        self.status
    }
}

/// A recovered download link, immutable once created.
///
/// Entries produced by a payload-only build carry no metadata; entries zipped
/// with table rows carry the row's filename/size/status. Value equality over
/// all fields drives the container's duplicate detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEntry {
    url: String,
    metadata: Option<LinkMetadata>,
}

impl LinkEntry {
    pub fn new(url: impl Into<String>, metadata: Option<LinkMetadata>) -> Self {
        Self {
            url: url.into(),
            metadata,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn metadata(&self) -> Option<&LinkMetadata> {
        self.metadata.as_ref()
    }
}
