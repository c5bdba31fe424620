//! Link container aggregate with size accounting.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use url::Url;

use super::link_entry::LinkEntry;
use crate::error::AppError;

/// Availability of the container as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerStatus {
    Online,
    Offline,
    /// Some rows online, some offline.
    Partial,
    Unknown,
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerStatus::Online => write!(f, "online"),
            ContainerStatus::Offline => write!(f, "offline"),
            ContainerStatus::Partial => write!(f, "partial"),
            ContainerStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A fully assembled link container.
///
/// Entries keep source row order. The aggregate is built once by the
/// container service; afterwards the only permitted mutation is an explicit
/// append, which rejects value-equal duplicates instead of deduplicating.
#[derive(Debug, Clone, Serialize)]
pub struct Container {
    url: Url,
    title: String,
    status: ContainerStatus,
    last_checked: Option<NaiveDateTime>,
    entries: Vec<LinkEntry>,
}

impl Container {
    pub fn new(
        url: Url,
        title: impl Into<String>,
        status: ContainerStatus,
        last_checked: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            url,
            title: title.into(),
            status,
            last_checked,
            entries: Vec::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ContainerStatus {
        self.status
    }

    pub fn last_checked(&self) -> Option<NaiveDateTime> {
        self.last_checked
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    /// Appends an entry, rejecting a value-equal duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Assembly`] when an equal entry is already present;
    /// the container is left unchanged.
    pub fn add_entry(&mut self, entry: LinkEntry) -> Result<(), AppError> {
        if self.entries.contains(&entry) {
            return Err(AppError::assembly(format!(
                "entry for '{}' already exists in the container",
                entry.url()
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Appends entries in order, applying the single-add rule to each.
    pub fn add_entries(
        &mut self,
        entries: impl IntoIterator<Item = LinkEntry>,
    ) -> Result<(), AppError> {
        for entry in entries {
            self.add_entry(entry)?;
        }
        Ok(())
    }

    /// Sum of the explicitly reported sizes; missing sizes contribute 0.
    ///
    /// See [`Container::estimated_total_size`] for the gap-filled figure.
    pub fn total_size(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|entry| entry.metadata())
            .filter_map(|metadata| metadata.file_size())
            .map(|size| size.size())
            .sum()
    }

    /// Total size with missing per-row sizes filled from another row that
    /// reported a size for the same filename.
    ///
    /// Multi-part archives list one size per volume under a shared filename;
    /// the first reported size stands in for the parts that report none. When
    /// filenames are unique this understates the total rather than guessing.
    /// A payload-only container without row metadata reports 0.
    pub fn estimated_total_size(&self) -> f64 {
        if self.entries.iter().any(|entry| entry.metadata().is_none()) {
            return 0.0;
        }

        // First pass: the first known size seen per filename wins.
        let mut known_sizes: HashMap<&str, f64> = HashMap::new();
        for entry in &self.entries {
            let Some(metadata) = entry.metadata() else {
                continue;
            };
            let Some(name) = metadata.file_name() else {
                continue;
            };
            if let Some(size) = metadata.file_size() {
                if size.is_known() && !known_sizes.contains_key(name) {
                    known_sizes.insert(name, size.size());
                }
            }
        }

        // Second pass: own size when known, filename fallback otherwise.
        let mut total = 0.0;
        for entry in &self.entries {
            let Some(metadata) = entry.metadata() else {
                continue;
            };
            let Some(name) = metadata.file_name() else {
                continue;
            };
            match metadata.file_size() {
                Some(size) if size.is_known() => total += size.size(),
                _ => {
                    if let Some(fallback) = known_sizes.get(name) {
                        total += fallback;
                    }
                }
            }
        }

        total
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Container: {}", self.title)?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "Status: {}", self.status)?;
        if let Some(checked) = self.last_checked {
            writeln!(f, "Last checked: {}", checked.format("%Y-%m-%d %H:%M"))?;
        }
        writeln!(f, "Files: {}", self.entries.len())?;

        let total = self.total_size();
        let estimated = self.estimated_total_size();
        if total > 0.0 || estimated > 0.0 {
            if (total - estimated).abs() < 0.001 {
                writeln!(f, "Total size: {total:.2}")?;
            } else {
                writeln!(f, "Total size: {total:.2} (estimated {estimated:.2})")?;
            }
        }

        for (index, entry) in self.entries.iter().enumerate() {
            write!(f, "  [{:03}]", index + 1)?;
            if let Some(metadata) = entry.metadata() {
                if let Some(name) = metadata.file_name() {
                    write!(f, " {name}")?;
                }
                if let Some(size) = metadata.file_size() {
                    if size.is_known() {
                        write!(f, " ({size})")?;
                    }
                }
            }
            writeln!(f, " - {}", entry.url())?;
        }

        Ok(())
    }
}
