//! Per-row metadata extraction from the container's link table.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{FileSize, LinkMetadata, LinkStatus, SizeUnit};

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("valid regex"));
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("valid regex"));
static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<td[^>]*title="([^"]*)""#).expect("valid regex"));
static ROW_STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<td[^>]*class="status"[^>]*>.*?<i[^>]*class="([a-z]+)"#)
        .expect("valid regex")
});
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s?(GB|MB)$").expect("valid regex"));
static BUTTON_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<button[^>]*\sdata-[a-z0-9-]+="([^"]*)""#).expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// One table row's scraped attributes, independent of the payload class.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetadata {
    pub file_name: Option<String>,
    pub file_size: Option<FileSize>,
    pub status: LinkStatus,
    /// The obfuscated link built from the row's button id; `None` when the
    /// row carries no button (payload-only containers).
    pub unresolved_url: Option<String>,
}

impl RowMetadata {
    /// Converts the row into entry metadata, dropping the unresolved link.
    pub fn into_metadata(self) -> LinkMetadata {
        LinkMetadata::new(self.file_name, self.file_size, self.status)
    }
}

/// Scrapes every link row of the container table, in document order.
///
/// Rows without a `<td>` cell (table headers) are skipped. Each row yields
/// metadata with per-field defaults; absence of the whole table yields an
/// empty list.
pub fn link_rows(body: &str, base_url: &str, link_endpoint: &str) -> Vec<RowMetadata> {
    ROW_RE
        .captures_iter(body)
        .filter_map(|row| parse_row(&row[1], base_url, link_endpoint))
        .collect()
}

fn parse_row(row: &str, base_url: &str, link_endpoint: &str) -> Option<RowMetadata> {
    let cells: Vec<String> = CELL_RE
        .captures_iter(row)
        .map(|caps| caps[1].to_string())
        .collect();
    if cells.is_empty() {
        return None;
    }

    let file_name = FILENAME_RE
        .captures(row)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty());

    let status = match ROW_STATUS_RE.captures(row).map(|caps| caps[1].to_string()) {
        Some(class) if class == "online" => LinkStatus::Online,
        Some(class) if class == "offline" => LinkStatus::Offline,
        _ => LinkStatus::Unknown,
    };

    // the size column is the third cell
    let file_size = cells.get(2).and_then(|cell| parse_size(cell));

    let unresolved_url = BUTTON_ID_RE
        .captures(row)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty())
        .map(|id| format!("{base_url}/{link_endpoint}/{id}.html"));

    Some(RowMetadata {
        file_name,
        file_size,
        status,
        unresolved_url,
    })
}

fn parse_size(cell: &str) -> Option<FileSize> {
    let text = TAG_RE.replace_all(cell, "");
    let text = text.trim();
    let caps = SIZE_RE.captures(text)?;
    let size: f64 = caps[1].parse().ok()?;
    let unit: SizeUnit = caps[2].parse().ok()?;
    FileSize::new(size, unit).ok()
}
