//! Container-level metadata extraction from the fetched page.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::domain::entities::ContainerStatus;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<h2[^>]*>(.*?)</h2>").expect("valid regex"));
static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="(?:[^"]*\s)?(mostonline|online|offline)""#).expect("valid regex")
});
static LAST_CHECKED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4} - \d{2}:\d{2}").expect("valid regex"));
static CNL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input[^>]*name="[^"]*hidden_cnl_id[^"]*"[^>]*value="([^"]*)""#)
        .expect("valid regex")
});
static DLC_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DownloadDLC\('([^']*)'\)").expect("valid regex"));

/// Container-level facts scraped from the page header plus the payload ids
/// that decide which decryption path applies.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerMetadata {
    pub title: String,
    pub status: ContainerStatus,
    pub last_checked: Option<NaiveDateTime>,
    pub cnl_id: Option<String>,
    pub dlc_id: Option<String>,
}

/// Scrapes container metadata, defaulting every field that is not present.
///
/// The page header precedes the row table, so status classes are only read
/// from the part of the body before the first `<table`; rows carry their own
/// online/offline markers that must not leak into the container status.
pub fn container_metadata(body: &str) -> ContainerMetadata {
    let header = &body[..body.find("<table").unwrap_or(body.len())];

    let title = TITLE_RE
        .captures(header)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    let status = match STATUS_RE.captures(header).map(|caps| caps[1].to_string()) {
        Some(class) if class == "mostonline" => ContainerStatus::Partial,
        Some(class) if class == "online" => ContainerStatus::Online,
        Some(class) if class == "offline" => ContainerStatus::Offline,
        _ => ContainerStatus::Unknown,
    };

    let last_checked = LAST_CHECKED_RE
        .find(header)
        .and_then(|m| NaiveDateTime::parse_from_str(m.as_str(), "%d.%m.%Y - %H:%M").ok());

    let cnl_id = CNL_ID_RE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty());
    let dlc_id = DLC_ID_RE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty());

    ContainerMetadata {
        title,
        status,
        last_checked,
        cnl_id,
        dlc_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_full_header_extraction() {
        let body = r#"
            <div id="page"><div class="container online">
              <h2>My Pack</h2>
              <small>checked <strong>04.08.2026 - 18:30</strong></small>
            </div>
            <table><tr><td class="status"><i class="offline"></i></td></tr></table>
        "#;

        let metadata = container_metadata(body);
        assert_eq!(metadata.title, "My Pack");
        assert_eq!(metadata.status, ContainerStatus::Online);
        assert_eq!(
            metadata.last_checked,
            NaiveDate::from_ymd_opt(2026, 8, 4)
                .unwrap()
                .and_hms_opt(18, 30, 0)
        );
        assert!(metadata.cnl_id.is_none());
        assert!(metadata.dlc_id.is_none());
    }

    #[test]
    fn test_mostonline_maps_to_partial() {
        let body = r#"<div class="container mostonline"><h2>t</h2></div>"#;
        assert_eq!(container_metadata(body).status, ContainerStatus::Partial);
    }

    #[test]
    fn test_row_status_does_not_leak_into_container_status() {
        let body = r#"<h2>t</h2><table><tr><td class="status"><i class="online"></i></td></tr></table>"#;
        assert_eq!(container_metadata(body).status, ContainerStatus::Unknown);
    }

    #[test]
    fn test_payload_ids_extracted() {
        let body = r#"
            <h2>t</h2>
            <input type="hidden" name="hidden_cnl_id" value="CNL42" />
            <button onclick="DownloadDLC('DLC99')">dlc</button>
        "#;

        let metadata = container_metadata(body);
        assert_eq!(metadata.cnl_id.as_deref(), Some("CNL42"));
        assert_eq!(metadata.dlc_id.as_deref(), Some("DLC99"));
    }

    #[test]
    fn test_missing_everything_defaults() {
        let metadata = container_metadata("<html></html>");
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.status, ContainerStatus::Unknown);
        assert!(metadata.last_checked.is_none());
        assert!(metadata.cnl_id.is_none());
        assert!(metadata.dlc_id.is_none());
    }

    #[test]
    fn test_empty_payload_ids_treated_as_absent() {
        let body = r#"<input name="hidden_cnl_id" value="" />"#;
        assert!(container_metadata(body).cnl_id.is_none());
    }
}
