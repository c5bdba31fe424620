//! Inline payload extraction from the container page's Click'n'Load form.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::CnlPayload;
use crate::error::AppError;

static CNL_FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<form[^>]*onsubmit="([^"]*CNLPOP[^"]*)""#).expect("valid regex")
});
static ARG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'(.*?)'").expect("valid regex"));

/// Extracts the inline payload from the page's CNL form.
///
/// The form's `onsubmit` handler calls the popup helper with quoted
/// arguments; the second is the hex key and the third the encrypted blob.
///
/// # Errors
///
/// Returns [`AppError::Extraction`] when the form or its arguments are
/// missing, [`AppError::Validation`] when the scraped key is not hexadecimal.
pub fn cnl_payload(body: &str) -> Result<CnlPayload, AppError> {
    let handler = CNL_FORM_RE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| AppError::extraction("CNL form not found on the container page"))?;

    let arguments: Vec<String> = ARG_RE
        .captures_iter(&handler)
        .map(|caps| caps[1].to_string())
        .collect();
    if arguments.len() < 3 {
        return Err(AppError::extraction(format!(
            "CNL handler carries {} quoted arguments, expected at least 3",
            arguments.len()
        )));
    }

    CnlPayload::new(arguments[2].clone(), arguments[1].clone(), None)
}
