use axum::http::HeaderValue;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::str::FromStr;

/// Characters left unescaped in an RFC 5987 `filename*` value.
const FILENAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Parses an optional query value into an enum filter.
///
/// Missing, blank and `"all"` values mean "no filter". Anything else must
/// parse exactly, otherwise the error names the offending value.
pub fn parse_filter_value<T: FromStr>(raw: Option<&str>, field: &str) -> Result<Option<T>, String> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Unknown {field}: {value}")),
    }
}

/// `Content-Disposition: attachment` for a download named `file_name`.
///
/// Carries an ASCII `filename` for old clients, with anything outside
/// printable ASCII, quotes and backslashes replaced by `_`, plus the exact
/// UTF-8 name in `filename*`.
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            ' '..='~' => c,
            _ => '_',
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, FILENAME_ESCAPE);
    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
