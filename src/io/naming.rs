//! Report filenames: `report-<host>-<timestamp>.json` and
//! `website-report-<host>-<timestamp>.json`.

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

pub const PAGE_REPORT_PREFIX: &str = "report";
pub const WEBSITE_REPORT_PREFIX: &str = "website-report";

/// Hostname with dots replaced by dashes. Anything else that is not safe in a
/// filename (IPv6 brackets and colons) is dashed too.
pub fn sanitize_host(url: &Url) -> String {
    let host = url.host_str().unwrap_or("unknown");
    host.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

/// ISO-8601 UTC with millisecond precision, `:` and `.` replaced by `-`.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

pub fn report_filename(url: &Url, at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}.json",
        PAGE_REPORT_PREFIX,
        sanitize_host(url),
        file_timestamp(at)
    )
}

/// `name` with `-<n>` inserted before its extension.
pub fn numbered_filename(name: &str, n: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{n}.{ext}"),
        None => format!("{name}-{n}"),
    }
}

pub fn website_report_filename(url: &Url, at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}.json",
        WEBSITE_REPORT_PREFIX,
        sanitize_host(url),
        file_timestamp(at)
    )
}
