//! Time related utils.

use chrono::Utc;

/// The UTC timestamp type used across awsig.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a timestamp as the compact ISO8601 form AWS expects,
/// `YYYYMMDD'T'HHMMSS'Z'`.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Format a timestamp as the date stamp used in credential scopes,
/// `YYYYMMDD`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}
