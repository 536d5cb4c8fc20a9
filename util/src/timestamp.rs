use chrono::{TimeZone, Utc};

/// Get the current UTC timestamp, in seconds
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Pretty print a UTC timestamp (in seconds) as an RFC 3339 date.
///
/// Falls back to the raw number when the timestamp is out of the representable range.
pub fn pretty_print(seconds: i64) -> String {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(date) => date.to_rfc3339(),
        None => seconds.to_string(),
    }
}
