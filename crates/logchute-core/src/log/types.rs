/// One access-log line broken into its named fields.
///
/// Only [`LineParser`](super::LineParser) builds these, and only from a line
/// that matched the whole grammar, so every field is present. Numeric fields
/// stay as the captured text; accumulators convert what they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub client_ip: String,
    /// `-` when unknown
    pub identd: String,
    /// `-` when unknown
    pub userid: String,
    /// Bracket contents, e.g. `10/Oct/2020:13:55:36 -0700`
    pub timestamp: String,
    /// `METHOD /path HTTP/1.x`
    pub request_line: String,
    pub status_code: String,
    pub size_bytes: String,
    pub referer: String,
    pub user_agent: String,
    pub duration_microseconds: String,
}
