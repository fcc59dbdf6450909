use super::types::LogRecord;
use lazy_static::lazy_static;
use regex::Regex;

/// Combined log format with a trailing microsecond duration.
///
/// Quoted fields are non-greedy so they stop at the first quote that is
/// followed by the next field's delimiter. Digits and separators are ASCII
/// only, so every numeric capture converts to an integer.
const GRAMMAR: &str = r#"(?x)
    ^
    (?P<client_ip>[.:0-9a-fA-F]{7,45})
    (?-u:\s)
    (?P<identd>-|.+?)
    (?-u:\s)
    (?P<userid>-|.+?)
    (?-u:\s)
    \[(?P<timestamp>.+?)\]
    (?-u:\s)
    "(?P<request_line>[A-Z]+\x20/.*?\x20HTTP/1\.[0-9])"
    (?-u:\s)
    (?P<status_code>[0-9]+)
    (?-u:\s)
    (?P<size_bytes>[0-9]+)
    (?-u:\s)
    "(?P<referer>.*?)"
    (?-u:\s)
    "(?P<user_agent>.*?)"
    (?-u:\s)
    (?P<duration_microseconds>[0-9]+)
"#;

lazy_static! {
    static ref LENIENT_GRAMMAR: Regex = Regex::new(GRAMMAR).unwrap();
    static ref STRICT_GRAMMAR: Regex = Regex::new(&format!("{GRAMMAR}(?-u:\\s)*$")).unwrap();
}

/// How much of the line the grammar has to cover
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrammarMode {
    /// Anchored at the start only; anything after the duration is ignored
    #[default]
    Lenient,
    /// Only whitespace may follow the duration
    Strict,
}

/// Turns raw lines into [`LogRecord`]s.
///
/// Both grammars are compiled once per process. Build one parser at startup
/// and hand it around by reference.
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    mode: GrammarMode,
    grammar: &'static Regex,
}

impl LineParser {
    pub fn new(mode: GrammarMode) -> Self {
        let grammar: &'static Regex = match mode {
            GrammarMode::Lenient => &*LENIENT_GRAMMAR,
            GrammarMode::Strict => &*STRICT_GRAMMAR,
        };
        Self { mode, grammar }
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    /// Parse one line. `None` means the line does not fit the grammar.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        let caps = self.grammar.captures(line)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Some(LogRecord {
            client_ip: field("client_ip")?,
            identd: field("identd")?,
            userid: field("userid")?,
            timestamp: field("timestamp")?,
            request_line: field("request_line")?,
            status_code: field("status_code")?,
            size_bytes: field("size_bytes")?,
            referer: field("referer")?,
            user_agent: field("user_agent")?,
            duration_microseconds: field("duration_microseconds")?,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(GrammarMode::default())
    }
}
