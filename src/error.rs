use core::fmt;
use std::error::Error as StdError;
use std::io;

/// Result type returned by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy for the crate.
///
/// Every variant carries enough detail to build a one-line, categorised
/// message (`"<category>: <detail>"`); `Driver` further wraps these with a
/// `context: <stage>` clause before handing them back across the public API.
#[derive(Debug)]
pub enum Error {
    /// A contract violation on a public parameter, detected before any I/O
    /// takes place (empty target element, `batch_size == 0`).
    InvalidInput(String),

    /// A configured or implicit resource ceiling was exceeded
    /// (`batch_size` above the maximum, a record over `max_record_bytes`).
    ResourceLimit(String),

    /// An input or output file could not be opened/created. Always carries
    /// the offending path.
    File { path: String, source: io::Error },

    /// Malformed XML, as detected by the event iterator or a tag mismatch
    /// detected by the assembler. Carries a byte offset when one is known.
    Parse { message: String, offset: Option<u64> },

    /// A read or write failed mid-stream.
    Io(io::Error),

    /// Allocation failed while growing a record or sink buffer.
    Memory(String),
}

impl Error {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Error {
        Error::InvalidInput(msg.into())
    }

    pub(crate) fn resource_limit(msg: impl Into<String>) -> Error {
        Error::ResourceLimit(msg.into())
    }

    pub(crate) fn file(path: impl Into<String>, source: io::Error) -> Error {
        Error::File { path: path.into(), source }
    }

    pub(crate) fn parse(msg: impl Into<String>, offset: Option<u64>) -> Error {
        Error::Parse { message: msg.into(), offset }
    }

    pub(crate) fn memory(msg: impl Into<String>) -> Error {
        Error::Memory(msg.into())
    }

    /// Prepends a stage-context clause, e.g. "while reading input file /tmp/a.xml".
    ///
    /// Used by the Driver to annotate a lower-level failure without
    /// introducing a second wrapper error type.
    pub(crate) fn context(self, stage: impl fmt::Display) -> Error {
        let stage = stage.to_string();
        match self {
            Error::InvalidInput(m) => Error::InvalidInput(format!("{m} (context: {stage})")),
            Error::ResourceLimit(m) => Error::ResourceLimit(format!("{m} (context: {stage})")),
            Error::File { path, source } => {
                Error::File { path, source: io::Error::new(source.kind(), format!("{source} (context: {stage})")) }
            }
            Error::Parse { message, offset } => Error::Parse { message: format!("{message} (context: {stage})"), offset },
            Error::Io(e) => Error::Io(io::Error::new(e.kind(), format!("{e} (context: {stage})"))),
            Error::Memory(m) => Error::Memory(format!("{m} (context: {stage})")),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(m) => write!(f, "Invalid input: {m}"),
            Error::ResourceLimit(m) => write!(f, "Resource limit: {m}"),
            Error::File { path, source } => write!(f, "File error: {source} (path: {path})"),
            Error::Parse { message, offset: Some(o) } => write!(f, "XML parsing error: {message} (byte offset {o})"),
            Error::Parse { message, offset: None } => write!(f, "XML parsing error: {message}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Memory(m) => write!(f, "Memory error: {m}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::File { source, .. } => Some(source),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        // quick-xml reports the byte offset separately via `Reader::buffer_position()`;
        // call sites that have a reader in scope attach it through `Error::parse` directly
        // instead of going through this conversion.
        Error::parse(e.to_string(), None)
    }
}
