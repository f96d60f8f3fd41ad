use thiserror::Error;

use crate::baml::version::BamlVersion;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! invalid_operation {
    ($msg:expr) => {
        crate::Error::InvalidOperation($msg.to_string())
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidOperation(format!($fmt, $($arg)*))
    };
}

/// Identifies which of the four map-table ID spaces an [`Error::UnknownId`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Assembly table
    Assembly,
    /// Type table
    Type,
    /// Attribute (property / event) table
    Attribute,
    /// String table
    String,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IdKind::Assembly => "assembly",
            IdKind::Type => "type",
            IdKind::Attribute => "attribute",
            IdKind::String => "string",
        };
        f.write_str(name)
    }
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Format Errors (fatal)
/// - [`Error::InvalidSignature`] - The stream does not start with the `MSBAML` feature id
/// - [`Error::VersionMismatch`] - The stream version differs from the supported version
/// - [`Error::Malformed`] - Corrupted or invalid record data
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of the data
/// - [`Error::NotSupported`] - A legacy record kind that this codec does not handle
/// - [`Error::Empty`] - Empty input provided
///
/// ## Unresolvable References
/// - [`Error::TypeNotFound`] - A type ID could not be resolved to a type
/// - [`Error::PropertyNotFound`] - The owner type has no member of that name
/// - [`Error::ConverterNotFound`] - No converter could be created for a type
/// - [`Error::UnknownId`] - An ID that was never defined in the stream
/// - [`Error::AtLocation`] - Any of the above, with the line and position of the offending record
///
/// ## Protocol Violations
/// - [`Error::InvalidOperation`] - Programmer errors such as mismatched scopes or double checkouts
/// - [`Error::NotSeekable`] - The output stream cannot seek, so back-patching is impossible
///
/// ## I/O and Concurrency
/// - [`Error::FileError`] - Filesystem and stream I/O errors
/// - [`Error::LockError`] - A poisoned lock in the staging channel
/// - [`Error::StagingError`] - An out-of-window access on the staging channel
///
/// # Examples
///
/// ```rust,no_run
/// use bamlscope::{BamlReader, Error};
///
/// # let data: Vec<u8> = Vec::new();
/// match BamlReader::new(&data) {
///     Ok(reader) => println!("BAML version {}", reader.header().reader),
///     Err(Error::VersionMismatch { found, expected }) => {
///         eprintln!("Stream has version {found}, expected {expected}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Format errors
    /// The data is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the data.
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// This record kind or feature is not supported.
    #[error("This record kind is not supported - {0}")]
    NotSupported(u8),

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// The stream does not carry the `MSBAML` feature id.
    #[error("Invalid BAML signature - '{0}'")]
    InvalidSignature(String),

    /// The version header does not match the version this implementation reads.
    ///
    /// Both versions are reported so the user can tell which side is out of date.
    #[error("BAML version mismatch - stream has {found}, this reader supports {expected}")]
    VersionMismatch {
        /// The reader version declared by the stream
        found: BamlVersion,
        /// The version supported by this implementation
        expected: BamlVersion,
    },

    // Unresolvable references
    /// A type could not be resolved through the type resolver.
    #[error("Failed to resolve type - {0}")]
    TypeNotFound(String),

    /// The resolved owner type has no member with the requested name.
    #[error("Type '{owner}' has no property or event named '{name}'")]
    PropertyNotFound {
        /// Full name of the owner type
        owner: String,
        /// Name of the missing member
        name: String,
    },

    /// No type converter could be created for the given type.
    #[error("Failed to create a type converter - {0}")]
    ConverterNotFound(String),

    /// An ID was referenced that was never defined in the stream.
    #[error("Unknown {kind} id - {id}")]
    UnknownId {
        /// Which table the id refers to
        kind: IdKind,
        /// The offending id
        id: i16,
    },

    /// A resolution error, annotated with the position of the record that triggered it.
    #[error("Line {line}, position {position}: {source}")]
    AtLocation {
        /// Line number reported by the last debug record
        line: u32,
        /// Line position reported by the last debug record
        position: u32,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },

    // Protocol violations
    /// An operation was attempted in a state that does not allow it.
    #[error("Invalid operation - {0}")]
    InvalidOperation(String),

    /// The output stream does not support seeking, back-patching is not possible.
    #[error("The output stream does not support seeking")]
    NotSeekable,

    // I/O and concurrency
    /// File or stream I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// Failed to lock target.
    #[error("Failed to lock target")]
    LockError,

    /// An access on the staging channel fell outside the readable window.
    #[error("Staging channel - {0}")]
    StagingError(String),
}

impl Error {
    /// Returns the error without any [`Error::AtLocation`] wrapping.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::AtLocation { source, .. } => source.root(),
            other => other,
        }
    }
}
